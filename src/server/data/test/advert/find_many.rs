use super::*;

/// Tests filtering by category.
///
/// Expected: Ok with only books
#[tokio::test]
async fn filters_by_category() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_note(db, user.id).await?;
    let book = factory::create_book(db, user.id).await?;

    let repo = AdvertRepository::new(db);
    let adverts = repo
        .find_many(AdvertListParam {
            category: Some(AdvertCategory::Book),
            ..Default::default()
        })
        .await?;

    assert_eq!(adverts.len(), 1);
    assert_eq!(adverts[0].0.id, book.id);

    Ok(())
}

/// Tests exact matching on module code combined with a category filter.
///
/// Expected: Ok with only the note for the requested module
#[tokio::test]
async fn filters_by_module_and_category() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let wanted = factory::advert::AdvertFactory::new(db, user.id)
        .module_id("MA201")
        .build()
        .await?;
    factory::advert::AdvertFactory::new(db, user.id)
        .module_id("MA201")
        .category("book")
        .build()
        .await?;
    factory::advert::AdvertFactory::new(db, user.id)
        .module_id("MA2011")
        .build()
        .await?;

    let repo = AdvertRepository::new(db);
    let adverts = repo
        .find_many(AdvertListParam {
            category: Some(AdvertCategory::Note),
            module_id: Some("MA201".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(adverts.len(), 1);
    assert_eq!(adverts[0].0.id, wanted.id);

    Ok(())
}

/// Tests numeric price ordering.
///
/// Verifies that prices sort as numbers (so 100 is above 20).
///
/// Expected: Ok with prices descending
#[tokio::test]
async fn sorts_by_price_numerically() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    for price in [20.0, 100.0, 5.5] {
        factory::advert::AdvertFactory::new(db, user.id)
            .price(price)
            .build()
            .await?;
    }

    let repo = AdvertRepository::new(db);
    let adverts = repo
        .find_many(AdvertListParam {
            sort: vec![(AdvertSortKey::Price, SortDirection::Desc)],
            ..Default::default()
        })
        .await?;

    let prices: Vec<f64> = adverts.iter().map(|(a, _)| a.price).collect();
    assert_eq!(prices, vec![100.0, 20.0, 5.5]);

    Ok(())
}

/// Tests that unrated adverts sort last whichever direction is requested.
///
/// Expected: Ok with rated adverts ordered and the unrated one at the end
#[tokio::test]
async fn unrated_adverts_sort_last() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let unrated = factory::create_note(db, user.id).await?;
    let low = factory::advert::AdvertFactory::new(db, user.id)
        .average_rating(Some(2.0))
        .build()
        .await?;
    let high = factory::advert::AdvertFactory::new(db, user.id)
        .average_rating(Some(4.5))
        .build()
        .await?;

    let repo = AdvertRepository::new(db);

    let desc = repo
        .find_many(AdvertListParam {
            sort: vec![(AdvertSortKey::AverageRating, SortDirection::Desc)],
            ..Default::default()
        })
        .await?;
    let asc = repo
        .find_many(AdvertListParam {
            sort: vec![(AdvertSortKey::AverageRating, SortDirection::Asc)],
            ..Default::default()
        })
        .await?;

    let ids = |rows: &[(entity::advert::Model, Vec<entity::rating::Model>)]| {
        rows.iter().map(|(a, _)| a.id).collect::<Vec<_>>()
    };
    assert_eq!(ids(&desc), vec![high.id, low.id, unrated.id]);
    assert_eq!(ids(&asc), vec![low.id, high.id, unrated.id]);

    Ok(())
}

/// Tests newest-first ordering with a limit.
///
/// Expected: Ok with the two most recent adverts
#[tokio::test]
async fn limits_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    let mut created = Vec::new();
    for days_ago in [3, 1, 2] {
        let advert = factory::advert::AdvertFactory::new(db, user.id)
            .created_at(now - Duration::days(days_ago))
            .build()
            .await?;
        created.push(advert);
    }

    let repo = AdvertRepository::new(db);
    let adverts = repo
        .find_many(AdvertListParam {
            sort: vec![(AdvertSortKey::CreatedAt, SortDirection::Desc)],
            limit: Some(2),
            ..Default::default()
        })
        .await?;

    let ids: Vec<i32> = adverts.iter().map(|(a, _)| a.id).collect();
    assert_eq!(ids, vec![created[1].id, created[2].id]);

    Ok(())
}

/// Tests that ratings are attached to the right adverts.
///
/// Expected: Ok with each advert carrying only its own ratings
#[tokio::test]
async fn groups_ratings_per_advert() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, first, _) = factory::helpers::create_rated_note(db, &[1, 2]).await?;
    let (_, second, _) = factory::helpers::create_rated_note(db, &[5]).await?;
    let (_, bare) = factory::helpers::create_note_with_creator(db).await?;

    let repo = AdvertRepository::new(db);
    let adverts = repo.find_many(AdvertListParam::default()).await?;

    assert_eq!(adverts.len(), 3);
    for (advert, ratings) in adverts {
        let values: Vec<i32> = ratings.iter().map(|r| r.value).collect();
        if advert.id == first.id {
            assert_eq!(values, vec![1, 2]);
        } else if advert.id == second.id {
            assert_eq!(values, vec![5]);
        } else {
            assert_eq!(advert.id, bare.id);
            assert!(values.is_empty());
        }
    }

    Ok(())
}
