use super::*;

/// Tests loading an advert with its ratings.
///
/// Expected: Ok(Some) with ratings in insertion order
#[tokio::test]
async fn returns_ratings_in_insertion_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, advert, ratings) = factory::helpers::create_rated_note(db, &[5, 3, 4]).await?;

    let repo = AdvertRepository::new(db);
    let (found, found_ratings) = repo.find_with_ratings(advert.id).await?.unwrap();

    assert_eq!(found.id, advert.id);
    assert_eq!(
        found_ratings.iter().map(|r| r.id).collect::<Vec<_>>(),
        ratings.iter().map(|r| r.id).collect::<Vec<_>>()
    );
    assert_eq!(found.average_rating, Some(4.0));

    Ok(())
}

/// Tests loading a missing advert.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_advert() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AdvertRepository::new(db);

    assert!(repo.find_with_ratings(1).await?.is_none());

    Ok(())
}
