use super::*;

/// Tests the cascading delete of a user.
///
/// Verifies that the user's adverts and their reviews are removed, that reviews the user
/// wrote elsewhere are removed, and that the affected averages are recomputed.
///
/// Expected: Ok with dependents gone and the other advert's average back to 2.0
#[tokio::test]
async fn cascades_and_recomputes_averages() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let (doomed, own_note, own_ratings) = factory::helpers::create_rated_note(db, &[5]).await?;
    let (_, other_note, _) = factory::helpers::create_rated_note(db, &[2]).await?;
    let doomed_review = factory::create_rating(db, other_note.id, doomed.id, 5).await?;
    crate::server::service::review::refresh_average_rating(db, other_note.id).await?;

    UserService::new(db, &media).delete(doomed.id).await?;

    assert!(UserRepository::new(db).find_by_id(doomed.id).await?.is_none());
    assert!(AdvertRepository::new(db).find_by_id(own_note.id).await?.is_none());
    assert!(RatingRepository::new(db)
        .find_by_id(own_ratings[0].id)
        .await?
        .is_none());
    assert!(RatingRepository::new(db)
        .find_by_id(doomed_review.id)
        .await?
        .is_none());

    let other = AdvertRepository::new(db)
        .find_by_id(other_note.id)
        .await?
        .unwrap();
    assert_eq!(other.average_rating, Some(2.0));

    Ok(())
}

/// Tests that the only review of an advert disappearing clears its average.
///
/// Expected: the reviewed advert has no average
#[tokio::test]
async fn clears_average_when_last_review_removed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let (_, advert, ratings) = factory::helpers::create_rated_note(db, &[3]).await?;

    UserService::new(db, &media)
        .delete(ratings[0].author_id)
        .await?;

    let stored = AdvertRepository::new(db).find_by_id(advert.id).await?.unwrap();
    assert_eq!(stored.average_rating, None);

    Ok(())
}

/// Tests that deleting a user removes their stored images.
///
/// Expected: profile and advert images removed
#[tokio::test]
async fn removes_images() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());
    media.ensure_dirs().await?;

    std::fs::write(uploads.path().join("Images/profile/me.png"), b"me")?;
    std::fs::write(uploads.path().join("Images/adverts/ad.png"), b"ad")?;

    let user = factory::user::UserFactory::new(db)
        .image_url("Images/profile/me.png")
        .build()
        .await?;
    factory::advert::AdvertFactory::new(db, user.id)
        .image_url("Images/adverts/ad.png")
        .build()
        .await?;

    UserService::new(db, &media).delete(user.id).await?;

    assert!(wait_until_removed(&uploads.path().join("Images/profile/me.png")).await);
    assert!(wait_until_removed(&uploads.path().join("Images/adverts/ad.png")).await);

    Ok(())
}

/// Tests deleting a missing user.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn fails_for_missing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let result = UserService::new(db, &media).delete(5).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
