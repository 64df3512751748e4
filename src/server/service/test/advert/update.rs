use super::*;

/// Tests that the owner can update an advert.
///
/// Expected: Ok with only the supplied fields changed
#[tokio::test]
async fn owner_updates_supplied_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let (creator, advert) = factory::helpers::create_note_with_creator(db).await?;

    let updated = AdvertService::new(db, &media)
        .update(
            &domain_user(creator),
            advert.id,
            AdvertChanges {
                price: Some(2.5),
                ..Default::default()
            },
            None,
        )
        .await?;

    assert_eq!(updated.price, 2.5);
    assert_eq!(updated.title, advert.title);
    assert_eq!(updated.module_id, advert.module_id);

    Ok(())
}

/// Tests that a non-owner cannot update an advert.
///
/// Expected: Err(AuthError::InvalidPermissions) with the stored record unchanged
#[tokio::test]
async fn non_owner_is_rejected() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let (_, advert) = factory::helpers::create_note_with_creator(db).await?;
    let stranger = factory::create_user(db).await?;

    let result = AdvertService::new(db, &media)
        .update(
            &domain_user(stranger),
            advert.id,
            AdvertChanges {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            },
            None,
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidPermissions { .. }))
    ));

    let stored = AdvertRepository::new(db).find_by_id(advert.id).await?.unwrap();
    assert_eq!(stored.title, advert.title);

    Ok(())
}

/// Tests that admins get no update rights over other users' adverts.
///
/// Expected: Err(AuthError::InvalidPermissions)
#[tokio::test]
async fn admin_cannot_update_foreign_advert() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let (_, advert) = factory::helpers::create_note_with_creator(db).await?;
    let admin = factory::create_admin(db).await?;

    let result = AdvertService::new(db, &media)
        .update(&domain_user(admin), advert.id, AdvertChanges::default(), None)
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidPermissions { .. }))
    ));

    Ok(())
}

/// Tests changing a reviewed note into a book.
///
/// Expected: Err(AppError::Validation) on `type` with category and reviews unchanged
#[tokio::test]
async fn rejects_reviewed_note_becoming_book() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let (creator, advert, _) = factory::helpers::create_rated_note(db, &[4, 5]).await?;

    let result = AdvertService::new(db, &media)
        .update(
            &domain_user(creator),
            advert.id,
            AdvertChanges {
                category: Some(AdvertCategory::Book),
                ..Default::default()
            },
            None,
        )
        .await;

    match result {
        Err(AppError::Validation(errors)) => assert_eq!(errors.errors()[0].field, "type"),
        other => panic!("Expected Validation error, got: {:?}", other),
    }

    let (stored, ratings) = AdvertRepository::new(db)
        .find_with_ratings(advert.id)
        .await?
        .unwrap();
    assert_eq!(stored.category, "note");
    assert_eq!(ratings.len(), 2);

    Ok(())
}

/// Tests replacing the image of an advert.
///
/// Verifies that the new file is stored and the previous one is deleted in the background.
///
/// Expected: Ok with the new image referenced and the old file gone
#[tokio::test]
async fn new_image_replaces_previous_file() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());
    let service = AdvertService::new(db, &media);

    let seller = domain_user(factory::create_user(db).await?);
    let advert = service
        .create(
            CreateAdvertParam {
                creator_id: seller.id,
                category: AdvertCategory::Note,
                module_id: "MA1001".to_string(),
                title: "Calculus notes".to_string(),
                description: "Weeks 1-6".to_string(),
                price: 5.0,
                image_url: None,
            },
            Some(png("old.png")),
        )
        .await?;
    let old_path = uploads.path().join(advert.image_url.as_deref().unwrap());

    let updated = service
        .update(&seller, advert.id, AdvertChanges::default(), Some(png("new.png")))
        .await?;

    let new_url = updated.image_url.unwrap();
    assert!(new_url.ends_with("--new.png"));
    assert!(uploads.path().join(&new_url).exists());
    assert!(wait_until_removed(&old_path).await);

    Ok(())
}

/// Tests updating a missing advert.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn fails_for_missing_advert() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let user = domain_user(factory::create_user(db).await?);

    let result = AdvertService::new(db, &media)
        .update(&user, 999, AdvertChanges::default(), None)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
