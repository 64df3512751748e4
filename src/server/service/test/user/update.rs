use super::*;

/// Tests a user updating their own profile.
///
/// Expected: Ok with the supplied fields written and others kept
#[tokio::test]
async fn updates_own_profile() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let user = factory::create_user(db).await?;

    let updated = UserService::new(db, &media)
        .update(
            &domain_user(user.clone()),
            user.id,
            UserChanges {
                campus: Some("North".to_string()),
                major: Some("Physics".to_string()),
                ..Default::default()
            },
            None,
        )
        .await?;

    assert_eq!(updated.campus.as_deref(), Some("North"));
    assert_eq!(updated.major.as_deref(), Some("Physics"));
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.username, user.username);

    Ok(())
}

/// Tests that users cannot update someone else's profile, admins included.
///
/// Expected: Err(AuthError::InvalidPermissions) with the target unchanged
#[tokio::test]
async fn rejects_updating_another_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let target = factory::create_user(db).await?;
    let admin = factory::create_admin(db).await?;

    let result = UserService::new(db, &media)
        .update(
            &domain_user(admin),
            target.id,
            UserChanges {
                username: Some("renamed".to_string()),
                ..Default::default()
            },
            None,
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidPermissions { .. }))
    ));

    let stored = UserRepository::new(db).find_by_id(target.id).await?.unwrap();
    assert_eq!(stored.username, target.username);

    Ok(())
}

/// Tests changing email to one another account already uses.
///
/// Expected: Err(AppError::Validation) on `email`
#[tokio::test]
async fn rejects_email_in_use() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let result = UserService::new(db, &media)
        .update(
            &domain_user(user.clone()),
            user.id,
            UserChanges {
                email: Some(other.email.clone()),
                ..Default::default()
            },
            None,
        )
        .await;

    match result {
        Err(AppError::Validation(errors)) => {
            assert_eq!(errors.errors()[0].field, "email");
            assert_eq!(errors.errors()[0].msg, "Email is already in use");
        }
        other => panic!("Expected Validation error, got: {:?}", other),
    }

    Ok(())
}

/// Tests resubmitting one's own current email.
///
/// Expected: Ok
#[tokio::test]
async fn keeping_own_email_is_allowed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let user = factory::create_user(db).await?;

    let updated = UserService::new(db, &media)
        .update(
            &domain_user(user.clone()),
            user.id,
            UserChanges {
                email: Some(user.email.clone()),
                ..Default::default()
            },
            None,
        )
        .await?;

    assert_eq!(updated.email, user.email);

    Ok(())
}

/// Tests replacing the profile image.
///
/// Expected: Ok with the new image stored under `Images/profile` and the old file gone
#[tokio::test]
async fn replaces_profile_image() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    std::fs::create_dir_all(uploads.path().join("Images/profile"))?;
    std::fs::write(uploads.path().join("Images/profile/old.png"), b"old")?;
    let user = factory::user::UserFactory::new(db)
        .image_url("Images/profile/old.png")
        .build()
        .await?;

    let updated = UserService::new(db, &media)
        .update(
            &domain_user(user.clone()),
            user.id,
            UserChanges::default(),
            Some(UploadedImage {
                file_name: "me.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: b"new".to_vec(),
            }),
        )
        .await?;

    let new_url = updated.image_url.unwrap();
    assert!(new_url.starts_with("Images/profile/"));
    assert!(uploads.path().join(&new_url).exists());
    assert!(wait_until_removed(&uploads.path().join("Images/profile/old.png")).await);

    Ok(())
}
