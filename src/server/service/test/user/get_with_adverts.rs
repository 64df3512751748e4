use super::*;

/// Tests loading a profile with its adverts.
///
/// Expected: Ok(Some) with only the user's own adverts
#[tokio::test]
async fn returns_only_own_adverts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let (user, note) = factory::helpers::create_note_with_creator(db).await?;
    let book = factory::create_book(db, user.id).await?;
    factory::helpers::create_note_with_creator(db).await?;

    let profile = UserService::new(db, &media)
        .get_with_adverts(user.id)
        .await?
        .unwrap();

    assert_eq!(profile.user.id, user.id);
    let ids: Vec<i32> = profile.adverts.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![note.id, book.id]);

    Ok(())
}

/// Tests loading a missing profile.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let uploads = TempDir::new()?;
    let media = MediaStore::new(uploads.path());

    let profile = UserService::new(db, &media).get_with_adverts(42).await?;

    assert!(profile.is_none());

    Ok(())
}
