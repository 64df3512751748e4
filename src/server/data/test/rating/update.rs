use super::*;

/// Tests a partial rating update.
///
/// Expected: Ok with only the value changed
#[tokio::test]
async fn updates_value_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, ratings) = factory::helpers::create_rated_note(db, &[5]).await?;
    let original = &ratings[0];

    let repo = RatingRepository::new(db);
    let updated = repo.update(original.id, None, Some(2)).await?;

    assert_eq!(updated.value, 2);
    assert_eq!(updated.body, original.body);

    Ok(())
}

/// Tests an update with nothing to change.
///
/// Expected: Ok with the rating unchanged
#[tokio::test]
async fn empty_update_returns_current_rating() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, ratings) = factory::helpers::create_rated_note(db, &[3]).await?;

    let repo = RatingRepository::new(db);
    let updated = repo.update(ratings[0].id, None, None).await?;

    assert_eq!(updated, ratings[0]);

    Ok(())
}
