use super::*;

/// Tests deleting all adverts of one creator.
///
/// Expected: Ok with the creator's adverts gone and other adverts kept
#[tokio::test]
async fn deletes_only_creators_adverts() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_marketplace_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::create_note(db, owner.id).await?;
    factory::create_book(db, owner.id).await?;
    let kept = factory::create_note(db, other.id).await?;

    let repo = AdvertRepository::new(db);
    let deleted = repo.delete_by_creator(owner.id).await?;

    assert_eq!(deleted, 2);
    assert!(repo.find_by_creator(owner.id).await?.is_empty());
    assert!(repo.find_by_id(kept.id).await?.is_some());

    Ok(())
}
