use super::*;

/// Tests resolving usernames for a mix of known and unknown ids.
///
/// Expected: Ok with only the known ids present
#[tokio::test]
async fn resolves_known_ids_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::user::UserFactory::new(db)
        .username("alice")
        .build()
        .await?;
    let bob = factory::user::UserFactory::new(db)
        .username("bob")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let usernames = repo.get_usernames(&[alice.id, bob.id, 9999]).await?;

    assert_eq!(usernames.len(), 2);
    assert_eq!(usernames.get(&alice.id).map(String::as_str), Some("alice"));
    assert_eq!(usernames.get(&bob.id).map(String::as_str), Some("bob"));

    Ok(())
}

/// Tests that an empty id list does not query the database.
///
/// Expected: Ok with an empty map
#[tokio::test]
async fn empty_ids_yield_empty_map() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let usernames = repo.get_usernames(&[]).await?;

    assert!(usernames.is_empty());

    Ok(())
}
