use super::*;

/// Tests creating a user with default profile fields.
///
/// Verifies that a newly created user has empty names, zeroed counters and is not an
/// admin.
///
/// Expected: Ok with defaults applied
#[tokio::test]
async fn creates_user_with_defaults() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParam {
            username: "sam".to_string(),
            email: "sam@example.com".to_string(),
            password_hash: "hash".to_string(),
        })
        .await?;

    assert_eq!(user.username, "sam");
    assert_eq!(user.email, "sam@example.com");
    assert_eq!(user.first_name, "");
    assert_eq!(user.last_name, "");
    assert_eq!(user.success_trades, 0);
    assert_eq!(user.profile_rating, 0.0);
    assert!(!user.is_admin);
    assert!(user.image_url.is_none());

    Ok(())
}

/// Tests the email uniqueness constraint.
///
/// Expected: Err(DbErr) on the second insert with the same email, recognised as a
/// unique violation
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let param = CreateUserParam {
        username: "sam".to_string(),
        email: "sam@example.com".to_string(),
        password_hash: "hash".to_string(),
    };

    repo.create(param.clone()).await?;
    let err = repo.create(param).await.unwrap_err();

    assert!(is_unique_violation(&err));

    Ok(())
}

/// Tests that unrelated database errors are not mistaken for unique violations.
///
/// Expected: false for a custom error and for a missing record
#[test]
fn other_errors_are_not_unique_violations() {
    assert!(!is_unique_violation(&DbErr::Custom("boom".to_string())));
    assert!(!is_unique_violation(&DbErr::RecordNotFound("user 1".to_string())));
}
