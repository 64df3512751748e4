use super::*;

/// Tests an admin passing the admin check.
///
/// Expected: Ok(User) with is_admin set
#[tokio::test]
async fn grants_access_to_admin_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = issuer();
    let admin = factory::create_admin(db).await?;

    let token = tokens.issue(admin.id, true)?;
    let headers = headers_with_token(&token);

    let user = AuthGuard::new(db, &tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(user.id, admin.id);
    assert!(user.is_admin);

    Ok(())
}

/// Tests a regular user failing the admin check.
///
/// Expected: Err(AuthError::AdminOnly)
#[tokio::test]
async fn denies_access_to_non_admin_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = issuer();
    let user = factory::create_user(db).await?;

    let token = tokens.issue(user.id, false)?;
    let headers = headers_with_token(&token);

    let result = AuthGuard::new(db, &tokens, &headers)
        .require(&[Permission::Admin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AdminOnly(user_id))) => assert_eq!(user_id, user.id),
        other => panic!("Expected AdminOnly, got: {:?}", other),
    }

    Ok(())
}

/// Tests that the admin claim in a token is not trusted.
///
/// Verifies that a token claiming admin for a regular user is still denied, since the
/// flag is read from the stored user.
///
/// Expected: Err(AuthError::AdminOnly)
#[tokio::test]
async fn ignores_admin_claim_in_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tokens = issuer();
    let user = factory::create_user(db).await?;

    let token = tokens.issue(user.id, true)?;
    let headers = headers_with_token(&token);

    let result = AuthGuard::new(db, &tokens, &headers)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AdminOnly(_)))
    ));

    Ok(())
}
