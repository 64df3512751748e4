//! Registration and login.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{is_unique_violation, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParam, LoginParam, RegisterParam},
    service::{
        password::{hash_password, verify_password},
        token::TokenIssuer,
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenIssuer,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenIssuer) -> Self {
        Self { db, tokens }
    }

    /// Creates an account and returns a session token for it.
    ///
    /// # Arguments
    /// - `param` - Already validated username, email and plaintext password
    ///
    /// # Returns
    /// - `Ok(String)` - Session token of the new user
    /// - `Err(AppError::BadRequest)` - The email is already registered
    /// - `Err(AppError::InternalErr)` - Hashing or signing failed
    pub async fn register(&self, param: RegisterParam) -> Result<String, AppError> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.find_by_email(&param.email).await?.is_some() {
            return Err(AppError::BadRequest("User already exists".to_string()));
        }

        let password_hash = hash_password(&param.password)?;

        // Concurrent registrations can still collide on the unique email index.
        let user = user_repo
            .create(CreateUserParam {
                username: param.username,
                email: param.email,
                password_hash,
            })
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::BadRequest("User already exists".to_string())
                } else {
                    e.into()
                }
            })?;

        tracing::info!("Registered user {}", user.id);

        Ok(self.tokens.issue(user.id, user.is_admin)?)
    }

    /// Checks credentials and returns a session token.
    ///
    /// Unknown email and wrong password produce the same error.
    ///
    /// # Returns
    /// - `Ok(String)` - Session token
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    pub async fn login(&self, param: LoginParam) -> Result<String, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(credentials) = user_repo.find_credentials_by_email(&param.email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(&param.password, &credentials.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(self.tokens.issue(credentials.id, credentials.is_admin)?)
    }
}
