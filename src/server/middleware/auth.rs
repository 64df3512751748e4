//! Authentication and authorization checks.
//!
//! `AuthGuard` turns the session token of a request into a loaded [`User`] and checks
//! route-level permissions. The ownership predicates decide whether an authenticated user
//! may mutate a specific advert or user record; the services call them before any write.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::{advert::Advert, user::User},
    service::token::TokenIssuer,
};

/// Header carrying the session token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

pub enum Permission {
    Admin,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenIssuer,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenIssuer, headers: &'a HeaderMap) -> Self {
        Self {
            db,
            tokens,
            headers,
        }
    }

    /// Authenticates the request and checks every listed permission.
    ///
    /// The admin flag is read from the stored user, never from the token, so a demoted
    /// admin loses access immediately.
    ///
    /// # Arguments
    /// - `permissions` - Permissions the caller must hold; empty means any signed-in user
    ///
    /// # Returns
    /// - `Ok(User)` - The authenticated user
    /// - `Err(AuthError::MissingToken)` - No token on the request
    /// - `Err(AuthError::InvalidToken)` - Token failed verification
    /// - `Err(AuthError::UserNotInDatabase)` - Token names a deleted user
    /// - `Err(AuthError::AdminOnly)` - `Permission::Admin` required but user is not admin
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(token) = self.token() else {
            return Err(AuthError::MissingToken.into());
        };

        let claims = self.tokens.verify(token)?;
        let user_id = claims.user.id;

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.is_admin {
                        return Err(AuthError::AdminOnly(user_id).into());
                    }
                }
            }
        }

        Ok(user)
    }

    fn token(&self) -> Option<&'a str> {
        let from_header = self
            .headers
            .get(AUTH_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());

        let from_bearer = || {
            self.headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
        };

        from_header
            .or_else(from_bearer)
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvertAction {
    Update,
    Delete,
}

/// Whether `actor` may perform `action` on `advert`.
///
/// Updates are owner-only. Deletes are allowed to the owner or any admin.
pub fn can_mutate_advert(actor: &User, advert: &Advert, action: AdvertAction) -> bool {
    let is_owner = advert.creator_id == actor.id;
    match action {
        AdvertAction::Update => is_owner,
        AdvertAction::Delete => is_owner || actor.is_admin,
    }
}

/// Whether `actor` may edit the profile of `target_user_id`. Only the user themself may.
pub fn can_mutate_user(actor: &User, target_user_id: i32) -> bool {
    actor.id == target_user_id
}

pub fn ensure_can_mutate_advert(
    actor: &User,
    advert: &Advert,
    action: AdvertAction,
) -> Result<(), AuthError> {
    if can_mutate_advert(actor, advert, action) {
        return Ok(());
    }

    Err(AuthError::InvalidPermissions {
        user_id: actor.id,
        reason: format!(
            "attempted to {:?} advert {} owned by user {}",
            action, advert.id, advert.creator_id
        ),
    })
}

pub fn ensure_can_mutate_user(actor: &User, target_user_id: i32) -> Result<(), AuthError> {
    if can_mutate_user(actor, target_user_id) {
        return Ok(());
    }

    Err(AuthError::InvalidPermissions {
        user_id: actor.id,
        reason: format!("attempted to modify user {}", target_user_id),
    })
}
