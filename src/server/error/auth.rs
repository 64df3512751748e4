use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no session token.
    ///
    /// Neither the `x-auth-token` header nor an `Authorization: Bearer` header was present.
    /// Results in a 401 Unauthorized response.
    #[error("No session token present on request")]
    MissingToken,

    /// Session token failed signature or expiry verification.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Session token rejected: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Token was valid but the user it names no longer exists.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("User {0} named by a valid token no longer exists")]
    UserNotInDatabase(i32),

    /// Caller is authenticated but not allowed to perform the action.
    ///
    /// Results in a 400 Bad Request response with "Invalid permissions".
    #[error("User {user_id} denied: {reason}")]
    InvalidPermissions {
        /// The user who attempted the action
        user_id: i32,
        /// Server-side explanation, never sent to the client
        reason: String,
    },

    /// Caller is authenticated but the route is restricted to administrators.
    ///
    /// Results in a 400 Bad Request response with "Only Admin Allowed".
    #[error("User {0} attempted an admin-only operation")]
    AdminOnly(i32),

    /// Login attempted with an unknown email or a wrong password.
    #[error("Invalid login credentials")]
    InvalidCredentials,
}

/// Converts authentication errors into HTTP responses.
///
/// Maps authentication errors to appropriate HTTP status codes and user-friendly error messages:
/// - `MissingToken` → 401 Unauthorized with "No token, authorization denied"
/// - `InvalidToken` / `UserNotInDatabase` → 401 Unauthorized with "Token is not valid"
/// - `InvalidPermissions` → 400 Bad Request with "Invalid permissions"
/// - `AdminOnly` → 400 Bad Request with "Only Admin Allowed"
/// - `InvalidCredentials` → 400 Bad Request with "Invalid Credentials"
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, msg) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "No token, authorization denied"),
            Self::InvalidToken(_) | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Token is not valid")
            }
            Self::InvalidPermissions { .. } => (StatusCode::BAD_REQUEST, "Invalid permissions"),
            Self::AdminOnly(_) => (StatusCode::BAD_REQUEST, "Only Admin Allowed"),
            Self::InvalidCredentials => (StatusCode::BAD_REQUEST, "Invalid Credentials"),
        };

        (status, Json(ErrorDto::new(msg))).into_response()
    }
}
