use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    model::{
        api::{ErrorDto, TokenDto},
        user::{LoginUserDto, RegisterUserDto},
    },
    server::{
        error::AppError,
        model::user::{LoginParam, RegisterParam},
        service::auth::AuthService,
        state::AppState,
        util::extract::AppJson,
    },
};

/// Tag for grouping account endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Register a new account.
///
/// Validates the request, stores the user with an argon2 password hash and returns a
/// session token for the new account.
///
/// # Returns
/// - `200 OK` - Session token
/// - `400 Bad Request` - Invalid fields or email already registered
/// - `500 Internal Server Error` - Database, hashing or signing error
#[utoipa::path(
    post,
    path = "/users/register",
    tag = AUTH_TAG,
    request_body = RegisterUserDto,
    responses(
        (status = 200, description = "Account created", body = TokenDto),
        (status = 400, description = "Invalid input or user already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterUserDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = AuthService::new(&state.db, &state.tokens)
        .register(RegisterParam {
            username: payload.username.trim().to_string(),
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok((StatusCode::OK, Json(TokenDto { token })))
}

/// Log in with email and password.
///
/// # Returns
/// - `200 OK` - Session token
/// - `400 Bad Request` - Invalid fields or credentials
/// - `500 Internal Server Error` - Database or signing error
#[utoipa::path(
    post,
    path = "/users/login",
    tag = AUTH_TAG,
    request_body = LoginUserDto,
    responses(
        (status = 200, description = "Logged in", body = TokenDto),
        (status = 400, description = "Invalid input or credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginUserDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = AuthService::new(&state.db, &state.tokens)
        .login(LoginParam {
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok((StatusCode::OK, Json(TokenDto { token })))
}
