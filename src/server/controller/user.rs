use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{ProfileDto, UpdatedUserDto, UserFormDto, UserListDto, UserWithAdvertsDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::user::UserChanges,
        service::user::UserService,
        state::AppState,
        util::{extract::IdPath, upload::UploadForm},
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// List every user.
///
/// # Access Control
/// - `Admin` - Only admins can list users
///
/// # Returns
/// - `200 OK` - Count and users
/// - `400 Bad Request` - Caller is not an admin
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/users/all",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All users", body = UserListDto),
        (status = 400, description = "Caller is not an admin", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let users: Vec<_> = UserService::new(&state.db, &state.media)
        .get_all()
        .await?
        .into_iter()
        .map(|u| u.into_dto())
        .collect();

    Ok((
        StatusCode::OK,
        Json(UserListDto {
            count: users.len(),
            users,
        }),
    ))
}

/// Get the signed-in user with their adverts.
///
/// # Returns
/// - `200 OK` - The caller's profile
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Current user", body = UserWithAdvertsDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let profile = UserService::new(&state.db, &state.media)
        .get_with_adverts(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok((StatusCode::OK, Json(profile.into_dto())))
}

/// Get the public profile of a user.
///
/// # Returns
/// - `200 OK` - Profile with adverts
/// - `404 Not Found` - No such user
#[utoipa::path(
    get,
    path = "/users/profile/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User profile", body = ProfileDto),
        (status = 404, description = "Profile not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<impl IntoResponse, AppError> {
    let profile = UserService::new(&state.db, &state.media)
        .get_with_adverts(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok((
        StatusCode::OK,
        Json(ProfileDto {
            profile: profile.into_dto(),
        }),
    ))
}

/// Update the signed-in user's own profile.
///
/// Accepts multipart form data (with an optional `imageUrl` file) or a JSON object.
/// Only supplied fields change.
///
/// # Access Control
/// - The user themself; admins get no override
///
/// # Returns
/// - `200 OK` - The updated user
/// - `400 Bad Request` - Invalid fields or updating another user
/// - `401 Unauthorized` - Missing or invalid token
/// - `404 Not Found` - No such user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    request_body(content = UserFormDto, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated user", body = UpdatedUserDto),
        (status = 400, description = "Invalid input or permissions", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    headers: HeaderMap,
    mut form: UploadForm,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let image = form.take_image();
    let changes = UserChanges::from_form(&form)?;

    let user = UserService::new(&state.db, &state.media)
        .update(&actor, id, changes, image)
        .await?;

    Ok((
        StatusCode::OK,
        Json(UpdatedUserDto {
            user: user.into_dto(),
        }),
    ))
}

/// Delete a user with their adverts and reviews.
///
/// # Access Control
/// - `Admin` - Only admins can delete users
///
/// # Returns
/// - `200 OK` - User removed
/// - `400 Bad Request` - Caller is not an admin
/// - `404 Not Found` - No such user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User removed", body = MessageDto),
        (status = 400, description = "Caller is not an admin", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    UserService::new(&state.db, &state.media).delete(id).await?;

    tracing::info!("Admin {} removed user {}", admin.id, id);

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("User successfully removed")),
    ))
}
