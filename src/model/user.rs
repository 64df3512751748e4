use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::advert::AdvertDto;

/// Public view of a user. Never carries the password hash.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub campus: Option<String>,
    pub major: Option<String>,
    pub success_trades: i32,
    pub profile_rating: f64,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct UserWithAdvertsDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub adverts: Vec<AdvertDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ProfileDto {
    pub profile: UserWithAdvertsDto,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct UpdatedUserDto {
    pub user: UserDto,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct UserListDto {
    pub count: usize,
    pub users: Vec<UserDto>,
}

/// Missing fields deserialize as empty and fail validation.
#[derive(Serialize, Deserialize, ToSchema, Validate, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "Please add username"))]
    pub username: String,
    #[validate(email(message = "Please include a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Please enter a password with 6 or more characters"))]
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct LoginUserDto {
    #[validate(email(message = "Please enter valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Multipart (or JSON) body accepted when updating a user profile.
///
/// Documentation only; the handler reads the form through `UploadForm`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserFormDto {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub campus: Option<String>,
    pub major: Option<String>,
    /// Profile image file (jpg, jpeg or png).
    #[schema(value_type = Option<String>, format = Binary)]
    pub image_url: Option<String>,
}
