//! User domain models and parameters.
//!
//! The password hash never leaves the data layer except through [`UserCredentials`],
//! which only the login flow reads.

use chrono::{DateTime, Utc};
use validator::ValidateEmail;

use crate::{
    model::user::{UserDto, UserWithAdvertsDto},
    server::{error::validation::FieldErrors, model::advert::Advert, util::upload::UploadForm},
};

/// Registered user without credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
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
    /// Whether the user has admin privileges.
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary,
    /// dropping the password hash.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            image_url: entity.image_url,
            campus: entity.campus,
            major: entity.major,
            success_trades: entity.success_trades,
            profile_rating: entity.profile_rating,
            is_admin: entity.is_admin,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            image_url: self.image_url,
            campus: self.campus,
            major: self.major,
            success_trades: self.success_trades,
            profile_rating: self.profile_rating,
            is_admin: self.is_admin,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Data needed to check a login attempt.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: i32,
    pub is_admin: bool,
    pub password_hash: String,
}

impl UserCredentials {
    pub fn from_entity(entity: &entity::user::Model) -> Self {
        Self {
            id: entity.id,
            is_admin: entity.is_admin,
            password_hash: entity.password.clone(),
        }
    }
}

/// User profile together with the adverts they created.
#[derive(Debug, Clone, PartialEq)]
pub struct UserWithAdverts {
    pub user: User,
    pub adverts: Vec<Advert>,
}

impl UserWithAdverts {
    pub fn into_dto(self) -> UserWithAdvertsDto {
        UserWithAdvertsDto {
            user: self.user.into_dto(),
            adverts: self.adverts.into_iter().map(Advert::into_dto).collect(),
        }
    }
}

/// Parameters for registering a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct RegisterParam {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginParam {
    pub email: String,
    pub password: String,
}

/// Profile fields supplied by an update form. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub campus: Option<String>,
    pub major: Option<String>,
}

impl UserChanges {
    /// Reads the profile fields of a form, rejecting a malformed email.
    pub fn from_form(form: &UploadForm) -> Result<Self, FieldErrors> {
        let text = |name: &str| form.text(name).map(str::to_string);

        let email = text("email");
        if let Some(email) = &email {
            if !email.validate_email() {
                return Err(FieldErrors::single("email", "Please include a valid email"));
            }
        }

        Ok(Self {
            username: text("username"),
            first_name: text("firstName"),
            last_name: text("lastName"),
            email,
            campus: text("campus"),
            major: text("major"),
        })
    }
}
