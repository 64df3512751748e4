use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every failed request.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ErrorDto {
    pub msg: String,
    /// Field-level detail, present only for validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldErrorDto>,
}

impl ErrorDto {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            errors: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct FieldErrorDto {
    pub field: String,
    pub msg: String,
}

/// Plain acknowledgement.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct MessageDto {
    pub msg: String,
}

impl MessageDto {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Signed session token returned by registration and login.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct TokenDto {
    pub token: String,
}
