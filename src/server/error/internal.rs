use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Stored advert category is neither `note` nor `book`.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Advert {advert_id} has unknown stored category '{value}'")]
    InvalidStoredCategory {
        /// The advert holding the bad value
        advert_id: i32,
        /// The stored category string
        value: String,
    },

    /// Password hashing or hash parsing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Signing a session token failed.
    #[error("Failed to sign session token: {0}")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),
}
