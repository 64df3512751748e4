//! Argon2 password hashing.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::RngCore;

use crate::server::error::internal::InternalError;

/// Hashes a plaintext password into a PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, InternalError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| InternalError::PasswordHash(e.to_string()))
}

/// Checks a plaintext password against a stored PHC string.
///
/// # Returns
/// - `Ok(true)` / `Ok(false)` - Whether the password matches
/// - `Err(InternalError::PasswordHash)` - The stored hash could not be parsed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, InternalError> {
    let parsed = PasswordHash::new(hash).map_err(|e| InternalError::PasswordHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(InternalError::PasswordHash(e.to_string())),
    }
}
