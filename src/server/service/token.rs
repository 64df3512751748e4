//! Session token signing and verification.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::server::error::{auth::AuthError, internal::InternalError};

/// Identity embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUser {
    pub id: i32,
}

/// Claims carried by every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user: TokenUser,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 session tokens with a fixed lifetime.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    ttl_seconds: i64,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self {
            encoding_key: Arc::new(EncodingKey::from_secret(secret)),
            decoding_key: Arc::new(DecodingKey::from_secret(secret)),
            ttl_seconds,
        }
    }

    /// Signs a token for the given user.
    ///
    /// The admin flag is informational only; permission checks always re-read the user
    /// record.
    ///
    /// # Returns
    /// - `Ok(String)` - Encoded token
    /// - `Err(InternalError::TokenSigning)` - Encoding failed
    pub fn issue(&self, user_id: i32, is_admin: bool) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user: TokenUser { id: user_id },
            is_admin,
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(InternalError::TokenSigning)
    }

    /// Verifies signature and expiry and returns the token's claims.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Token is authentic and unexpired
    /// - `Err(AuthError::InvalidToken)` - Malformed, tampered or expired token
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}
