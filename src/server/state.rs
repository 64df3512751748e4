//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - Session token issuer
//! - Image store for uploaded files
//! - Notification dispatcher for outbound email

use sea_orm::DatabaseConnection;

use crate::server::service::{mail::NotificationDispatcher, media::MediaStore, token::TokenIssuer};

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `TokenIssuer` holds reference-counted signing keys
/// - `MediaStore` is a root path
/// - `NotificationDispatcher` shares its transport through an `Arc`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Signs and verifies session tokens.
    pub tokens: TokenIssuer,

    /// Stores uploaded images and schedules their deletion.
    pub media: MediaStore,

    /// Sends buyer-interest emails in the background.
    pub mailer: NotificationDispatcher,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `tokens` - Session token issuer
    /// - `media` - Image store rooted at the upload directory
    /// - `mailer` - Outbound notification dispatcher
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        tokens: TokenIssuer,
        media: MediaStore,
        mailer: NotificationDispatcher,
    ) -> Self {
        Self {
            db,
            tokens,
            media,
            mailer,
        }
    }
}
