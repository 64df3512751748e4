//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a note advert together with the user who owns it.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((user, advert))` - The creator and the note advert
/// - `Err(DbErr)` - Database error during creation
pub async fn create_note_with_creator(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::advert::Model), DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    let advert = crate::factory::advert::create_note(db, user.id).await?;

    Ok((user, advert))
}

/// Creates a note advert with ratings of the given values, each by a fresh reviewer.
///
/// The stored `average_rating` is set to the mean of `values` so the advert is consistent
/// with its ratings, mirroring what the review service would have written.
///
/// # Arguments
/// - `db` - Database connection
/// - `values` - Rating values to attach, in insertion order
///
/// # Returns
/// - `Ok((creator, advert, ratings))` - The creator, the advert, and its ratings
/// - `Err(DbErr)` - Database error during creation
pub async fn create_rated_note(
    db: &DatabaseConnection,
    values: &[i32],
) -> Result<
    (
        entity::user::Model,
        entity::advert::Model,
        Vec<entity::rating::Model>,
    ),
    DbErr,
> {
    let creator = crate::factory::user::create_user(db).await?;

    let average = if values.is_empty() {
        None
    } else {
        Some(values.iter().map(|v| *v as f64).sum::<f64>() / values.len() as f64)
    };

    let advert = crate::factory::advert::AdvertFactory::new(db, creator.id)
        .category("note")
        .average_rating(average)
        .build()
        .await?;

    let mut ratings = Vec::with_capacity(values.len());
    for value in values {
        let reviewer = crate::factory::user::create_user(db).await?;
        let rating = crate::factory::rating::create_rating(db, advert.id, reviewer.id, *value).await?;
        ratings.push(rating);
    }

    Ok((creator, advert, ratings))
}
