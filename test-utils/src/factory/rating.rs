//! Rating factory for creating test rating entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test ratings with customizable fields.
///
/// The factory writes the rating row only. It does not touch the parent advert's
/// `average_rating`.
pub struct RatingFactory<'a> {
    db: &'a DatabaseConnection,
    advert_id: i32,
    author_id: i32,
    body: String,
    value: i32,
}

impl<'a> RatingFactory<'a> {
    /// Creates a new RatingFactory with body `"Review {id}"` and value `5`.
    pub fn new(db: &'a DatabaseConnection, advert_id: i32, author_id: i32) -> Self {
        Self {
            db,
            advert_id,
            author_id,
            body: format!("Review {}", next_id()),
            value: 5,
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    /// Builds and inserts the rating entity into the database.
    pub async fn build(self) -> Result<entity::rating::Model, DbErr> {
        entity::rating::ActiveModel {
            advert_id: ActiveValue::Set(self.advert_id),
            author_id: ActiveValue::Set(self.author_id),
            body: ActiveValue::Set(self.body),
            value: ActiveValue::Set(self.value),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a rating of `value` on `advert_id` by `author_id`.
pub async fn create_rating(
    db: &DatabaseConnection,
    advert_id: i32,
    author_id: i32,
    value: i32,
) -> Result<entity::rating::Model, DbErr> {
    RatingFactory::new(db, advert_id, author_id)
        .value(value)
        .build()
        .await
}
