//! Advert factory for creating test advert entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test adverts with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::advert::AdvertFactory;
///
/// let advert = AdvertFactory::new(&db, user.id)
///     .category("book")
///     .module_id("CS101")
///     .price(20.0)
///     .build()
///     .await?;
/// ```
pub struct AdvertFactory<'a> {
    db: &'a DatabaseConnection,
    creator_id: i32,
    category: String,
    module_id: String,
    title: String,
    description: String,
    price: f64,
    image_url: Option<String>,
    average_rating: Option<f64>,
    created_at: DateTime<Utc>,
}

impl<'a> AdvertFactory<'a> {
    /// Creates a new AdvertFactory with default values.
    ///
    /// Defaults:
    /// - category: `"note"`
    /// - module_id: `"MOD{id}"`
    /// - title: `"Advert {id}"`
    /// - description: `"Description {id}"`
    /// - price: `10.0`
    /// - image_url / average_rating: `None`
    /// - created_at: now
    pub fn new(db: &'a DatabaseConnection, creator_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            creator_id,
            category: "note".to_string(),
            module_id: format!("MOD{}", id),
            title: format!("Advert {}", id),
            description: format!("Description {}", id),
            price: 10.0,
            image_url: None,
            average_rating: None,
            created_at: Utc::now(),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn module_id(mut self, module_id: impl Into<String>) -> Self {
        self.module_id = module_id.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn average_rating(mut self, average_rating: Option<f64>) -> Self {
        self.average_rating = average_rating;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the advert entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::advert::Model)` - Created advert entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::advert::Model, DbErr> {
        entity::advert::ActiveModel {
            creator_id: ActiveValue::Set(self.creator_id),
            category: ActiveValue::Set(self.category),
            module_id: ActiveValue::Set(self.module_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            price: ActiveValue::Set(self.price),
            image_url: ActiveValue::Set(self.image_url),
            average_rating: ActiveValue::Set(self.average_rating),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a note advert owned by `creator_id`.
pub async fn create_note(
    db: &DatabaseConnection,
    creator_id: i32,
) -> Result<entity::advert::Model, DbErr> {
    AdvertFactory::new(db, creator_id).build().await
}

/// Creates a book advert owned by `creator_id`.
pub async fn create_book(
    db: &DatabaseConnection,
    creator_id: i32,
) -> Result<entity::advert::Model, DbErr> {
    AdvertFactory::new(db, creator_id).category("book").build().await
}
