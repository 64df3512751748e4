//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::create_user(&db).await?;
//! let advert = factory::create_note(&db, user.id).await?;
//! let rating = factory::create_rating(&db, advert.id, user.id, 5).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let admin = factory::user::UserFactory::new(&db)
//!     .email("admin@example.com")
//!     .admin(true)
//!     .build()
//!     .await?;
//!
//! let book = factory::advert::AdvertFactory::new(&db, admin.id)
//!     .category("book")
//!     .price(12.5)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `advert` - Create advert entities
//! - `rating` - Create rating entities
//! - `helpers` - ID generation and entities with dependencies

pub mod advert;
pub mod helpers;
pub mod rating;
pub mod user;

pub use advert::{create_book, create_note};
pub use rating::create_rating;
pub use user::{create_admin, create_user};
