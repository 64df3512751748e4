//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories are generic over SeaORM's `ConnectionTrait` so the
//! same code runs against the connection pool or inside a transaction.

use sea_orm::{DbErr, SqlErr};

pub mod advert;
pub mod rating;
pub mod user;

/// Whether a write failed on a unique index, such as a second account with the same email.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
