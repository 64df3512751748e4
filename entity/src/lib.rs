//! SeaORM table models for the marketplace database.

pub mod prelude;

pub mod advert;
pub mod rating;
pub mod user;
