//! Request and response DTOs shared by the HTTP layer.
//!
//! Every DTO serializes with camelCase field names.

pub mod advert;
pub mod api;
pub mod user;
