//! HTTP request handlers.
//!
//! Controllers authenticate the caller, convert DTOs into domain parameters, call a
//! service and convert the result back into a DTO.

pub mod advert;
pub mod auth;
pub mod notification;
pub mod review;
pub mod user;
