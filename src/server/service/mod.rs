//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Ownership rules, review aggregation and account checks
//! - **Orchestration**: Coordinating multiple repository calls and external services
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Running review mutations and cascading deletes atomically

pub mod advert;
pub mod auth;
pub mod mail;
pub mod media;
pub mod password;
pub mod review;
pub mod token;
pub mod user;

#[cfg(test)]
mod test;
