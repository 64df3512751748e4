//! Request extraction helpers shared by controllers.

pub mod extract;
pub mod upload;
