pub use super::advert::Entity as Advert;
pub use super::rating::Entity as Rating;
pub use super::user::Entity as User;
