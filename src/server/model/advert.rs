//! Advert domain models and parameters.
//!
//! An advert is either a `note` or a `book`. Only notes carry reviews; the stored
//! `average_rating` is the mean of the current review values, `None` without reviews.

use std::{collections::HashMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};

use crate::{
    model::advert::{AdvertDto, HomepageDto, ReviewsDto},
    server::{
        error::{internal::InternalError, validation::FieldErrors, AppError},
        model::rating::Rating,
        util::upload::UploadForm,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvertCategory {
    Note,
    Book,
}

impl AdvertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Book => "book",
        }
    }
}

impl fmt::Display for AdvertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdvertCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(Self::Note),
            "book" => Ok(Self::Book),
            _ => Err(()),
        }
    }
}

/// Advert with its reviews in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Advert {
    pub id: i32,
    pub creator_id: i32,
    pub category: AdvertCategory,
    pub module_id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub average_rating: Option<f64>,
    pub ratings: Vec<Rating>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Advert {
    /// Converts an entity model and its ratings to an advert domain model.
    ///
    /// # Arguments
    /// - `entity` - The advert row
    /// - `ratings` - Rating rows belonging to the advert
    ///
    /// # Returns
    /// - `Ok(Advert)` - The converted advert
    /// - `Err(AppError::InternalErr(InvalidStoredCategory))` - Stored category is neither
    ///   `note` nor `book`
    pub fn from_entity(
        entity: entity::advert::Model,
        ratings: Vec<entity::rating::Model>,
    ) -> Result<Self, AppError> {
        let category = entity
            .category
            .parse()
            .map_err(|_| InternalError::InvalidStoredCategory {
                advert_id: entity.id,
                value: entity.category.clone(),
            })?;

        Ok(Self {
            id: entity.id,
            creator_id: entity.creator_id,
            category,
            module_id: entity.module_id,
            title: entity.title,
            description: entity.description,
            price: entity.price,
            image_url: entity.image_url,
            average_rating: entity.average_rating,
            ratings: ratings.into_iter().map(Rating::from_entity).collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Converts a batch of `(advert, ratings)` rows, failing on the first corrupt row.
    pub fn from_entities(
        rows: Vec<(entity::advert::Model, Vec<entity::rating::Model>)>,
    ) -> Result<Vec<Self>, AppError> {
        rows.into_iter()
            .map(|(advert, ratings)| Self::from_entity(advert, ratings))
            .collect()
    }

    pub fn into_dto(self) -> AdvertDto {
        self.into_dto_with_usernames(None, &HashMap::new())
    }

    fn into_dto_with_usernames(
        self,
        creator_username: Option<String>,
        usernames: &HashMap<i32, String>,
    ) -> AdvertDto {
        AdvertDto {
            id: self.id,
            creator: self.creator_id,
            creator_username,
            category: self.category.as_str().to_string(),
            module_id: self.module_id,
            title: self.title,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            reviews: ReviewsDto {
                average_rating: self.average_rating,
                ratings: self
                    .ratings
                    .into_iter()
                    .map(|r| {
                        let username = usernames.get(&r.author_id).cloned();
                        r.into_dto(username)
                    })
                    .collect(),
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Single advert with the usernames of its creator and review authors resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvertDetail {
    pub advert: Advert,
    pub creator_username: Option<String>,
    /// Usernames keyed by user id, for every review author still present.
    pub usernames: HashMap<i32, String>,
}

impl AdvertDetail {
    pub fn into_dto(self) -> AdvertDto {
        self.advert
            .into_dto_with_usernames(self.creator_username, &self.usernames)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Homepage {
    pub top_rated_notes: Vec<Advert>,
    pub newest_books: Vec<Advert>,
    pub newest_notes: Vec<Advert>,
}

impl Homepage {
    pub fn into_dto(self) -> HomepageDto {
        HomepageDto {
            top_rated_notes: self.top_rated_notes.into_iter().map(Advert::into_dto).collect(),
            newest_books: self.newest_books.into_iter().map(Advert::into_dto).collect(),
            newest_notes: self.newest_notes.into_iter().map(Advert::into_dto).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvertSortKey {
    Price,
    /// Unrated adverts always sort last.
    AverageRating,
    CreatedAt,
}

/// Filter, ordering and limit for advert listings.
///
/// Sort keys apply in order; ties fall back to ascending id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvertListParam {
    pub category: Option<AdvertCategory>,
    pub module_id: Option<String>,
    pub creator_id: Option<i32>,
    pub sort: Vec<(AdvertSortKey, SortDirection)>,
    pub limit: Option<u64>,
}

/// Advert fields supplied by a create or update form.
///
/// Absent or blank form values are `None`; present values have already been parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvertChanges {
    pub category: Option<AdvertCategory>,
    pub module_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl AdvertChanges {
    /// Reads and parses the advert fields of a form.
    ///
    /// # Returns
    /// - `Ok(AdvertChanges)` - Every present field parsed
    /// - `Err(FieldErrors)` - Unknown type, or a price that is not a non-negative number
    pub fn from_form(form: &UploadForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let category = match form.text("type") {
            Some(value) => match value.parse() {
                Ok(category) => Some(category),
                Err(()) => {
                    errors.push("type", "Type must be either note or book");
                    None
                }
            },
            None => None,
        };

        let price = match form.text("price") {
            Some(value) => match value.parse::<f64>() {
                Ok(price) if price.is_finite() && price >= 0.0 => Some(price),
                _ => {
                    errors.push("price", "Price must be a non-negative number");
                    None
                }
            },
            None => None,
        };

        errors.into_result()?;

        Ok(Self {
            category,
            module_id: form.text("moduleId").map(str::to_string),
            title: form.text("title").map(str::to_string),
            description: form.text("description").map(str::to_string),
            price,
        })
    }
}

/// Parameters for inserting a new advert.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAdvertParam {
    pub creator_id: i32,
    pub category: AdvertCategory,
    pub module_id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
}

impl CreateAdvertParam {
    /// Builds create parameters from a parsed form, requiring every field.
    ///
    /// The image is stored separately, so `image_url` starts as `None`.
    pub fn from_changes(creator_id: i32, changes: AdvertChanges) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let category = require(changes.category, "type", "Type is required", &mut errors);
        let module_id = require(changes.module_id, "moduleId", "Module code is required", &mut errors);
        let title = require(changes.title, "title", "Title is required", &mut errors);
        let description = require(
            changes.description,
            "description",
            "Description is required",
            &mut errors,
        );
        let price = require(changes.price, "price", "Price is required", &mut errors);

        match (category, module_id, title, description, price) {
            (Some(category), Some(module_id), Some(title), Some(description), Some(price)) => {
                Ok(Self {
                    creator_id,
                    category,
                    module_id,
                    title,
                    description,
                    price,
                    image_url: None,
                })
            }
            _ => Err(errors),
        }
    }
}

fn require<T>(value: Option<T>, field: &str, msg: &str, errors: &mut FieldErrors) -> Option<T> {
    if value.is_none() {
        errors.push(field, msg);
    }
    value
}
