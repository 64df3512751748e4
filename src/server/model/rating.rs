//! Review domain models and parameters.

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{model::advert::RatingDto, server::error::validation::FieldErrors};

/// A single review attached to a note advert.
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub id: i32,
    pub advert_id: i32,
    pub author_id: i32,
    pub body: String,
    /// Integer score in `1..=5`.
    pub value: i32,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn from_entity(entity: entity::rating::Model) -> Self {
        Self {
            id: entity.id,
            advert_id: entity.advert_id,
            author_id: entity.author_id,
            body: entity.body,
            value: entity.value,
            created_at: entity.created_at,
        }
    }

    /// Converts to a DTO, optionally carrying the author's username.
    pub fn into_dto(self, author_username: Option<String>) -> RatingDto {
        RatingDto {
            id: self.id,
            author: self.author_id,
            author_username,
            body: self.body,
            value: self.value,
            date_time: self.created_at,
        }
    }
}

/// Review text and score as supplied by a client, checked before any write.
///
/// `None` fields are not validated, which lets partial edits reuse the same rules.
#[derive(Debug, Clone, Default, Validate)]
pub struct ReviewInput {
    #[validate(length(min = 1, message = "Review text is required"))]
    pub body: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub value: Option<i32>,
}

impl ReviewInput {
    /// Trims the body so whitespace-only text counts as empty.
    pub fn new(body: Option<&str>, value: Option<i32>) -> Self {
        Self {
            body: body.map(|b| b.trim().to_string()),
            value,
        }
    }

    /// Reads a new review from a request body where both fields are required.
    ///
    /// # Returns
    /// - `Ok((String, i32))` - Body and whole-number score, not yet range checked
    /// - `Err(FieldErrors)` - A field is missing or the score has a fraction
    pub fn required(
        body: Option<String>,
        value: Option<f64>,
    ) -> Result<(String, i32), FieldErrors> {
        let mut errors = FieldErrors::new();

        if body.is_none() {
            errors.push("body", "Review text is required");
        }
        let value = match value {
            Some(value) => whole_score(value, &mut errors),
            None => {
                errors.push("value", "Rating is required");
                None
            }
        };

        match (body, value) {
            (Some(body), Some(value)) => Ok((body, value)),
            _ => Err(errors),
        }
    }

    /// Reads a partial review edit from a request body.
    pub fn partial(body: Option<String>, value: Option<f64>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let value = value.and_then(|v| whole_score(v, &mut errors));
        errors.into_result()?;

        Ok(Self { body, value })
    }
}

fn whole_score(value: f64, errors: &mut FieldErrors) -> Option<i32> {
    if value.fract() == 0.0 && value >= i32::MIN as f64 && value <= i32::MAX as f64 {
        Some(value as i32)
    } else {
        errors.push("value", "Rating must be a whole number between 1 and 5");
        None
    }
}

#[derive(Debug, Clone)]
pub struct AddRatingParam {
    pub advert_id: i32,
    pub author_id: i32,
    pub body: String,
    pub value: i32,
}

/// Partial edit of a review. Only `Some` fields are replaced.
#[derive(Debug, Clone)]
pub struct EditRatingParam {
    pub rating_id: i32,
    pub editor_id: i32,
    pub body: Option<String>,
    pub value: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct RemoveRatingParam {
    pub rating_id: i32,
    pub actor_id: i32,
}
