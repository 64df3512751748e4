use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingDto {
    pub id: i32,
    pub author: i32,
    /// Filled in on single-advert responses only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_username: Option<String>,
    pub body: String,
    pub value: i32,
    pub date_time: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsDto {
    /// Mean of all rating values, `null` when there are no ratings.
    pub average_rating: Option<f64>,
    pub ratings: Vec<RatingDto>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvertDto {
    pub id: i32,
    pub creator: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_username: Option<String>,
    /// `note` or `book`
    #[serde(rename = "type")]
    pub category: String,
    pub module_id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub reviews: ReviewsDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AdvertListDto {
    pub count: usize,
    pub adverts: Vec<AdvertDto>,
}

impl AdvertListDto {
    pub fn new(adverts: Vec<AdvertDto>) -> Self {
        Self {
            count: adverts.len(),
            adverts,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HomepageDto {
    pub top_rated_notes: Vec<AdvertDto>,
    pub newest_books: Vec<AdvertDto>,
    pub newest_notes: Vec<AdvertDto>,
}

/// Multipart (or JSON) body accepted when creating or updating an advert.
///
/// Documentation only; the handlers read the form through `UploadForm`.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdvertFormDto {
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub module_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    /// Image file (jpg, jpeg or png).
    #[schema(value_type = Option<String>, format = Binary)]
    pub image_url: Option<String>,
}

/// Both fields are required; missing ones are reported as field errors.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct CreateReviewDto {
    pub body: Option<String>,
    /// Whole number from 1 to 5.
    #[schema(value_type = i32)]
    pub value: Option<f64>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct UpdateReviewDto {
    pub body: Option<String>,
    /// Whole number from 1 to 5.
    #[schema(value_type = Option<i32>)]
    pub value: Option<f64>,
}

/// Contact request from a buyer to the seller of an advert.
#[derive(Serialize, Deserialize, ToSchema, Validate, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SendEmailDto {
    /// Seller address.
    #[validate(email(message = "Please include a valid recipient email"))]
    pub to: String,
    /// Buyer address, defaults to the sender's account email.
    #[validate(email(message = "Please include a valid sender email"))]
    pub from: Option<String>,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    /// Buyer name, defaults to the sender's username.
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirectionDto {
    Asc,
    Desc,
}

impl SortDirectionDto {
    /// Reads `asc` or `desc`; anything else means "do not sort".
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Query string of `GET /adverts/all`.
///
/// Values are kept as text so unknown sort directions are ignored instead of rejected.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AdvertListQuery {
    pub price: Option<String>,
    pub ratings: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
}
