//! Review aggregation for note adverts.
//!
//! Every rating write recomputes the advert's `average_rating` from the full set of its
//! current ratings inside the same transaction as the write.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};
use validator::Validate;

use crate::server::{
    data::{advert::AdvertRepository, rating::RatingRepository},
    error::{auth::AuthError, AppError},
    model::{
        advert::{Advert, AdvertCategory},
        rating::{AddRatingParam, EditRatingParam, RemoveRatingParam, ReviewInput},
    },
};

/// Arithmetic mean of rating values, `None` for an empty set.
pub fn average_rating(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let sum: i64 = values.iter().map(|v| *v as i64).sum();
    Some(sum as f64 / values.len() as f64)
}

/// Recomputes and stores the average of an advert from its current ratings.
///
/// # Returns
/// - `Ok(Option<f64>)` - The stored average
/// - `Err(DbErr)` - Database error while reading ratings or writing the advert
pub async fn refresh_average_rating<C: ConnectionTrait>(
    db: &C,
    advert_id: i32,
) -> Result<Option<f64>, DbErr> {
    let values = RatingRepository::new(db).values_for_advert(advert_id).await?;
    let average = average_rating(&values);

    AdvertRepository::new(db)
        .set_average_rating(advert_id, average)
        .await?;

    Ok(average)
}

pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a review to a note advert.
    ///
    /// # Arguments
    /// - `param` - Advert, author, body and value of the review
    ///
    /// # Returns
    /// - `Ok(Advert)` - The advert with the new review and recomputed average
    /// - `Err(AppError::NotFound)` - The advert does not exist
    /// - `Err(AppError::InvalidCategory)` - The advert is not a note
    /// - `Err(AppError::Validation)` - Blank body or value outside `1..=5`
    pub async fn add_rating(&self, param: AddRatingParam) -> Result<Advert, AppError> {
        let Some(advert) = AdvertRepository::new(self.db)
            .find_by_id(param.advert_id)
            .await?
        else {
            return Err(AppError::NotFound("Advert not found".to_string()));
        };

        if advert.category != AdvertCategory::Note.as_str() {
            return Err(AppError::InvalidCategory);
        }

        let input = ReviewInput::new(Some(&param.body), Some(param.value));
        input.validate()?;

        let txn = self.db.begin().await?;

        RatingRepository::new(&txn)
            .create(AddRatingParam {
                body: input.body.unwrap_or_default(),
                ..param
            })
            .await?;
        let average = refresh_average_rating(&txn, advert.id).await?;

        txn.commit().await?;

        tracing::debug!("Advert {} average rating is now {:?}", advert.id, average);

        self.load_advert(advert.id).await
    }

    /// Edits the body and/or value of a review.
    ///
    /// # Returns
    /// - `Ok(Advert)` - The parent advert with the recomputed average
    /// - `Err(AppError::NotFound)` - The review does not exist
    /// - `Err(AuthError::InvalidPermissions)` - The editor did not write the review
    /// - `Err(AppError::Validation)` - A supplied field is invalid
    pub async fn edit_rating(&self, param: EditRatingParam) -> Result<Advert, AppError> {
        let Some(rating) = RatingRepository::new(self.db)
            .find_by_id(param.rating_id)
            .await?
        else {
            return Err(AppError::NotFound("Review not found".to_string()));
        };

        if rating.author_id != param.editor_id {
            return Err(AuthError::InvalidPermissions {
                user_id: param.editor_id,
                reason: format!("attempted to edit review {} written by another user", rating.id),
            }
            .into());
        }

        let input = ReviewInput::new(param.body.as_deref(), param.value);
        input.validate()?;

        let txn = self.db.begin().await?;

        RatingRepository::new(&txn)
            .update(rating.id, input.body, input.value)
            .await?;
        refresh_average_rating(&txn, rating.advert_id).await?;

        txn.commit().await?;

        self.load_advert(rating.advert_id).await
    }

    /// Removes a review.
    ///
    /// # Returns
    /// - `Ok(Advert)` - The parent advert, with no average when no reviews remain
    /// - `Err(AppError::NotFound)` - The review does not exist
    /// - `Err(AuthError::InvalidPermissions)` - The actor did not write the review
    pub async fn remove_rating(&self, param: RemoveRatingParam) -> Result<Advert, AppError> {
        let Some(rating) = RatingRepository::new(self.db)
            .find_by_id(param.rating_id)
            .await?
        else {
            return Err(AppError::NotFound("Review not found".to_string()));
        };

        if rating.author_id != param.actor_id {
            return Err(AuthError::InvalidPermissions {
                user_id: param.actor_id,
                reason: format!("attempted to remove review {} written by another user", rating.id),
            }
            .into());
        }

        let txn = self.db.begin().await?;

        RatingRepository::new(&txn).delete(rating.id).await?;
        refresh_average_rating(&txn, rating.advert_id).await?;

        txn.commit().await?;

        self.load_advert(rating.advert_id).await
    }

    async fn load_advert(&self, advert_id: i32) -> Result<Advert, AppError> {
        let (advert, ratings) = AdvertRepository::new(self.db)
            .find_with_ratings(advert_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Advert not found".to_string()))?;

        Advert::from_entity(advert, ratings)
    }
}
