//! User service for business logic.
//!
//! This module provides the `UserService` for managing user-related business logic.
//! It orchestrates profile queries, self-service profile updates and the admin-only
//! cascading delete while working with domain models rather than DTOs.

use std::collections::HashSet;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        advert::AdvertRepository, is_unique_violation, rating::RatingRepository,
        user::UserRepository,
    },
    error::{validation::FieldErrors, AppError},
    middleware::auth::ensure_can_mutate_user,
    model::{
        advert::{Advert, AdvertListParam},
        user::{User, UserChanges, UserWithAdverts},
    },
    service::{
        media::{ImageFolder, MediaStore},
        review::refresh_average_rating,
    },
    util::upload::UploadedImage,
};

const EMAIL_IN_USE: &str = "Email is already in use";

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaStore,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection, media: &'a MediaStore) -> Self {
        Self { db, media }
    }

    /// Gets all users.
    pub async fn get_all(&self) -> Result<Vec<User>, AppError> {
        Ok(UserRepository::new(self.db).get_all().await?)
    }

    /// Gets a user together with the adverts they created.
    ///
    /// # Returns
    /// - `Ok(Some(UserWithAdverts))` - User and adverts, oldest advert first
    /// - `Ok(None)` - No user with that id
    pub async fn get_with_adverts(&self, id: i32) -> Result<Option<UserWithAdverts>, AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_id(id).await? else {
            return Ok(None);
        };

        let rows = AdvertRepository::new(self.db)
            .find_many(AdvertListParam {
                creator_id: Some(id),
                ..Default::default()
            })
            .await?;

        Ok(Some(UserWithAdverts {
            user,
            adverts: Advert::from_entities(rows)?,
        }))
    }

    /// Updates the actor's own profile.
    ///
    /// # Arguments
    /// - `actor` - Authenticated user performing the update
    /// - `id` - User to update, must equal `actor.id`
    /// - `changes` - Parsed form fields
    /// - `image` - Newly uploaded profile image, if any
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(AuthError::InvalidPermissions)` - Updating someone else
    /// - `Err(AppError::NotFound)` - No user with that id
    /// - `Err(AppError::Validation)` - Email already used by another user
    pub async fn update(
        &self,
        actor: &User,
        id: i32,
        changes: UserChanges,
        image: Option<UploadedImage>,
    ) -> Result<User, AppError> {
        ensure_can_mutate_user(actor, id)?;

        let repo = UserRepository::new(self.db);

        let Some(current) = repo.find_by_id(id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        if let Some(email) = &changes.email {
            if let Some(owner) = repo.find_by_email(email).await? {
                if owner.id != id {
                    return Err(FieldErrors::single("email", EMAIL_IN_USE).into());
                }
            }
        }

        let new_image = match image {
            Some(image) => Some(self.media.save(ImageFolder::Profile, image).await?),
            None => None,
        };
        let replaced = new_image.is_some();

        let updated = match repo.update(id, changes, new_image.clone()).await {
            Ok(updated) => updated,
            Err(e) => {
                self.media.cascade_delete_image(new_image.as_deref());
                if is_unique_violation(&e) {
                    return Err(FieldErrors::single("email", EMAIL_IN_USE).into());
                }
                return Err(e.into());
            }
        };

        self.media
            .replace_image(current.image_url.as_deref(), replaced);

        Ok(updated)
    }

    /// Deletes a user and everything that depends on them.
    ///
    /// Removes the user's adverts with their reviews, the reviews the user wrote on other
    /// adverts, and the user row in one transaction, then recomputes the averages of the
    /// adverts that lost a review. Advert and profile images are deleted in the background.
    ///
    /// # Returns
    /// - `Ok(())` - The user is gone
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_id(id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        let txn = self.db.begin().await?;

        let adverts = AdvertRepository::new(&txn).find_by_creator(id).await?;
        let own_ids: Vec<i32> = adverts.iter().map(|a| a.id).collect();

        let rating_repo = RatingRepository::new(&txn);
        rating_repo.delete_by_advert_ids(&own_ids).await?;
        let reviewed = rating_repo.delete_by_author(id).await?;

        AdvertRepository::new(&txn).delete_by_creator(id).await?;
        UserRepository::new(&txn).delete(id).await?;

        let own: HashSet<i32> = own_ids.iter().copied().collect();
        for advert_id in reviewed.into_iter().filter(|a| !own.contains(a)) {
            refresh_average_rating(&txn, advert_id).await?;
        }

        txn.commit().await?;

        for advert in &adverts {
            self.media.cascade_delete_image(advert.image_url.as_deref());
        }
        self.media.cascade_delete_image(user.image_url.as_deref());

        tracing::info!("Deleted user {} with {} adverts", id, adverts.len());

        Ok(())
    }
}
