//! Advert catalogue and lifecycle.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{advert::AdvertRepository, rating::RatingRepository, user::UserRepository},
    error::{validation::FieldErrors, AppError},
    middleware::auth::{ensure_can_mutate_advert, AdvertAction},
    model::{
        advert::{
            Advert, AdvertCategory, AdvertChanges, AdvertDetail, AdvertListParam, AdvertSortKey,
            CreateAdvertParam, Homepage, SortDirection,
        },
        user::User,
    },
    service::media::{ImageFolder, MediaStore},
    util::upload::UploadedImage,
};

/// Number of adverts in each homepage section.
pub const HOMEPAGE_SECTION_SIZE: u64 = 4;

pub struct AdvertService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaStore,
}

impl<'a> AdvertService<'a> {
    pub fn new(db: &'a DatabaseConnection, media: &'a MediaStore) -> Self {
        Self { db, media }
    }

    /// Lists adverts with arbitrary filters and ordering.
    pub async fn list(&self, param: AdvertListParam) -> Result<Vec<Advert>, AppError> {
        let rows = AdvertRepository::new(self.db).find_many(param).await?;

        Advert::from_entities(rows)
    }

    /// Lists every advert of one category, most expensive first.
    pub async fn list_by_category(&self, category: AdvertCategory) -> Result<Vec<Advert>, AppError> {
        self.list(AdvertListParam {
            category: Some(category),
            sort: vec![(AdvertSortKey::Price, SortDirection::Desc)],
            ..Default::default()
        })
        .await
    }

    /// Builds the three homepage sections.
    ///
    /// Top rated notes are ordered by average descending with unrated notes last; the
    /// other sections are newest first.
    pub async fn homepage(&self) -> Result<Homepage, AppError> {
        let top_rated_notes = self
            .list(AdvertListParam {
                category: Some(AdvertCategory::Note),
                sort: vec![(AdvertSortKey::AverageRating, SortDirection::Desc)],
                limit: Some(HOMEPAGE_SECTION_SIZE),
                ..Default::default()
            })
            .await?;

        let newest = |category| AdvertListParam {
            category: Some(category),
            sort: vec![(AdvertSortKey::CreatedAt, SortDirection::Desc)],
            limit: Some(HOMEPAGE_SECTION_SIZE),
            ..Default::default()
        };

        let newest_books = self.list(newest(AdvertCategory::Book)).await?;
        let newest_notes = self.list(newest(AdvertCategory::Note)).await?;

        Ok(Homepage {
            top_rated_notes,
            newest_books,
            newest_notes,
        })
    }

    /// Finds adverts whose module code equals `module_id` exactly.
    pub async fn search_by_module(&self, module_id: &str) -> Result<Vec<Advert>, AppError> {
        self.list(AdvertListParam {
            module_id: Some(module_id.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Finds adverts of one category for one module code.
    pub async fn list_by_category_and_module(
        &self,
        category: AdvertCategory,
        module_id: &str,
    ) -> Result<Vec<Advert>, AppError> {
        self.list(AdvertListParam {
            category: Some(category),
            module_id: Some(module_id.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Loads one advert with the usernames of its creator and review authors.
    ///
    /// # Returns
    /// - `Ok(AdvertDetail)` - The advert and resolved usernames
    /// - `Err(AppError::NotFound)` - No advert with that id
    pub async fn get_detail(&self, id: i32) -> Result<AdvertDetail, AppError> {
        let advert = self.get(id).await?;

        let mut user_ids: Vec<i32> = advert.ratings.iter().map(|r| r.author_id).collect();
        user_ids.push(advert.creator_id);
        user_ids.sort_unstable();
        user_ids.dedup();

        let usernames = UserRepository::new(self.db).get_usernames(&user_ids).await?;

        Ok(AdvertDetail {
            creator_username: usernames.get(&advert.creator_id).cloned(),
            advert,
            usernames,
        })
    }

    /// Creates an advert owned by the creator named in `param`, storing its image first.
    ///
    /// When the insert fails after the image was written, the image is scheduled for
    /// deletion so no orphan is left behind.
    pub async fn create(
        &self,
        mut param: CreateAdvertParam,
        image: Option<UploadedImage>,
    ) -> Result<Advert, AppError> {
        if let Some(image) = image {
            param.image_url = Some(self.media.save(ImageFolder::Adverts, image).await?);
        }
        let image_url = param.image_url.clone();

        let created = match AdvertRepository::new(self.db).create(param).await {
            Ok(created) => created,
            Err(e) => {
                self.media.cascade_delete_image(image_url.as_deref());
                return Err(e.into());
            }
        };

        tracing::info!("User {} created advert {}", created.creator_id, created.id);

        Advert::from_entity(created, Vec::new())
    }

    /// Updates an advert on behalf of its owner.
    ///
    /// A reviewed note cannot become a book. A newly uploaded image replaces the stored
    /// one, and the previous file is deleted in the background.
    ///
    /// # Arguments
    /// - `actor` - Authenticated user performing the update
    /// - `id` - Advert to update
    /// - `changes` - Parsed form fields
    /// - `image` - Newly uploaded image, if any
    ///
    /// # Returns
    /// - `Ok(Advert)` - The updated advert
    /// - `Err(AppError::NotFound)` - No advert with that id
    /// - `Err(AuthError::InvalidPermissions)` - The actor is not the owner
    /// - `Err(AppError::Validation)` - Category change would orphan reviews
    pub async fn update(
        &self,
        actor: &User,
        id: i32,
        changes: AdvertChanges,
        image: Option<UploadedImage>,
    ) -> Result<Advert, AppError> {
        let advert = self.get(id).await?;

        ensure_can_mutate_advert(actor, &advert, AdvertAction::Update)?;

        if changes.category == Some(AdvertCategory::Book) && !advert.ratings.is_empty() {
            return Err(FieldErrors::single(
                "type",
                "A note with reviews cannot be changed to a book",
            )
            .into());
        }

        let new_image = match image {
            Some(image) => Some(self.media.save(ImageFolder::Adverts, image).await?),
            None => None,
        };
        let replaced = new_image.is_some();

        let repo = AdvertRepository::new(self.db);
        if let Err(e) = repo.update(id, changes, new_image.clone()).await {
            self.media.cascade_delete_image(new_image.as_deref());
            return Err(e.into());
        }

        self.media
            .replace_image(advert.image_url.as_deref(), replaced);

        self.get(id).await
    }

    /// Deletes an advert with its reviews and schedules deletion of its image.
    ///
    /// # Returns
    /// - `Ok(())` - The advert is gone
    /// - `Err(AppError::NotFound)` - No advert with that id
    /// - `Err(AuthError::InvalidPermissions)` - The actor is neither owner nor admin
    pub async fn delete(&self, actor: &User, id: i32) -> Result<(), AppError> {
        let advert = self.get(id).await?;

        ensure_can_mutate_advert(actor, &advert, AdvertAction::Delete)?;

        let txn = self.db.begin().await?;

        RatingRepository::new(&txn)
            .delete_by_advert_ids(&[advert.id])
            .await?;
        AdvertRepository::new(&txn).delete(advert.id).await?;

        txn.commit().await?;

        self.media.cascade_delete_image(advert.image_url.as_deref());

        tracing::info!("User {} deleted advert {}", actor.id, advert.id);

        Ok(())
    }

    async fn get(&self, id: i32) -> Result<Advert, AppError> {
        let (advert, ratings) = AdvertRepository::new(self.db)
            .find_with_ratings(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Advert not found".to_string()))?;

        Advert::from_entity(advert, ratings)
    }
}
