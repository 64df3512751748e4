//! Rating data repository.
//!
//! Ratings are rows keyed by advert. Nothing here touches the advert's stored average;
//! callers recompute it after every write.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::model::rating::AddRatingParam;

pub struct RatingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RatingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a rating stamped with the current time.
    pub async fn create(&self, param: AddRatingParam) -> Result<entity::rating::Model, DbErr> {
        entity::rating::ActiveModel {
            advert_id: ActiveValue::Set(param.advert_id),
            author_id: ActiveValue::Set(param.author_id),
            body: ActiveValue::Set(param.body),
            value: ActiveValue::Set(param.value),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::rating::Model>, DbErr> {
        entity::prelude::Rating::find_by_id(id).one(self.db).await
    }

    /// Replaces the supplied fields of a rating.
    ///
    /// # Returns
    /// - `Ok(Model)` - The updated rating
    /// - `Err(DbErr::RecordNotUpdated)` - No rating with that id
    pub async fn update(
        &self,
        id: i32,
        body: Option<String>,
        value: Option<i32>,
    ) -> Result<entity::rating::Model, DbErr> {
        let mut model = entity::rating::ActiveModel {
            id: ActiveValue::Unchanged(id),
            ..Default::default()
        };

        if let Some(body) = body {
            model.body = ActiveValue::Set(body);
        }
        if let Some(value) = value {
            model.value = ActiveValue::Set(value);
        }

        if !model.is_changed() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| DbErr::RecordNotFound(format!("rating {}", id)));
        }

        model.update(self.db).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Rating::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets every rating value of an advert.
    pub async fn values_for_advert(&self, advert_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Rating::find()
            .select_only()
            .column(entity::rating::Column::Value)
            .filter(entity::rating::Column::AdvertId.eq(advert_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Deletes every rating attached to any of the given adverts.
    pub async fn delete_by_advert_ids(&self, advert_ids: &[i32]) -> Result<u64, DbErr> {
        if advert_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Rating::delete_many()
            .filter(entity::rating::Column::AdvertId.is_in(advert_ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes every rating written by a user.
    ///
    /// # Returns
    /// - `Ok(Vec<i32>)` - Distinct ids of the adverts that lost a rating, ascending
    pub async fn delete_by_author(&self, author_id: i32) -> Result<Vec<i32>, DbErr> {
        let advert_ids: Vec<i32> = entity::prelude::Rating::find()
            .select_only()
            .column(entity::rating::Column::AdvertId)
            .distinct()
            .filter(entity::rating::Column::AuthorId.eq(author_id))
            .order_by_asc(entity::rating::Column::AdvertId)
            .into_tuple::<i32>()
            .all(self.db)
            .await?;

        entity::prelude::Rating::delete_many()
            .filter(entity::rating::Column::AuthorId.eq(author_id))
            .exec(self.db)
            .await?;

        Ok(advert_ids)
    }
}
