//! Advert data repository.
//!
//! Adverts are returned as entity rows, paired with their rating rows where the caller
//! needs reviews. Conversion to domain models happens in the service layer because it can
//! fail on corrupt stored categories.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::NullOrdering, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::advert::{
    AdvertChanges, AdvertListParam, AdvertSortKey, CreateAdvertParam, SortDirection,
};

pub type AdvertWithRatings = (entity::advert::Model, Vec<entity::rating::Model>);

pub struct AdvertRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AdvertRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new advert without ratings.
    ///
    /// # Arguments
    /// - `param` - Creator, category, module code, title, description, price and image
    ///
    /// # Returns
    /// - `Ok(Model)` - The created advert row
    /// - `Err(DbErr)` - Database error, e.g. the creator does not exist
    pub async fn create(&self, param: CreateAdvertParam) -> Result<entity::advert::Model, DbErr> {
        let now = Utc::now();

        entity::advert::ActiveModel {
            creator_id: ActiveValue::Set(param.creator_id),
            category: ActiveValue::Set(param.category.as_str().to_string()),
            module_id: ActiveValue::Set(param.module_id),
            title: ActiveValue::Set(param.title),
            description: ActiveValue::Set(param.description),
            price: ActiveValue::Set(param.price),
            image_url: ActiveValue::Set(param.image_url),
            average_rating: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Finds an advert row without its ratings.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::advert::Model>, DbErr> {
        entity::prelude::Advert::find_by_id(id).one(self.db).await
    }

    /// Finds an advert together with its ratings in insertion order.
    pub async fn find_with_ratings(&self, id: i32) -> Result<Option<AdvertWithRatings>, DbErr> {
        let Some(advert) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let ratings = entity::prelude::Rating::find()
            .filter(entity::rating::Column::AdvertId.eq(id))
            .order_by_asc(entity::rating::Column::Id)
            .all(self.db)
            .await?;

        Ok(Some((advert, ratings)))
    }

    /// Lists adverts matching the filters, in the requested order, with their ratings.
    ///
    /// Ratings for the whole page are fetched with one extra query and grouped in memory.
    ///
    /// # Arguments
    /// - `param` - Category, module code and creator filters, sort keys and limit
    ///
    /// # Returns
    /// - `Ok(Vec<(Model, Vec<rating::Model>)>)` - Matching adverts with their ratings
    /// - `Err(DbErr)` - Database error during either query
    pub async fn find_many(&self, param: AdvertListParam) -> Result<Vec<AdvertWithRatings>, DbErr> {
        let mut query = entity::prelude::Advert::find();

        if let Some(category) = param.category {
            query = query.filter(entity::advert::Column::Category.eq(category.as_str()));
        }
        if let Some(module_id) = param.module_id {
            query = query.filter(entity::advert::Column::ModuleId.eq(module_id));
        }
        if let Some(creator_id) = param.creator_id {
            query = query.filter(entity::advert::Column::CreatorId.eq(creator_id));
        }

        for (key, direction) in param.sort {
            let order = match direction {
                SortDirection::Asc => Order::Asc,
                SortDirection::Desc => Order::Desc,
            };
            query = match key {
                AdvertSortKey::Price => query.order_by(entity::advert::Column::Price, order),
                AdvertSortKey::CreatedAt => {
                    query.order_by(entity::advert::Column::CreatedAt, order)
                }
                AdvertSortKey::AverageRating => query.order_by_with_nulls(
                    entity::advert::Column::AverageRating,
                    order,
                    NullOrdering::Last,
                ),
            };
        }
        query = query.order_by_asc(entity::advert::Column::Id);

        if let Some(limit) = param.limit {
            query = query.limit(limit);
        }

        let adverts = query.all(self.db).await?;
        if adverts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = adverts.iter().map(|a| a.id).collect();
        let mut ratings_by_advert: HashMap<i32, Vec<entity::rating::Model>> = HashMap::new();
        for rating in entity::prelude::Rating::find()
            .filter(entity::rating::Column::AdvertId.is_in(ids))
            .order_by_asc(entity::rating::Column::Id)
            .all(self.db)
            .await?
        {
            ratings_by_advert
                .entry(rating.advert_id)
                .or_default()
                .push(rating);
        }

        Ok(adverts
            .into_iter()
            .map(|advert| {
                let ratings = ratings_by_advert.remove(&advert.id).unwrap_or_default();
                (advert, ratings)
            })
            .collect())
    }

    /// Gets the advert rows created by a user, without ratings.
    pub async fn find_by_creator(&self, creator_id: i32) -> Result<Vec<entity::advert::Model>, DbErr> {
        entity::prelude::Advert::find()
            .filter(entity::advert::Column::CreatorId.eq(creator_id))
            .order_by_asc(entity::advert::Column::Id)
            .all(self.db)
            .await
    }

    /// Writes the supplied advert fields and refreshes `updated_at`.
    ///
    /// # Arguments
    /// - `id` - Advert to update
    /// - `changes` - Fields to replace; `None` fields are left untouched
    /// - `image_url` - New image reference, `None` keeps the current one
    ///
    /// # Returns
    /// - `Ok(Model)` - The updated advert row
    /// - `Err(DbErr::RecordNotUpdated)` - No advert with that id
    pub async fn update(
        &self,
        id: i32,
        changes: AdvertChanges,
        image_url: Option<String>,
    ) -> Result<entity::advert::Model, DbErr> {
        let mut model = entity::advert::ActiveModel {
            id: ActiveValue::Unchanged(id),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };

        if let Some(category) = changes.category {
            model.category = ActiveValue::Set(category.as_str().to_string());
        }
        if let Some(module_id) = changes.module_id {
            model.module_id = ActiveValue::Set(module_id);
        }
        if let Some(title) = changes.title {
            model.title = ActiveValue::Set(title);
        }
        if let Some(description) = changes.description {
            model.description = ActiveValue::Set(description);
        }
        if let Some(price) = changes.price {
            model.price = ActiveValue::Set(price);
        }
        if let Some(image_url) = image_url {
            model.image_url = ActiveValue::Set(Some(image_url));
        }

        model.update(self.db).await
    }

    /// Stores a recomputed average, `None` when the advert has no ratings.
    pub async fn set_average_rating(&self, id: i32, average: Option<f64>) -> Result<(), DbErr> {
        entity::advert::ActiveModel {
            id: ActiveValue::Unchanged(id),
            average_rating: ActiveValue::Set(average),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Advert::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes every advert created by a user.
    pub async fn delete_by_creator(&self, creator_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Advert::delete_many()
            .filter(entity::advert::Column::CreatorId.eq(creator_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
