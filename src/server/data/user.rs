//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! It handles user creation, updates, queries, and deletion with conversion between entity
//! models and domain models at the infrastructure boundary.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::user::{CreateUserParam, User, UserChanges, UserCredentials};

/// Repository providing database operations for user management.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new user with empty profile fields and zeroed counters.
    ///
    /// # Arguments
    /// - `param` - Username, email and password hash
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including a unique violation on email
    pub async fn create(&self, param: CreateUserParam) -> Result<User, DbErr> {
        let now = Utc::now();

        let entity = entity::user::ActiveModel {
            username: ActiveValue::Set(param.username),
            first_name: ActiveValue::Set(String::new()),
            last_name: ActiveValue::Set(String::new()),
            email: ActiveValue::Set(param.email),
            image_url: ActiveValue::Set(None),
            password: ActiveValue::Set(param.password_hash),
            campus: ActiveValue::Set(None),
            major: ActiveValue::Set(None),
            success_trades: ActiveValue::Set(0),
            profile_rating: ActiveValue::Set(0.0),
            is_admin: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by exact email address.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Loads the id, admin flag and password hash for a login attempt.
    pub async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.as_ref().map(UserCredentials::from_entity))
    }

    /// Gets every user ordered by id.
    pub async fn get_all(&self) -> Result<Vec<User>, DbErr> {
        let entities = entity::prelude::User::find()
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }

    /// Writes the supplied profile fields and refreshes `updated_at`.
    ///
    /// # Arguments
    /// - `id` - User to update
    /// - `changes` - Fields to replace; `None` fields are left untouched
    /// - `image_url` - New image reference, `None` keeps the current one
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(DbErr::RecordNotUpdated)` - No user with that id
    pub async fn update(
        &self,
        id: i32,
        changes: UserChanges,
        image_url: Option<String>,
    ) -> Result<User, DbErr> {
        let mut model = entity::user::ActiveModel {
            id: ActiveValue::Unchanged(id),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };

        if let Some(username) = changes.username {
            model.username = ActiveValue::Set(username);
        }
        if let Some(first_name) = changes.first_name {
            model.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            model.last_name = ActiveValue::Set(last_name);
        }
        if let Some(email) = changes.email {
            model.email = ActiveValue::Set(email);
        }
        if let Some(campus) = changes.campus {
            model.campus = ActiveValue::Set(Some(campus));
        }
        if let Some(major) = changes.major {
            model.major = ActiveValue::Set(Some(major));
        }
        if let Some(image_url) = image_url {
            model.image_url = ActiveValue::Set(Some(image_url));
        }

        let entity = model.update(self.db).await?;

        Ok(User::from_entity(entity))
    }

    /// Deletes a user row.
    ///
    /// # Returns
    /// - `Ok(true)` - The user was deleted
    /// - `Ok(false)` - No user with that id
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Resolves usernames for a set of user ids. Unknown ids are absent from the map.
    pub async fn get_usernames(&self, ids: &[i32]) -> Result<HashMap<i32, String>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|u| (u.id, u.username)).collect())
    }
}
