use crate::server::{
    data::advert::AdvertRepository,
    model::advert::{
        AdvertCategory, AdvertChanges, AdvertListParam, AdvertSortKey, CreateAdvertParam,
        SortDirection,
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete_by_creator;
mod find_many;
mod find_with_ratings;
