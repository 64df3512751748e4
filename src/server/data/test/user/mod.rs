use crate::server::{
    data::{is_unique_violation, user::UserRepository},
    model::user::{CreateUserParam, UserChanges},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_usernames;
