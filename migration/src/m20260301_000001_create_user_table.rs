use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::Username))
                    .col(string(User::FirstName).default(""))
                    .col(string(User::LastName).default(""))
                    .col(string_uniq(User::Email))
                    .col(string_null(User::ImageUrl))
                    .col(string(User::Password))
                    .col(string_null(User::Campus))
                    .col(string_null(User::Major))
                    .col(integer(User::SuccessTrades).default(0))
                    .col(double(User::ProfileRating).default(0.0))
                    .col(boolean(User::IsAdmin).default(false))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Username,
    FirstName,
    LastName,
    Email,
    ImageUrl,
    Password,
    Campus,
    Major,
    SuccessTrades,
    ProfileRating,
    IsAdmin,
    CreatedAt,
    UpdatedAt,
}
