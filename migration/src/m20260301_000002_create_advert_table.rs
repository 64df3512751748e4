use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advert::Table)
                    .if_not_exists()
                    .col(pk_auto(Advert::Id))
                    .col(integer(Advert::CreatorId))
                    .col(string(Advert::Category))
                    .col(string(Advert::ModuleId))
                    .col(string(Advert::Title))
                    .col(text(Advert::Description))
                    .col(double(Advert::Price))
                    .col(string_null(Advert::ImageUrl))
                    .col(double_null(Advert::AverageRating))
                    .col(
                        timestamp_with_time_zone(Advert::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Advert::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_advert_creator_id")
                            .from(Advert::Table, Advert::CreatorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_advert_module_id")
                    .table(Advert::Table)
                    .col(Advert::ModuleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Advert::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Advert {
    Table,
    Id,
    CreatorId,
    Category,
    ModuleId,
    Title,
    Description,
    Price,
    ImageUrl,
    AverageRating,
    CreatedAt,
    UpdatedAt,
}
