//! Migration: Create carts table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Carts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Carts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Carts::Email).string().not_null())
                    .col(ColumnDef::new(Carts::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Carts::Title).string().not_null())
                    .col(ColumnDef::new(Carts::Price).double().not_null())
                    .col(ColumnDef::new(Carts::Image).string().null())
                    .col(
                        ColumnDef::new(Carts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_carts_email")
                    .table(Carts::Table)
                    .col(Carts::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Carts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Carts {
    Table,
    Id,
    Email,
    CourseId,
    Title,
    Price,
    Image,
    CreatedAt,
}
