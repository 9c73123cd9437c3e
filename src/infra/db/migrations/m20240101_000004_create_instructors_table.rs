//! Migration: Create the derived instructor roster.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Instructors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Instructors::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Instructors::InstructorId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Instructors::Name).string().not_null())
                    .col(ColumnDef::new(Instructors::Email).string().not_null())
                    .col(ColumnDef::new(Instructors::Role).string().not_null())
                    .col(ColumnDef::new(Instructors::Image).string().null())
                    .col(
                        ColumnDef::new(Instructors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Instructors::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Instructors {
    Table,
    Id,
    InstructorId,
    Name,
    Email,
    Role,
    Image,
    CreatedAt,
}
