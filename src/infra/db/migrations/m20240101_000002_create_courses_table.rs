//! Migration: Create courses table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Image).string().null())
                    .col(ColumnDef::new(Courses::InstructorName).string().not_null())
                    .col(ColumnDef::new(Courses::InstructorEmail).string().not_null())
                    .col(ColumnDef::new(Courses::Price).double().not_null())
                    .col(
                        ColumnDef::new(Courses::AvailableSeats)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Courses::EnrolledStudents)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Courses::Status).string().not_null())
                    .col(ColumnDef::new(Courses::Feedback).text().null())
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Backs the popularity ordering of the course listing
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_enrolled_students")
                    .table(Courses::Table)
                    .col(Courses::EnrolledStudents)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Title,
    Image,
    InstructorName,
    InstructorEmail,
    Price,
    AvailableSeats,
    EnrolledStudents,
    Status,
    Feedback,
    CreatedAt,
}
