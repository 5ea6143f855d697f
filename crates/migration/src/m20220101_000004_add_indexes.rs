use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Enrollments: lookups by student (details, withdraw, delete cleanup)
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_student")
                    .table(Enrollments::Table)
                    .col(Enrollments::EstudentId)
                    .to_owned(),
            )
            .await?;

        // Enrollments: lookups by course (course details, delete cleanup)
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_course")
                    .table(Enrollments::Table)
                    .col(Enrollments::EcourseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_enrollments_student").table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_enrollments_course").table(Enrollments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Enrollments { Table, EstudentId, EcourseId }
