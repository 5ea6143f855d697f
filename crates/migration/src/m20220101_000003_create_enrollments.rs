//! Create `enrollments` join table with FKs to `student` and `course`.
//!
//! No ON DELETE CASCADE: parents are deleted only after the service layer
//! has removed their enrollment rows. No unique (student, course) pair either,
//! repeated selections produce repeated rows.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(pk_auto(Enrollments::EnrollmentId))
                    .col(integer(Enrollments::EstudentId))
                    .col(integer(Enrollments::EcourseId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_student")
                            .from(Enrollments::Table, Enrollments::EstudentId)
                            .to(Student::Table, Student::StudentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_course")
                            .from(Enrollments::Table, Enrollments::EcourseId)
                            .to(Course::Table, Course::CourseId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Enrollments::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Enrollments { Table, EnrollmentId, EstudentId, EcourseId }

#[derive(DeriveIden)]
enum Student { Table, StudentId }

#[derive(DeriveIden)]
enum Course { Table, CourseId }
