//! Join queries over `enrollments` and the enrollment write operations that
//! touch only the join table.

use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait};
use tracing::{info, instrument};

use models::{course, enrollment, student};
use crate::errors::ServiceError;

/// Courses of a student through the join table, one entry per enrollment row
/// in enrollment order. A course enrolled twice is listed twice.
pub async fn courses_for_student<C: ConnectionTrait>(db: &C, student_id: i32) -> Result<Vec<course::Model>, ServiceError> {
    if student::Entity::find_by_id(student_id).one(db).await?.is_none() {
        return Err(ServiceError::not_found("student", student_id));
    }
    let courses = course::Entity::find()
        .join(JoinType::InnerJoin, course::Relation::Enrollment.def())
        .filter(enrollment::Column::EstudentId.eq(student_id))
        .order_by_asc(enrollment::Column::EnrollmentId)
        .all(db)
        .await?;
    Ok(courses)
}

/// Distinct students holding at least one enrollment in the course.
pub async fn students_for_course<C: ConnectionTrait>(db: &C, course_id: i32) -> Result<Vec<student::Model>, ServiceError> {
    if course::Entity::find_by_id(course_id).one(db).await?.is_none() {
        return Err(ServiceError::not_found("course", course_id));
    }
    let student_ids: Vec<i32> = enrollment::list_for_course(db, course_id)
        .await?
        .into_iter()
        .map(|e| e.estudent_id)
        .collect();
    if student_ids.is_empty() {
        return Ok(Vec::new());
    }
    let students = student::Entity::find()
        .filter(student::Column::StudentId.is_in(student_ids))
        .order_by_asc(student::Column::StudentId)
        .all(db)
        .await?;
    Ok(students)
}

/// Insert one enrollment row per course id, duplicates included.
pub async fn enroll<C: ConnectionTrait>(db: &C, student_id: i32, course_ids: &[i32]) -> Result<Vec<enrollment::Model>, ServiceError> {
    let mut created = Vec::with_capacity(course_ids.len());
    for &course_id in course_ids {
        created.push(enrollment::create(db, student_id, course_id).await?);
    }
    Ok(created)
}

/// Remove the oldest enrollment row for (student, course).
/// Returns `false` when there was nothing to remove.
#[instrument(skip(db))]
pub async fn withdraw(db: &DatabaseConnection, student_id: i32, course_id: i32) -> Result<bool, ServiceError> {
    let txn = db.begin().await?;
    let Some(found) = enrollment::first_match(&txn, student_id, course_id).await? else {
        info!(event = "withdraw_noop", "no matching enrollment");
        return Ok(false);
    };
    enrollment::Entity::delete_by_id(found.enrollment_id).exec(&txn).await?;
    txn.commit().await?;
    info!(event = "withdrawn", enrollment_id = found.enrollment_id, "enrollment removed");
    Ok(true)
}
