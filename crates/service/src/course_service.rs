use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};
use tracing::{info, instrument, warn};

use models::{course, enrollment, student};
use crate::{enrollment_service, errors::ServiceError};

/// A course with the distinct students enrolled in it.
#[derive(Debug, Clone)]
pub struct CourseDetails {
    pub course: course::Model,
    pub students: Vec<student::Model>,
}

/// List all courses.
pub async fn list_courses(db: &DatabaseConnection) -> Result<Vec<course::Model>, ServiceError> {
    let courses = course::Entity::find()
        .order_by_asc(course::Column::CourseId)
        .all(db)
        .await?;
    Ok(courses)
}

/// Get a course by id.
pub async fn get_course(db: &DatabaseConnection, id: i32) -> Result<course::Model, ServiceError> {
    course::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("course", id))
}

/// Create a course unless the code is already taken.
#[instrument(skip(db, course_name, course_description))]
pub async fn create_course(
    db: &DatabaseConnection,
    course_code: &str,
    course_name: &str,
    course_description: Option<&str>,
) -> Result<course::Model, ServiceError> {
    let txn = db.begin().await?;
    if course::find_by_code(&txn, course_code).await?.is_some() {
        warn!(event = "duplicate_course_code", "course not created");
        return Err(ServiceError::Conflict(format!("course code {} already exists", course_code)));
    }
    let created = course::create(&txn, course_code, course_name, course_description).await?;
    txn.commit().await?;
    info!(event = "course_created", course_id = created.course_id, "course created");
    Ok(created)
}

/// Overwrite name and description; the code stays fixed.
#[instrument(skip(db, course_name, course_description))]
pub async fn update_course(
    db: &DatabaseConnection,
    id: i32,
    course_name: &str,
    course_description: Option<&str>,
) -> Result<course::Model, ServiceError> {
    let updated = course::update_details(db, id, course_name, course_description).await?;
    info!(event = "course_updated", course_id = id, "course updated");
    Ok(updated)
}

/// Remove the course's enrollments, then the course.
#[instrument(skip(db))]
pub async fn delete_course(db: &DatabaseConnection, id: i32) -> Result<u64, ServiceError> {
    let txn = db.begin().await?;
    if course::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found("course", id));
    }
    let removed = enrollment::delete_for_course(&txn, id).await?;
    course::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(event = "course_deleted", course_id = id, enrollments_removed = removed, "course deleted");
    Ok(removed)
}

pub async fn course_details(db: &DatabaseConnection, id: i32) -> Result<CourseDetails, ServiceError> {
    let course = get_course(db, id).await?;
    let students = enrollment_service::students_for_course(db, id).await?;
    Ok(CourseDetails { course, students })
}
