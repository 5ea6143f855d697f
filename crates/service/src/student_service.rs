use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};
use tracing::{info, instrument, warn};

use models::{course, enrollment, student};
use crate::{enrollment_service, errors::ServiceError};

/// Data behind the student update page.
#[derive(Debug, Clone)]
pub struct StudentForm {
    pub student: student::Model,
    pub courses: Vec<course::Model>,
}

/// A student with the courses reached through its enrollments.
#[derive(Debug, Clone)]
pub struct StudentDetails {
    pub student: student::Model,
    pub courses: Vec<course::Model>,
}

/// List all students.
pub async fn list_students(db: &DatabaseConnection) -> Result<Vec<student::Model>, ServiceError> {
    let students = student::Entity::find()
        .order_by_asc(student::Column::StudentId)
        .all(db)
        .await?;
    Ok(students)
}

/// Get a student by id.
pub async fn get_student(db: &DatabaseConnection, id: i32) -> Result<student::Model, ServiceError> {
    student::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("student", id))
}

/// Create a student unless the roll number is already taken.
#[instrument(skip(db, first_name, last_name))]
pub async fn create_student(
    db: &DatabaseConnection,
    roll_number: &str,
    first_name: &str,
    last_name: Option<&str>,
) -> Result<student::Model, ServiceError> {
    let txn = db.begin().await?;
    if student::find_by_roll_number(&txn, roll_number).await?.is_some() {
        warn!(event = "duplicate_roll_number", "student not created");
        return Err(ServiceError::Conflict(format!("roll number {} already exists", roll_number)));
    }
    let created = student::create(&txn, roll_number, first_name, last_name).await?;
    txn.commit().await?;
    info!(event = "student_created", student_id = created.student_id, "student created");
    Ok(created)
}

/// Student plus every course, for the update page's selection list.
pub async fn student_update_form(db: &DatabaseConnection, id: i32) -> Result<StudentForm, ServiceError> {
    let student = get_student(db, id).await?;
    let courses = course::Entity::find()
        .order_by_asc(course::Column::CourseId)
        .all(db)
        .await?;
    Ok(StudentForm { student, courses })
}

/// Overwrite the student's names and add one enrollment per selected course.
///
/// Selected ids are not checked against existing enrollments, so selecting a
/// course the student already has adds a second row for it. Unknown course
/// ids fail the foreign key and the whole update is rolled back.
#[instrument(skip(db, first_name, last_name))]
pub async fn update_student(
    db: &DatabaseConnection,
    id: i32,
    first_name: &str,
    last_name: Option<&str>,
    course_ids: &[i32],
) -> Result<student::Model, ServiceError> {
    let txn = db.begin().await?;
    let updated = student::update_names(&txn, id, first_name, last_name).await?;
    let added = enrollment_service::enroll(&txn, id, course_ids).await?;
    txn.commit().await?;
    info!(event = "student_updated", student_id = id, enrollments_added = added.len(), "student updated");
    Ok(updated)
}

/// Remove the student's enrollments, then the student.
/// Returns how many enrollment rows went with it.
#[instrument(skip(db))]
pub async fn delete_student(db: &DatabaseConnection, id: i32) -> Result<u64, ServiceError> {
    let txn = db.begin().await?;
    if student::Entity::find_by_id(id).one(&txn).await?.is_none() {
        return Err(ServiceError::not_found("student", id));
    }
    let removed = enrollment::delete_for_student(&txn, id).await?;
    student::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(event = "student_deleted", student_id = id, enrollments_removed = removed, "student deleted");
    Ok(removed)
}

pub async fn student_details(db: &DatabaseConnection, id: i32) -> Result<StudentDetails, ServiceError> {
    let student = get_student(db, id).await?;
    let courses = enrollment_service::courses_for_student(db, id).await?;
    Ok(StudentDetails { student, courses })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{course_service, test_support::get_db};
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn create_then_list() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let s = create_student(&db, "R1", "Ann", None).await?;
        let all = list_students(&db).await?;
        assert_eq!(all, vec![s]);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_roll_number_is_conflict() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_student(&db, "R1", "Ann", None).await?;
        let err = create_student(&db, "R1", "Bob", Some("Smith")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let all = list_students(&db).await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].first_name, "Ann");
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_names_but_not_roll_number() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let s = create_student(&db, "R1", "Ann", None).await?;
        update_student(&db, s.student_id, "Anna", Some("Lee"), &[]).await?;

        let found = get_student(&db, s.student_id).await?;
        assert_eq!(found.first_name, "Anna");
        assert_eq!(found.last_name.as_deref(), Some("Lee"));
        assert_eq!(found.roll_number, "R1");
        Ok(())
    }

    #[tokio::test]
    async fn reselecting_a_course_duplicates_the_enrollment() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let s = create_student(&db, "R1", "Ann", None).await?;
        let math = course_service::create_course(&db, "C1", "Math", None).await?;
        let art = course_service::create_course(&db, "C2", "Art", None).await?;

        update_student(&db, s.student_id, "Ann", None, &[math.course_id, art.course_id]).await?;
        assert_eq!(enrollment::Entity::find().count(&db).await?, 2);

        update_student(&db, s.student_id, "Ann", None, &[math.course_id]).await?;
        let math_rows = enrollment::Entity::find()
            .all(&db)
            .await?
            .into_iter()
            .filter(|e| e.estudent_id == s.student_id && e.ecourse_id == math.course_id)
            .count();
        assert_eq!(math_rows, 2);
        assert_eq!(enrollment::Entity::find().count(&db).await?, 3);
        Ok(())
    }

    #[tokio::test]
    async fn failed_enrollment_rolls_back_name_change() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let s = create_student(&db, "R1", "Ann", None).await?;
        let err = update_student(&db, s.student_id, "Changed", None, &[12345]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));

        let found = get_student(&db, s.student_id).await?;
        assert_eq!(found.first_name, "Ann");
        assert_eq!(enrollment::Entity::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_student_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = update_student(&db, 5, "X", None, &[]).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_enrollments_and_student() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let s = create_student(&db, "R1", "Ann", None).await?;
        let other = create_student(&db, "R2", "Bob", None).await?;
        let math = course_service::create_course(&db, "C1", "Math", None).await?;
        update_student(&db, s.student_id, "Ann", None, &[math.course_id, math.course_id]).await?;
        update_student(&db, other.student_id, "Bob", None, &[math.course_id]).await?;

        assert_eq!(delete_student(&db, s.student_id).await?, 2);
        assert_eq!(enrollment::Entity::find().count(&db).await?, 1);

        let err = student_details(&db, s.student_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(matches!(delete_student(&db, s.student_id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn enroll_and_withdraw_scenario() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let ann = create_student(&db, "R1", "Ann", None).await?;
        let math = course_service::create_course(&db, "C1", "Math", None).await?;

        update_student(&db, ann.student_id, "Ann", None, &[math.course_id]).await?;
        let details = student_details(&db, ann.student_id).await?;
        let names: Vec<&str> = details.courses.iter().map(|c| c.course_name.as_str()).collect();
        assert_eq!(names, vec!["Math"]);

        assert!(enrollment_service::withdraw(&db, ann.student_id, math.course_id).await?);
        let details = student_details(&db, ann.student_id).await?;
        assert!(details.courses.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_form_lists_all_courses() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let s = create_student(&db, "R1", "Ann", None).await?;
        course_service::create_course(&db, "C1", "Math", None).await?;
        course_service::create_course(&db, "C2", "Art", None).await?;

        let form = student_update_form(&db, s.student_id).await?;
        assert_eq!(form.student.student_id, s.student_id);
        assert_eq!(form.courses.len(), 2);
        assert!(matches!(student_update_form(&db, 99).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
