use anyhow::Result;
use sea_orm::{EntityTrait, ModelTrait, PaginatorTrait};

use super::setup_test_db;
use crate::errors::ModelError;
use crate::{course, enrollment, student};

/// Test student CRUD operations
#[tokio::test]
async fn test_student_crud() -> Result<()> {
    let db = setup_test_db().await?;

    // Create
    let created = student::create(&db, "R1", "Ann", None).await?;
    assert_eq!(created.roll_number, "R1");
    assert_eq!(created.last_name, None);
    assert!(created.student_id > 0);

    // Read
    let found = student::Entity::find_by_id(created.student_id).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));

    let by_roll = student::find_by_roll_number(&db, "R1").await?;
    assert_eq!(by_roll.map(|s| s.student_id), Some(created.student_id));
    assert!(student::find_by_roll_number(&db, "R2").await?.is_none());

    // Update
    let updated = student::update_names(&db, created.student_id, "Anna", Some("Lee")).await?;
    assert_eq!(updated.first_name, "Anna");
    assert_eq!(updated.last_name.as_deref(), Some("Lee"));
    assert_eq!(updated.roll_number, "R1");

    // Delete
    student::Entity::delete_by_id(created.student_id).exec(&db).await?;
    assert!(student::Entity::find_by_id(created.student_id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_update_missing_student_is_not_found() -> Result<()> {
    let db = setup_test_db().await?;
    let err = student::update_names(&db, 4242, "X", None).await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound("student")));
    Ok(())
}

/// Test unique constraint on roll number
#[tokio::test]
async fn test_roll_number_unique_constraint() -> Result<()> {
    let db = setup_test_db().await?;
    student::create(&db, "R1", "Ann", None).await?;
    let dup = student::create(&db, "R1", "Bob", None).await;
    assert!(matches!(dup, Err(ModelError::Db(_))));
    assert_eq!(student::Entity::find().count(&db).await?, 1);
    Ok(())
}

/// Test course CRUD operations
#[tokio::test]
async fn test_course_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let created = course::create(&db, "C1", "Math", Some("Algebra")).await?;
    assert_eq!(created.course_code, "C1");
    assert_eq!(created.course_description.as_deref(), Some("Algebra"));

    let by_code = course::find_by_code(&db, "C1").await?;
    assert_eq!(by_code, Some(created.clone()));

    let updated = course::update_details(&db, created.course_id, "Mathematics", None).await?;
    assert_eq!(updated.course_name, "Mathematics");
    assert_eq!(updated.course_description, None);
    assert_eq!(updated.course_code, "C1");

    let dup = course::create(&db, "C1", "Other", None).await;
    assert!(dup.is_err());
    Ok(())
}

/// Test enrollment rows and the many-to-many traversal
#[tokio::test]
async fn test_enrollment_links() -> Result<()> {
    let db = setup_test_db().await?;
    let s = student::create(&db, "R1", "Ann", None).await?;
    let math = course::create(&db, "C1", "Math", None).await?;
    let art = course::create(&db, "C2", "Art", None).await?;

    let first = enrollment::create(&db, s.student_id, math.course_id).await?;
    let second = enrollment::create(&db, s.student_id, math.course_id).await?;
    enrollment::create(&db, s.student_id, art.course_id).await?;
    assert_ne!(first.enrollment_id, second.enrollment_id);

    let matched = enrollment::first_match(&db, s.student_id, math.course_id).await?;
    assert_eq!(matched.map(|e| e.enrollment_id), Some(first.enrollment_id));

    let courses = s.find_related(course::Entity).all(&db).await?;
    assert_eq!(courses.len(), 3);

    let students = math.find_related(student::Entity).all(&db).await?;
    assert!(students.iter().all(|x| x.student_id == s.student_id));

    assert_eq!(enrollment::list_for_course(&db, math.course_id).await?.len(), 2);
    assert_eq!(enrollment::delete_for_course(&db, math.course_id).await?, 2);
    assert_eq!(enrollment::delete_for_student(&db, s.student_id).await?, 1);
    assert_eq!(enrollment::Entity::find().count(&db).await?, 0);
    Ok(())
}

/// Enrollment FKs reject unknown parents and block orphaning deletes
#[tokio::test]
async fn test_enrollment_foreign_keys() -> Result<()> {
    let db = setup_test_db().await?;
    let s = student::create(&db, "R1", "Ann", None).await?;
    assert!(enrollment::create(&db, s.student_id, 999).await.is_err());

    let c = course::create(&db, "C1", "Math", None).await?;
    enrollment::create(&db, s.student_id, c.course_id).await?;
    assert!(student::Entity::delete_by_id(s.student_id).exec(&db).await.is_err());

    enrollment::delete_for_student(&db, s.student_id).await?;
    student::Entity::delete_by_id(s.student_id).exec(&db).await?;
    Ok(())
}
