//! `enrollments` join rows linking a student to a course.
//!
//! A (student, course) pair may appear more than once.

use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, db_err};
use crate::{course, student};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub enrollment_id: i32,
    pub estudent_id: i32,
    pub ecourse_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
    Course,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Student => Entity::belongs_to(student::Entity).from(Column::EstudentId).to(student::Column::StudentId).into(),
            Relation::Course => Entity::belongs_to(course::Entity).from(Column::EcourseId).to(course::Column::CourseId).into(),
        }
    }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef { Relation::Student.def() }
}

impl Related<course::Entity> for Entity {
    fn to() -> RelationDef { Relation::Course.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, student_id: i32, course_id: i32) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        estudent_id: Set(student_id),
        ecourse_id: Set(course_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(db_err)
}

/// Oldest enrollment row for the pair, if any.
pub async fn first_match<C: ConnectionTrait>(db: &C, student_id: i32, course_id: i32) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::EstudentId.eq(student_id))
        .filter(Column::EcourseId.eq(course_id))
        .order_by_asc(Column::EnrollmentId)
        .one(db)
        .await
        .map_err(db_err)
}

pub async fn list_for_course<C: ConnectionTrait>(db: &C, course_id: i32) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::EcourseId.eq(course_id))
        .order_by_asc(Column::EnrollmentId)
        .all(db)
        .await
        .map_err(db_err)
}

/// Returns the number of rows removed.
pub async fn delete_for_student<C: ConnectionTrait>(db: &C, student_id: i32) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::EstudentId.eq(student_id))
        .exec(db)
        .await
        .map_err(db_err)?;
    Ok(res.rows_affected)
}

/// Returns the number of rows removed.
pub async fn delete_for_course<C: ConnectionTrait>(db: &C, course_id: i32) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::EcourseId.eq(course_id))
        .exec(db)
        .await
        .map_err(db_err)?;
    Ok(res.rows_affected)
}
