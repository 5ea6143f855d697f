use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, db_err};
use crate::{enrollment, student};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub course_id: i32,
    #[sea_orm(unique)]
    pub course_code: String,
    pub course_name: String,
    pub course_description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Enrollment,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Enrollment => Entity::has_many(enrollment::Entity).into() }
    }
}

impl Related<enrollment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Enrollment.def() }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef { enrollment::Relation::Student.def() }
    fn via() -> Option<RelationDef> { Some(enrollment::Relation::Course.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    course_code: &str,
    course_name: &str,
    course_description: Option<&str>,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        course_code: Set(course_code.to_string()),
        course_name: Set(course_name.to_string()),
        course_description: Set(course_description.map(str::to_string)),
        ..Default::default()
    };
    am.insert(db).await.map_err(db_err)
}

pub async fn find_by_code<C: ConnectionTrait>(db: &C, course_code: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::CourseCode.eq(course_code))
        .one(db)
        .await
        .map_err(db_err)
}

pub async fn update_details<C: ConnectionTrait>(
    db: &C,
    id: i32,
    course_name: &str,
    course_description: Option<&str>,
) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or(errors::ModelError::NotFound("course"))?
        .into();
    found.course_name = Set(course_name.to_string());
    found.course_description = Set(course_description.map(str::to_string));
    found.update(db).await.map_err(db_err)
}
