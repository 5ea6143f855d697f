use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, db_err};
use crate::{course, enrollment};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub student_id: i32,
    #[sea_orm(unique)]
    pub roll_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
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

/// student -> enrollments -> course
impl Related<course::Entity> for Entity {
    fn to() -> RelationDef { enrollment::Relation::Course.def() }
    fn via() -> Option<RelationDef> { Some(enrollment::Relation::Student.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    roll_number: &str,
    first_name: &str,
    last_name: Option<&str>,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        roll_number: Set(roll_number.to_string()),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.map(str::to_string)),
        ..Default::default()
    };
    am.insert(db).await.map_err(db_err)
}

pub async fn find_by_roll_number<C: ConnectionTrait>(db: &C, roll_number: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::RollNumber.eq(roll_number))
        .one(db)
        .await
        .map_err(db_err)
}

/// Overwrite both name fields. `roll_number` is never touched after creation.
pub async fn update_names<C: ConnectionTrait>(
    db: &C,
    id: i32,
    first_name: &str,
    last_name: Option<&str>,
) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or(errors::ModelError::NotFound("student"))?
        .into();
    found.first_name = Set(first_name.to_string());
    found.last_name = Set(last_name.map(str::to_string));
    found.update(db).await.map_err(db_err)
}
