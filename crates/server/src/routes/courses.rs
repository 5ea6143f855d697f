use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use service::course_service;

use crate::{errors::PageError, metrics, routes::optional, state::ServerState, views};

#[derive(Debug, Deserialize)]
pub struct CreateCourseForm {
    pub code: String,
    pub c_name: String,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCourseForm {
    pub c_name: String,
    #[serde(default)]
    pub desc: String,
}

pub async fn list(State(state): State<ServerState>) -> Result<Html<String>, PageError> {
    let courses = course_service::list_courses(&state.db).await.map_err(PageError::courses)?;
    Ok(views::course_list(&courses))
}

pub async fn create_form() -> Html<String> {
    views::course_create_form()
}

pub async fn create(
    State(state): State<ServerState>,
    Form(input): Form<CreateCourseForm>,
) -> Result<Redirect, PageError> {
    course_service::create_course(&state.db, &input.code, &input.c_name, optional(&input.desc))
        .await
        .map_err(PageError::courses)?;
    metrics::record_write("course", "create");
    Ok(Redirect::to("/courses"))
}

pub async fn update_form(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, PageError> {
    let course = course_service::get_course(&state.db, id).await.map_err(PageError::courses)?;
    Ok(views::course_update_form(&course))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Form(input): Form<UpdateCourseForm>,
) -> Result<Redirect, PageError> {
    course_service::update_course(&state.db, id, &input.c_name, optional(&input.desc))
        .await
        .map_err(PageError::courses)?;
    metrics::record_write("course", "update");
    Ok(Redirect::to("/courses"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Redirect, PageError> {
    course_service::delete_course(&state.db, id).await.map_err(PageError::courses)?;
    metrics::record_write("course", "delete");
    Ok(Redirect::to("/courses"))
}

pub async fn details(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, PageError> {
    let details = course_service::course_details(&state.db, id).await.map_err(PageError::courses)?;
    Ok(views::course_details(&details))
}
