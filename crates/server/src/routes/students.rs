use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use service::{enrollment_service, student_service};

use crate::{errors::PageError, metrics, routes::optional, state::ServerState, views};

#[derive(Debug, Deserialize)]
pub struct CreateStudentForm {
    pub roll: String,
    pub f_name: String,
    #[serde(default)]
    pub l_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentForm {
    pub f_name: String,
    #[serde(default)]
    pub l_name: String,
    /// Checked course ids; the field repeats once per checkbox.
    #[serde(default)]
    pub course: Vec<i32>,
}

/// Student list; also the home page.
pub async fn list(State(state): State<ServerState>) -> Result<Html<String>, PageError> {
    let students = student_service::list_students(&state.db).await.map_err(PageError::students)?;
    Ok(views::student_list(&students))
}

pub async fn create_form() -> Html<String> {
    views::student_create_form()
}

pub async fn create(
    State(state): State<ServerState>,
    Form(input): Form<CreateStudentForm>,
) -> Result<Redirect, PageError> {
    student_service::create_student(&state.db, &input.roll, &input.f_name, optional(&input.l_name))
        .await
        .map_err(PageError::students)?;
    metrics::record_write("student", "create");
    Ok(Redirect::to("/"))
}

pub async fn update_form(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, PageError> {
    let form = student_service::student_update_form(&state.db, id).await.map_err(PageError::students)?;
    Ok(views::student_update_form(&form))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Form(input): Form<UpdateStudentForm>,
) -> Result<Redirect, PageError> {
    student_service::update_student(&state.db, id, &input.f_name, optional(&input.l_name), &input.course)
        .await
        .map_err(PageError::students)?;
    metrics::record_write("student", "update");
    Ok(Redirect::to("/"))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Redirect, PageError> {
    student_service::delete_student(&state.db, id).await.map_err(PageError::students)?;
    metrics::record_write("student", "delete");
    Ok(Redirect::to("/"))
}

pub async fn details(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Html<String>, PageError> {
    let details = student_service::student_details(&state.db, id).await.map_err(PageError::students)?;
    Ok(views::student_details(&details))
}

/// Withdraw; without a matching enrollment this is a no-op.
pub async fn withdraw(
    State(state): State<ServerState>,
    Path((student_id, course_id)): Path<(i32, i32)>,
) -> Result<Redirect, PageError> {
    if enrollment_service::withdraw(&state.db, student_id, course_id)
        .await
        .map_err(PageError::students)?
    {
        metrics::record_write("enrollment", "withdraw");
    }
    Ok(Redirect::to("/"))
}
