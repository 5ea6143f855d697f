use axum::{routing::get, Json, Router};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure};
use tracing::Level;

use common::types::Health;

use crate::{metrics, state::ServerState};

pub mod courses;
pub mod students;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_text() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

/// Blank optional form fields are stored as NULL.
pub(crate) fn optional(value: &str) -> Option<&str> {
    if value.trim().is_empty() { None } else { Some(value) }
}

/// Build the full application router: student pages, course pages and ops endpoints
pub fn build_router(state: ServerState) -> Router {
    let student_routes = Router::new()
        .route("/", get(students::list))
        .route("/student/create", get(students::create_form).post(students::create))
        .route("/student/:id", get(students::details))
        .route("/student/:id/update", get(students::update_form).post(students::update))
        .route("/student/:id/delete", get(students::delete))
        .route("/student/:id/withdraw/:course_id", get(students::withdraw));

    let course_routes = Router::new()
        .route("/courses", get(courses::list))
        .route("/course/create", get(courses::create_form).post(courses::create))
        .route("/course/:id", get(courses::details))
        .route("/course/:id/update", get(courses::update_form).post(courses::update))
        .route("/course/:id/delete", get(courses::delete));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text));

    // Compose
    student_routes
        .merge(course_routes)
        .with_state(state)
        .merge(ops)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
