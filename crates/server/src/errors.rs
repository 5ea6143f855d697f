use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

use crate::metrics;
use crate::views::{self, Section};

/// A failed page request; renders the page matching the error kind.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct PageError {
    section: Section,
    #[source]
    source: ServiceError,
}

impl PageError {
    pub fn students(source: ServiceError) -> Self { Self { section: Section::Students, source } }
    pub fn courses(source: ServiceError) -> Self { Self { section: Section::Courses, source } }

    pub fn status(&self) -> StatusCode {
        match self.source {
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = match &self.source {
            ServiceError::Conflict(msg) => {
                metrics::DUPLICATES_TOTAL.inc();
                warn!(error = %msg, "duplicate key rejected");
                views::duplicate(self.section)
            }
            ServiceError::NotFound(_) => views::not_found(self.section, &self.source.to_string()),
            ServiceError::Db(msg) => {
                metrics::STORE_FAILURES_TOTAL.inc();
                error!(error = %msg, "store operation failed; transaction rolled back");
                views::failure(self.section, msg)
            }
        };
        (status, page).into_response()
    }
}
