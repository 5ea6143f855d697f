use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("database error: {0}")]
    Db(String),
}

pub(crate) fn db_err(e: DbErr) -> ModelError {
    ModelError::Db(e.to_string())
}
