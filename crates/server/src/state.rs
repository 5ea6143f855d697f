use sea_orm::DatabaseConnection;

/// Shared handler state: the pooled store handle, cloned into every request.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}
