use std::future::Future;

use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tracing::info;

use crate::{routes, state::ServerState};

/// `config.toml` when present, otherwise `SERVER_HOST`/`SERVER_PORT`/`DATABASE_URL`.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let mut cfg = match configs::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            info!(reason = %e, "no usable config file; configuring from environment");
            AppConfig::from_env()
        }
    };
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

/// Connect to the configured store and bring the schema up to date.
pub async fn connect_and_migrate(cfg: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    common::env::ensure_env(&cfg.database.url).await?;
    let db = models::db::connect_with_config(&(&cfg.database).into()).await?;
    migration::Migrator::up(&db, None).await?;
    info!(event = "migrated", "database schema up to date");
    Ok(db)
}

/// Router over an already-connected store.
pub fn build_app(db: DatabaseConnection) -> Router {
    routes::build_router(ServerState::new(db))
}

/// Bind `server.host:server.port`; host names are resolved.
pub async fn bind_listener(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind((cfg.host.as_str(), cfg.port)).await?;
    Ok(listener)
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Public entry: connect, migrate and serve with an already-resolved config.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = connect_and_migrate(&cfg).await?;
    let app = build_app(db);

    let listener = bind_listener(&cfg.server).await?;
    info!(addr = %listener.local_addr()?, "starting enrollment server");
    serve(listener, app, shutdown).await?;
    info!(event = "drained", "server stopped accepting requests");
    Ok(())
}
