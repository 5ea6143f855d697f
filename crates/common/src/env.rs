//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Ensure the directory holding a file-backed SQLite database exists.
/// Server-backed URLs (postgres) and in-memory databases need nothing.
pub async fn ensure_env(database_url: &str) -> anyhow::Result<()> {
    let Some(dir) = sqlite_parent_dir(database_url) else {
        return Ok(());
    };
    if tokio::fs::metadata(&dir).await.is_err() {
        warn!(dir = %dir.display(), "database directory missing; creating it");
    }
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    info!(dir = %dir.display(), "database directory ready");
    Ok(())
}

/// Parent directory of the file named by a `sqlite:` URL, if any.
pub fn sqlite_parent_dir(database_url: &str) -> Option<PathBuf> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_urls_yield_parent() {
        assert_eq!(
            sqlite_parent_dir("sqlite://data/enrollment.sqlite3?mode=rwc"),
            Some(PathBuf::from("data"))
        );
        assert_eq!(sqlite_parent_dir("sqlite:/tmp/x/db.sqlite3"), Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn memory_bare_and_server_urls_yield_none() {
        assert_eq!(sqlite_parent_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_parent_dir("sqlite://db.sqlite3"), None);
        assert_eq!(sqlite_parent_dir("postgres://localhost/db"), None);
    }
}
