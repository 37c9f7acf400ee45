use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::Duration;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

/// Pooled connections wait this long on a locked store before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a pool over one semester database file, creating the file if needed.
pub fn create_pool<P: AsRef<Path>>(database_path: P) -> Result<DbPool> {
    let path = database_path.as_ref();
    build_pool(store_manager(path))
        .with_context(|| format!("Failed to open semester store at {}", path.display()))
}

fn store_manager(path: &Path) -> SqliteConnectionManager {
    SqliteConnectionManager::file(path).with_init(|conn| conn.busy_timeout(BUSY_TIMEOUT))
}

fn build_pool(manager: SqliteConnectionManager) -> Result<DbPool> {
    r2d2::Pool::builder()
        .build(manager)
        .context("Failed to create database connection pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get().context("Failed to get database connection from pool")
}
