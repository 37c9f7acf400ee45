use anyhow::{bail, Context, Result};
use rusqlite::Connection;

/// Schema revision written to `PRAGMA user_version`.
const SCHEMA_VERSION: i64 = 1;

/// Bring a semester store up to the current schema in one transaction.
/// Every statement is `IF NOT EXISTS`, so re-running against an existing
/// store is a no-op. A store written by a newer build is refused.
pub fn initialize_database(conn: &mut Connection) -> Result<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        bail!(
            "Store schema version {} is newer than supported version {}",
            found,
            SCHEMA_VERSION
        );
    }

    let tx = conn.transaction().context("Failed to begin schema transaction")?;
    tx.execute_batch(include_str!("schema.sql"))
        .context("Failed to apply schema")?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)
        .context("Failed to record schema version")?;
    tx.commit().context("Failed to commit schema")?;

    log::debug!("Database schema at version {} (was {})", SCHEMA_VERSION, found);
    Ok(())
}

fn schema_version(conn: &Connection) -> Result<i64> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .context("Failed to read schema version")
}
