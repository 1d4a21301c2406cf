//! Schema versions for the libSQL draft store.
//!
//! Applied versions are recorded in `schema_versions`; opening a store
//! brings the schema up to the newest entry in [`SCHEMA`].

use libsql::{Connection, params};
use tracing::info;

use crate::error::StorageError;

struct SchemaVersion {
    version: i64,
    label: &'static str,
    sql: &'static str,
}

/// Newest last. Never edit a version once released; append a new one.
static SCHEMA: &[SchemaVersion] = &[SchemaVersion {
    version: 1,
    label: "drafts",
    sql: "CREATE TABLE IF NOT EXISTS drafts (
              key TEXT PRIMARY KEY,
              value TEXT NOT NULL,
              updated_at TEXT NOT NULL
          );",
}];

fn migration_err(context: &str, e: impl std::fmt::Display) -> StorageError {
    StorageError::Migration(format!("{context}: {e}"))
}

/// Bring the schema up to date.
pub async fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_versions (
             version INTEGER PRIMARY KEY,
             label TEXT NOT NULL,
             applied_at TEXT NOT NULL DEFAULT (datetime('now'))
         )",
        (),
    )
    .await
    .map_err(|e| migration_err("create schema_versions", e))?;

    let applied = schema_version(conn).await?;
    for step in SCHEMA.iter().filter(|s| s.version > applied) {
        info!(version = step.version, label = step.label, "Upgrading draft store schema");

        let tx = conn
            .transaction()
            .await
            .map_err(|e| migration_err("begin", e))?;
        tx.execute_batch(step.sql)
            .await
            .map_err(|e| migration_err(&format!("V{} {}", step.version, step.label), e))?;
        tx.execute(
            "INSERT INTO schema_versions (version, label) VALUES (?1, ?2)",
            params![step.version, step.label],
        )
        .await
        .map_err(|e| migration_err("record version", e))?;
        tx.commit().await.map_err(|e| migration_err("commit", e))?;
    }
    Ok(())
}

/// Highest applied version; 0 for a fresh database.
pub async fn schema_version(conn: &Connection) -> Result<i64, StorageError> {
    let mut rows = conn
        .query("SELECT COALESCE(MAX(version), 0) FROM schema_versions", ())
        .await
        .map_err(|e| migration_err("read version", e))?;
    match rows.next().await.map_err(|e| migration_err("read version", e))? {
        Some(row) => row.get::<i64>(0).map_err(|e| migration_err("read version", e)),
        None => Ok(0),
    }
}
