//! SQL schema definitions and migrations.
//!
//! The schema is portable between SQLite and PostgreSQL: `BIGINT` for integers,
//! booleans and timestamps, `TEXT` for everything else.
//!
//! # Migration System
//!
//! Migrations are code-based so that each step can issue dialect-specific SQL.
//!
//! ## Adding a New Migration
//!
//! 1. Increment `SCHEMA_VERSION`
//! 2. Add a new `migrate_vN_to_vM` async function
//! 3. Add the migration to the match statement in `run_migration`

use crate::Result;
use crate::backend::errors::BackendError;

use super::SqlxBackend;

/// Current schema version.
pub const SCHEMA_VERSION: i64 = 1;

/// SQL statements to create the schema tables.
pub const CREATE_TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS schema_version (
        version BIGINT PRIMARY KEY
    )",
    // Identity records; email holds the normalized (trimmed, lowercased) form
    "CREATE TABLE IF NOT EXISTS users (
        uuid TEXT PRIMARY KEY NOT NULL,
        email TEXT NOT NULL UNIQUE,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at BIGINT NOT NULL
    )",
    // Revocation list: exact token string until its own expiry (Unix seconds)
    "CREATE TABLE IF NOT EXISTS blacklisted_tokens (
        token TEXT PRIMARY KEY NOT NULL,
        expires_at BIGINT NOT NULL
    )",
    // Journal entries with visibility columns.
    // Timestamps are Unix milliseconds; list columns are JSON arrays.
    "CREATE TABLE IF NOT EXISTS journal (
        uuid TEXT PRIMARY KEY NOT NULL,
        author_uuid TEXT NOT NULL,
        author_first_name TEXT NOT NULL,
        author_last_name TEXT NOT NULL,
        author_email TEXT NOT NULL,
        journal_title TEXT NOT NULL,
        journal_content TEXT NOT NULL,
        journal_tags TEXT NOT NULL DEFAULT '[]',
        image_url TEXT,
        is_public BIGINT NOT NULL DEFAULT 0,
        allowed_emails TEXT NOT NULL DEFAULT '[]',
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL
    )",
];

/// SQL statements to create indexes.
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_blacklisted_tokens_expiry ON blacklisted_tokens(expires_at)",
    "CREATE INDEX IF NOT EXISTS idx_journal_author ON journal(author_uuid, created_at)",
];

/// Initialize the database schema.
///
/// Creates tables and indexes if they don't exist, and runs migrations if the
/// stored schema version is older than [`SCHEMA_VERSION`].
pub async fn initialize(backend: &SqlxBackend) -> Result<()> {
    let pool = backend.pool();

    for statement in CREATE_TABLES {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| BackendError::SqlxError {
                reason: format!("Schema creation failed: {e} - SQL: {statement}"),
                source: Some(e),
            })?;
    }

    let row: Option<(i64,)> = sqlx::query_as("SELECT version FROM schema_version")
        .fetch_optional(pool)
        .await
        .map_err(|e| BackendError::SqlxError {
            reason: format!("Failed to check schema version: {e}"),
            source: Some(e),
        })?;

    if row.is_none() {
        sqlx::query("INSERT INTO schema_version (version) VALUES ($1)")
            .bind(SCHEMA_VERSION)
            .execute(pool)
            .await
            .map_err(|e| BackendError::SqlxError {
                reason: format!("Failed to initialize schema version: {e}"),
                source: Some(e),
            })?;
    } else if let Some((current_version,)) = row
        && current_version < SCHEMA_VERSION
    {
        migrate(backend, current_version, SCHEMA_VERSION).await?;
    }

    for statement in CREATE_INDEXES {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| BackendError::SqlxError {
                reason: format!("Index creation failed: {e} - SQL: {statement}"),
                source: Some(e),
            })?;
    }

    Ok(())
}

/// Run migrations sequentially from one schema version to another.
async fn migrate(backend: &SqlxBackend, from: i64, to: i64) -> Result<()> {
    tracing::info!(from, to, "Starting SQL schema migration");

    let mut current = from;
    while current < to {
        let next = current + 1;
        run_migration(backend, current, next).await?;

        sqlx::query("UPDATE schema_version SET version = $1")
            .bind(next)
            .execute(backend.pool())
            .await
            .map_err(|e| BackendError::SqlxError {
                reason: format!("Failed to update schema version to {next}: {e}"),
                source: Some(e),
            })?;

        tracing::info!(version = next, "Migration completed");
        current = next;
    }

    Ok(())
}

/// Execute a single migration step.
async fn run_migration(backend: &SqlxBackend, from: i64, to: i64) -> Result<()> {
    // No migrations exist yet; version 1 is the first schema.
    let _ = backend;

    Err(BackendError::SqlxError {
        reason: format!(
            "Unknown migration path: v{from} to v{to}. \
             This likely means SCHEMA_VERSION was incremented without adding a migration."
        ),
        source: None,
    }
    .into())
}
