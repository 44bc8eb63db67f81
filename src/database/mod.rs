// ABOUTME: SQLite-backed metric store with per-metric daily tables
// ABOUTME: Owns the connection pool, schema creation, and all query modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalForge

//! Persistence layer.
//!
//! One table per metric family, every row keyed by calendar date, plus the
//! manual weight log and the sync-status singleton. The schema is created on
//! startup with `CREATE TABLE IF NOT EXISTS`; there is no migration
//! machinery because the store is single-subject and disposable by design.

mod ingest;
mod metrics;
mod schema;
mod sync_state;
mod weight;

pub use sync_state::{SyncStatus, METRIC_TABLES};
pub use weight::{WeightLogEntry, WeightLogRow};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;
use vitalforge_core::{AppError, AppResult};

/// Shared handle to the SQLite store
#[derive(Clone)]
pub struct Database {
    pub(crate) pool: SqlitePool,
}

impl Database {
    /// Open (creating if necessary) the database and ensure the schema exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// statements fail.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let database = Self { pool };
        database.init_schema().await?;
        info!(url = database_url, "database ready");
        Ok(database)
    }

    /// Create all tables if they don't exist
    async fn init_schema(&self) -> AppResult<()> {
        for statement in schema::CREATE_TABLES {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Schema creation failed: {e}")))?;
        }
        Ok(())
    }
}
