// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup.
//!
//! Every connection leaves [`open`] with foreign keys enforced and the
//! schema migrated. A connection that reports foreign keys off is refused,
//! since the wipe order relies on the store rejecting orphaning deletes.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Where a studio database lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// Shared-cache in-memory database; journal mode is left alone.
    Memory,
    /// On-disk database, journaled with WAL.
    File,
}

impl Storage {
    const fn pragmas(self) -> &'static [&'static str] {
        match self {
            Self::Memory => &["PRAGMA foreign_keys = ON"],
            Self::File => &[
                "PRAGMA foreign_keys = ON",
                "PRAGMA journal_mode = WAL",
                "PRAGMA busy_timeout = 5000",
            ],
        }
    }
}

#[derive(QueryableByName)]
struct ForeignKeysRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[derive(QueryableByName)]
struct JournalModeRow {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}

/// Opens `database_url`, configures it for `storage` and migrates it.
///
/// # Errors
///
/// Returns an error if the connection, a PRAGMA or a migration fails, or
/// if foreign keys are still off afterwards.
pub fn open(database_url: &str, storage: Storage) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, ?storage, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // Diesel has no PRAGMA DSL.
    for pragma in storage.pragmas() {
        diesel::sql_query(*pragma)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))?;
        debug!(pragma, "Applied");
    }

    if !foreign_keys_enabled(&mut conn)? {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    info!(
        journal_mode = %journal_mode(&mut conn)?,
        "SQLite database ready with foreign keys enforced"
    );
    Ok(conn)
}

/// Whether `conn` currently enforces foreign keys.
///
/// # Errors
///
/// Returns an error if the PRAGMA cannot be read.
pub fn foreign_keys_enabled(conn: &mut SqliteConnection) -> Result<bool, PersistenceError> {
    let row: ForeignKeysRow = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    Ok(row.foreign_keys != 0)
}

/// The journal mode `conn` runs in, lowercase.
///
/// # Errors
///
/// Returns an error if the PRAGMA cannot be read.
pub fn journal_mode(conn: &mut SqliteConnection) -> Result<String, PersistenceError> {
    let row: JournalModeRow = diesel::sql_query("PRAGMA journal_mode").get_result(conn)?;
    Ok(row.journal_mode.to_lowercase())
}

/// Id of the row most recently inserted on `conn`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}
