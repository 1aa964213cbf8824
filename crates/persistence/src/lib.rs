// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Stepline studio system.
//!
//! This crate owns the `SQLite` schema and exposes a [`Persistence`] adapter
//! over a single Diesel connection. The adapter implements
//! [`stepline::StoreClient`], which is the only surface the lifecycle
//! operations in the core crate use to wipe, seed, and count business data.
//!
//! ## Tables
//!
//! - Business tables: instructors, rates, classes, members, enrollments,
//!   payments, ledger entries, instructor payouts, enrollment logs
//! - Operator tables: operators, sessions
//!
//! Foreign key enforcement is turned on for every connection and verified
//! at startup. Wiping relies on it: deleting a parent before its dependents
//! fails with a constraint violation.
//!
//! ## Testing
//!
//! Tests run against an isolated shared-cache in-memory database created
//! by [`Persistence::new_in_memory`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use stepline_domain::{BusinessTable, NewRecord, RecordLookup};
use time::PrimitiveDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store_client;

#[cfg(test)]
mod tests;

pub use data_models::{EnrollmentData, MemberData, OperatorData, PayoutData, SessionData};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the studio database.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:stepline_mem_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection =
            backend::sqlite::open(&shared_memory_url, backend::sqlite::Storage::Memory)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection =
            backend::sqlite::open(path_str, backend::sqlite::Storage::File)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::ForeignKeyEnforcementNotEnabled`] if it is off.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        if backend::sqlite::foreign_keys_enabled(&mut self.conn)? {
            Ok(())
        } else {
            Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
        }
    }

    // ========================================================================
    // Business data
    // ========================================================================

    /// Deletes every row of `table`, returning the number removed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::ConstraintViolation`] if rows in other
    /// tables still reference `table`.
    pub fn delete_all_rows(&mut self, table: BusinessTable) -> Result<usize, PersistenceError> {
        mutations::delete_all_rows(&mut self.conn, table)
    }

    /// Inserts a business record, returning its new id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert violates a constraint.
    pub fn insert_record(
        &mut self,
        record: &NewRecord,
        recorded_at: PrimitiveDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::insert_record(&mut self.conn, record, recorded_at)
    }

    /// Finds the id of a row by its natural key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn lookup_record(&mut self, lookup: &RecordLookup) -> Result<Option<i64>, PersistenceError> {
        queries::business::lookup_record(&mut self.conn, lookup)
    }

    /// Counts the rows of `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_rows(&mut self, table: BusinessTable) -> Result<usize, PersistenceError> {
        queries::business::count_rows(&mut self.conn, table)
    }

    /// Lists all members.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_members(&mut self) -> Result<Vec<MemberData>, PersistenceError> {
        queries::business::list_members(&mut self.conn)
    }

    /// Lists all enrollments.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_enrollments(&mut self) -> Result<Vec<EnrollmentData>, PersistenceError> {
        queries::business::list_enrollments(&mut self.conn)
    }

    /// Lists all instructor payouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_payouts(&mut self) -> Result<Vec<PayoutData>, PersistenceError> {
        queries::business::list_payouts(&mut self.conn)
    }

    // ========================================================================
    // Operators and sessions
    // ========================================================================

    /// Creates a new operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the login name is taken or the role is invalid.
    pub fn create_operator(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::create_operator(&mut self.conn, login_name, display_name, password, role)
    }

    /// Retrieves an operator by login name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_operator_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_login(&mut self.conn, login_name)
    }

    /// Retrieves an operator by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_operator_by_id(
        &mut self,
        operator_id: i64,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_id(&mut self.conn, operator_id)
    }

    /// Counts operators.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_operators(&mut self) -> Result<i64, PersistenceError> {
        queries::operators::count_operators(&mut self.conn)
    }

    /// Updates an operator's last login timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_last_login(&mut self, operator_id: i64) -> Result<(), PersistenceError> {
        mutations::update_last_login(&mut self.conn, operator_id)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash cannot be checked.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::operators::verify_password(password, password_hash)
    }

    /// Creates a session, returning its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the token already exists or the operator is unknown.
    pub fn create_session(
        &mut self,
        session_token: &str,
        operator_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::create_session(&mut self.conn, session_token, operator_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::operators::get_session_by_token(&mut self.conn, session_token)
    }

    /// Records activity on a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::delete_session(&mut self.conn, session_token)
    }

    /// Counts sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_sessions(&mut self) -> Result<i64, PersistenceError> {
        queries::operators::count_sessions(&mut self.conn)
    }
}
