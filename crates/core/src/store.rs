// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use stepline_domain::{BusinessTable, NewRecord, RecordLookup};
use thiserror::Error;
use time::PrimitiveDateTime;

/// A relational store operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Table-scoped access to business data.
///
/// Implementations must enforce foreign keys: deleting rows still referenced
/// by a child table, or inserting a row that references a missing parent,
/// fails.
pub trait StoreClient {
    /// Deletes every row of `table`, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is rejected.
    fn delete_all(&mut self, table: BusinessTable) -> Result<usize, StoreError>;

    /// Inserts `record` stamped with `recorded_at`, returning its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert is rejected.
    fn insert(
        &mut self,
        record: &NewRecord,
        recorded_at: PrimitiveDateTime,
    ) -> Result<i64, StoreError>;

    /// Finds the id of an existing row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn lookup(&mut self, lookup: &RecordLookup) -> Result<Option<i64>, StoreError>;

    /// Counts the rows of `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn count(&mut self, table: BusinessTable) -> Result<usize, StoreError>;
}
