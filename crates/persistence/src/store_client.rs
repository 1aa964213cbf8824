// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use stepline::{StoreClient, StoreError};
use stepline_domain::{BusinessTable, NewRecord, RecordLookup};
use time::PrimitiveDateTime;

use crate::{Persistence, PersistenceError};

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        Self::new(err.to_string())
    }
}

impl StoreClient for Persistence {
    fn delete_all(&mut self, table: BusinessTable) -> Result<usize, StoreError> {
        Ok(self.delete_all_rows(table)?)
    }

    fn insert(
        &mut self,
        record: &NewRecord,
        recorded_at: PrimitiveDateTime,
    ) -> Result<i64, StoreError> {
        Ok(self.insert_record(record, recorded_at)?)
    }

    fn lookup(&mut self, lookup: &RecordLookup) -> Result<Option<i64>, StoreError> {
        Ok(self.lookup_record(lookup)?)
    }

    fn count(&mut self, table: BusinessTable) -> Result<usize, StoreError> {
        Ok(self.count_rows(table)?)
    }
}
