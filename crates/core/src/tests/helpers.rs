// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    EffectiveDateResolver, LifecycleOrchestrator, ManualClock, MemoryOverrideStore,
    SimulationControl, StoreClient, StoreError, ViewInvalidator, ViewScope, WallClock,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use stepline_domain::{BusinessTable, EffectiveDate, NewRecord, RecordLookup};
use time::macros::datetime;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Noon UTC on the day every test clock starts at.
pub const TEST_NOW: OffsetDateTime = datetime!(2025-06-15 12:00 UTC);

pub fn date(value: &str) -> EffectiveDate {
    EffectiveDate::parse(value).expect("Valid test date")
}

/// Records every invalidation it receives.
#[derive(Debug, Default)]
pub struct RecordingInvalidator {
    scopes: Mutex<Vec<ViewScope>>,
}

impl RecordingInvalidator {
    pub fn scopes(&self) -> Vec<ViewScope> {
        self.scopes.lock().unwrap().clone()
    }
}

impl ViewInvalidator for RecordingInvalidator {
    fn invalidate(&self, scope: ViewScope) {
        self.scopes.lock().unwrap().push(scope);
    }
}

/// Everything a core test needs, wired to one manual clock.
pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub overrides: MemoryOverrideStore,
    pub invalidator: Arc<RecordingInvalidator>,
    pub resolver: EffectiveDateResolver,
    pub simulation: SimulationControl,
    pub lifecycle: LifecycleOrchestrator,
}

pub fn harness() -> Harness {
    let clock: Arc<ManualClock> = Arc::new(ManualClock::new(TEST_NOW));
    let wall: Arc<dyn WallClock> = clock.clone();
    let invalidator: Arc<RecordingInvalidator> = Arc::new(RecordingInvalidator::default());
    let resolver: EffectiveDateResolver = EffectiveDateResolver::new(wall.clone());
    Harness {
        overrides: MemoryOverrideStore::new(wall),
        simulation: SimulationControl::new(resolver.clone(), invalidator.clone()),
        lifecycle: LifecycleOrchestrator::new(resolver.clone(), invalidator.clone()),
        clock,
        invalidator,
        resolver,
    }
}

/// An in-memory store that enforces foreign keys the way SQLite does.
#[derive(Debug, Default)]
pub struct FakeStore {
    rows: HashMap<BusinessTable, Vec<(i64, NewRecord)>>,
    next_id: i64,
    /// Tables whose delete is rejected.
    pub fail_delete: Option<BusinessTable>,
    /// Tables whose inserts are rejected.
    pub fail_insert: Option<BusinessTable>,
    /// Every delete attempted, in order.
    pub delete_log: Vec<BusinessTable>,
    /// Every lookup performed.
    pub lookup_count: usize,
    /// Timestamps passed to inserts.
    pub recorded_at: Vec<PrimitiveDateTime>,
}

impl FakeStore {
    pub fn rows(&self, table: BusinessTable) -> Vec<NewRecord> {
        self.rows
            .get(&table)
            .map(|rows| rows.iter().map(|(_, r)| r.clone()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self, table: BusinessTable) -> usize {
        self.rows.get(&table).map_or(0, Vec::len)
    }

    pub fn total(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }

    fn contains(&self, table: BusinessTable, id: i64) -> bool {
        self.rows
            .get(&table)
            .is_some_and(|rows| rows.iter().any(|(row_id, _)| *row_id == id))
    }

    fn is_referenced(&self, table: BusinessTable) -> bool {
        self.rows.values().flatten().any(|(_, record)| {
            record
                .references()
                .iter()
                .any(|(parent, id)| *parent == table && self.contains(table, *id))
        })
    }
}

impl StoreClient for FakeStore {
    fn delete_all(&mut self, table: BusinessTable) -> Result<usize, StoreError> {
        self.delete_log.push(table);
        if self.fail_delete == Some(table) {
            return Err(StoreError::new(format!("disk I/O error deleting {table}")));
        }
        if self.is_referenced(table) {
            return Err(StoreError::new("FOREIGN KEY constraint failed"));
        }
        Ok(self.rows.remove(&table).map_or(0, |rows| rows.len()))
    }

    fn insert(
        &mut self,
        record: &NewRecord,
        recorded_at: PrimitiveDateTime,
    ) -> Result<i64, StoreError> {
        let table: BusinessTable = record.table();
        if self.fail_insert == Some(table) {
            return Err(StoreError::new(format!("cannot insert into {table}")));
        }
        if let Some((parent, _)) = record
            .references()
            .into_iter()
            .find(|(parent, id)| !self.contains(*parent, *id))
        {
            return Err(StoreError::new(format!(
                "FOREIGN KEY constraint failed: missing {parent} row"
            )));
        }

        self.next_id += 1;
        self.rows
            .entry(table)
            .or_default()
            .push((self.next_id, record.clone()));
        self.recorded_at.push(recorded_at);
        Ok(self.next_id)
    }

    fn lookup(&mut self, lookup: &RecordLookup) -> Result<Option<i64>, StoreError> {
        self.lookup_count += 1;
        let found = self.rows.get(&lookup.table()).and_then(|rows| {
            rows.iter().find(|(_, record)| match (lookup, record) {
                (RecordLookup::InstructorByName(name), NewRecord::Instructor(i)) => {
                    i.name == *name
                }
                (RecordLookup::RateByName(name), NewRecord::Rate(r)) => r.name == *name,
                (RecordLookup::ClassByName(name), NewRecord::Class(c)) => c.name == *name,
                _ => false,
            })
        });
        Ok(found.map(|(id, _)| *id))
    }

    fn count(&mut self, table: BusinessTable) -> Result<usize, StoreError> {
        Ok(self.len(table))
    }
}
