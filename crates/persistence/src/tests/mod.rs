// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod lifecycle_tests;
mod operator_tests;

use std::sync::Arc;
use stepline::{
    EffectiveDateResolver, LifecycleOrchestrator, ManualClock, MemoryOverrideStore,
    NoopInvalidator, WallClock,
};
use stepline_domain::{EffectiveDate, NewInstructor, NewRecord};
use time::PrimitiveDateTime;
use time::macros::datetime;

use crate::Persistence;

pub const TEST_RECORDED_AT: PrimitiveDateTime = datetime!(2025-06-15 12:00);

pub fn date(value: &str) -> EffectiveDate {
    EffectiveDate::parse(value).unwrap()
}

pub fn fresh() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn insert_instructor(persistence: &mut Persistence, name: &str) -> i64 {
    persistence
        .insert_record(
            &NewRecord::Instructor(NewInstructor {
                name: name.to_string(),
                email: None,
            }),
            TEST_RECORDED_AT,
        )
        .unwrap()
}

/// An orchestrator over a clock pinned to 2025-06-15 with no override set.
pub fn orchestrator() -> (LifecycleOrchestrator, MemoryOverrideStore) {
    let clock: Arc<dyn WallClock> = Arc::new(ManualClock::new(datetime!(2025-06-15 12:00 UTC)));
    let resolver: EffectiveDateResolver = EffectiveDateResolver::new(Arc::clone(&clock));
    (
        LifecycleOrchestrator::new(resolver, Arc::new(NoopInvalidator)),
        MemoryOverrideStore::new(clock),
    )
}
