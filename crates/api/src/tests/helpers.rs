// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Arc;
use stepline::{
    EffectiveDateResolver, LifecycleOrchestrator, ManualClock, MemoryOverrideStore,
    NoopInvalidator, SimulationControl, WallClock,
};
use stepline_persistence::Persistence;
use time::macros::datetime;

use crate::{AuthenticatedActor, Role};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("ADMIN"), Role::Admin)
}

pub fn create_test_staff() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("FRONTDESK"), Role::Staff)
}

/// Core services over a clock pinned to 2025-06-15 noon UTC.
pub struct Services {
    pub clock: Arc<ManualClock>,
    pub overrides: MemoryOverrideStore,
    pub resolver: EffectiveDateResolver,
    pub simulation: SimulationControl,
    pub lifecycle: LifecycleOrchestrator,
    pub persistence: Persistence,
}

pub fn services() -> Services {
    let clock: Arc<ManualClock> = Arc::new(ManualClock::new(datetime!(2025-06-15 12:00 UTC)));
    let wall: Arc<dyn WallClock> = clock.clone();
    let resolver: EffectiveDateResolver = EffectiveDateResolver::new(Arc::clone(&wall));
    Services {
        overrides: MemoryOverrideStore::new(wall),
        simulation: SimulationControl::new(resolver.clone(), Arc::new(NoopInvalidator)),
        lifecycle: LifecycleOrchestrator::new(resolver.clone(), Arc::new(NoopInvalidator)),
        resolver,
        clock,
        persistence: Persistence::new_in_memory().expect("Failed to create test persistence"),
    }
}

pub fn persistence_with_operators() -> Persistence {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create test persistence");
    persistence
        .create_operator("admin", "Studio Admin", "admin-password", "Admin")
        .expect("Failed to create admin");
    persistence
        .create_operator("frontdesk", "Front Desk", "staff-password", "Staff")
        .expect("Failed to create staff");
    persistence
}
