// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod clock;
mod error;
mod invalidation;
mod lifecycle;
mod overrides;
mod resolver;
mod simulation;
mod store;

#[cfg(test)]
mod tests;

pub use clock::{ManualClock, SystemClock, WallClock};
pub use error::{CONTEXT_UNAVAILABLE_MESSAGE, CoreError};
pub use invalidation::{NoopInvalidator, ViewInvalidator, ViewScope};
pub use lifecycle::{LifecycleOrchestrator, ScenarioReport, SeedReport, WipeReport};
pub use overrides::{
    ContextError, MemoryOverrideStore, OverrideStore, SIMULATION_OVERRIDE_KEY,
    SIMULATION_OVERRIDE_LIFETIME,
};
pub use resolver::EffectiveDateResolver;
pub use simulation::{SimulationControl, SimulationStatus};
pub use store::{StoreClient, StoreError};
