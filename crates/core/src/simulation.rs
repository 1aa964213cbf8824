// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Setting and clearing the simulated date.
//!
//! ## Invariants
//!
//! - The override is stored verbatim; validation happens when it is read
//! - A successful set or clear invalidates date-dependent views
//! - Clearing an absent override succeeds

use crate::error::CoreError;
use crate::invalidation::{ViewInvalidator, ViewScope};
use crate::overrides::{OverrideStore, SIMULATION_OVERRIDE_KEY, SIMULATION_OVERRIDE_LIFETIME};
use crate::resolver::EffectiveDateResolver;
use std::sync::Arc;
use stepline_domain::EffectiveDate;
use tracing::{error, info};

/// Whether a simulation is in effect, and which date business logic sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationStatus {
    /// An unexpired override is stored, valid or not.
    pub is_simulating: bool,
    pub effective_date: EffectiveDate,
}

/// Operator-facing control over the simulated date.
#[derive(Clone)]
pub struct SimulationControl {
    resolver: EffectiveDateResolver,
    invalidator: Arc<dyn ViewInvalidator>,
}

impl SimulationControl {
    #[must_use]
    pub fn new(resolver: EffectiveDateResolver, invalidator: Arc<dyn ViewInvalidator>) -> Self {
        Self {
            resolver,
            invalidator,
        }
    }

    #[must_use]
    pub const fn resolver(&self) -> &EffectiveDateResolver {
        &self.resolver
    }

    /// Stores `date` as the simulated date for this client.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ContextUnavailable` if the override cannot be
    /// written.
    pub fn set_simulation_date(
        &self,
        overrides: &dyn OverrideStore,
        date: &str,
    ) -> Result<String, CoreError> {
        overrides
            .write(SIMULATION_OVERRIDE_KEY, date, SIMULATION_OVERRIDE_LIFETIME)
            .map_err(|err| {
                error!(error = %err, date, "Failed to store simulation date");
                CoreError::ContextUnavailable
            })?;

        info!(date, "Simulation date set");
        self.invalidator.invalidate(ViewScope::DateDependent);
        Ok(date.to_string())
    }

    /// Removes the simulated date for this client.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ContextUnavailable` if the override cannot be
    /// removed.
    pub fn clear_simulation_date(&self, overrides: &dyn OverrideStore) -> Result<(), CoreError> {
        overrides.remove(SIMULATION_OVERRIDE_KEY).map_err(|err| {
            error!(error = %err, "Failed to clear simulation date");
            CoreError::ContextUnavailable
        })?;

        info!("Simulation date cleared");
        self.invalidator.invalidate(ViewScope::DateDependent);
        Ok(())
    }

    #[must_use]
    pub fn simulation_status(&self, overrides: &dyn OverrideStore) -> SimulationStatus {
        SimulationStatus {
            is_simulating: self.resolver.active_override(overrides).is_some(),
            effective_date: self.resolver.effective_today(overrides),
        }
    }
}

impl std::fmt::Debug for SimulationControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationControl")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
