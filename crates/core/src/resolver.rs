// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The single source of "today" for business logic.

use crate::clock::WallClock;
use crate::overrides::{OverrideStore, SIMULATION_OVERRIDE_KEY};
use std::sync::Arc;
use stepline_domain::EffectiveDate;
use time::PrimitiveDateTime;
use tracing::debug;

/// Resolves the effective date from the override store and the wall clock.
#[derive(Clone)]
pub struct EffectiveDateResolver {
    clock: Arc<dyn WallClock>,
}

impl EffectiveDateResolver {
    #[must_use]
    pub fn new(clock: Arc<dyn WallClock>) -> Self {
        Self { clock }
    }

    /// The real current date, ignoring any override.
    #[must_use]
    pub fn real_today(&self) -> EffectiveDate {
        EffectiveDate::new(self.clock.today())
    }

    /// The raw override value, if one is stored and unexpired.
    ///
    /// The value is returned unvalidated. Read failures count as absent.
    #[must_use]
    pub fn active_override(&self, overrides: &dyn OverrideStore) -> Option<String> {
        match overrides.read(SIMULATION_OVERRIDE_KEY) {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "Override store unreadable, using real date");
                None
            }
        }
    }

    /// The simulated date if a valid override is present, otherwise the
    /// real current date. Never fails.
    #[must_use]
    pub fn effective_today(&self, overrides: &dyn OverrideStore) -> EffectiveDate {
        let Some(raw) = self.active_override(overrides) else {
            return self.real_today();
        };

        match EffectiveDate::parse(&raw) {
            Ok(date) => date,
            Err(err) => {
                debug!(value = %raw, error = %err, "Ignoring malformed simulation override");
                self.real_today()
            }
        }
    }

    /// The effective date at midnight.
    #[must_use]
    pub fn effective_now(&self, overrides: &dyn OverrideStore) -> PrimitiveDateTime {
        self.effective_today(overrides).start_of_day()
    }
}

impl std::fmt::Debug for EffectiveDateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectiveDateResolver").finish_non_exhaustive()
    }
}
