// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Membership freeze windows.
//!
//! A freeze pauses a membership from its start date through its end date,
//! inclusive. A freeze without an end date lasts until it is lifted by staff.

use crate::types::EffectiveDate;
use serde::{Deserialize, Serialize};

/// The dates a membership is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeWindow {
    /// First frozen day.
    pub start: EffectiveDate,
    /// Last frozen day, or `None` for an open-ended freeze.
    pub end: Option<EffectiveDate>,
}

/// Where a freeze stands relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreezeState {
    /// The member has no freeze on record.
    NotFrozen,
    /// The freeze starts after `today`.
    Scheduled,
    /// `today` falls within the freeze.
    Active,
    /// The freeze ended before `today`.
    Ended,
}

impl FreezeWindow {
    /// Builds a window from stored optional dates.
    ///
    /// Returns `None` when there is no start date; an end date alone does
    /// not describe a freeze.
    #[must_use]
    pub const fn from_dates(
        start: Option<EffectiveDate>,
        end: Option<EffectiveDate>,
    ) -> Option<Self> {
        match start {
            Some(start) => Some(Self { start, end }),
            None => None,
        }
    }

    /// Whether the freeze has no end date.
    #[must_use]
    pub const fn is_indefinite(&self) -> bool {
        self.end.is_none()
    }

    /// Whether `day` falls inside the window.
    #[must_use]
    pub fn contains(&self, day: EffectiveDate) -> bool {
        self.start <= day && self.end.is_none_or(|end| day <= end)
    }

    /// State of this window on `today`.
    #[must_use]
    pub fn state_on(&self, today: EffectiveDate) -> FreezeState {
        if today < self.start {
            FreezeState::Scheduled
        } else if self.contains(today) {
            FreezeState::Active
        } else {
            FreezeState::Ended
        }
    }
}

/// Evaluates an optional freeze on `today`.
#[must_use]
pub fn evaluate_freeze(window: Option<&FreezeWindow>, today: EffectiveDate) -> FreezeState {
    window.map_or(FreezeState::NotFrozen, |w| w.state_on(today))
}
