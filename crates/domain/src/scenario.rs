// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Named test scenarios for freeze and payment edge cases.
//!
//! Every scenario is planned relative to the effective date it is generated
//! on, so a scenario created while simulating a past or future day is
//! consistent with that day.

use crate::billing::{next_due_date, period_end};
use crate::error::DomainError;
use crate::freeze::FreezeWindow;
use crate::types::{EffectiveDate, EnrollmentStatus, MemberStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Name of the instructor shared by generated scenarios.
pub const SCENARIO_INSTRUCTOR_NAME: &str = "Scenario Instructor";
/// Name of the rate shared by generated scenarios.
pub const SCENARIO_RATE_NAME: &str = "Scenario Monthly";
/// Name of the class shared by generated scenarios.
pub const SCENARIO_CLASS_NAME: &str = "Scenario Class";
/// Monthly fee of the scenario rate.
pub const SCENARIO_MONTHLY_FEE_CENTS: i64 = 12_000;
/// Instructor share of the scenario rate.
pub const SCENARIO_INSTRUCTOR_SHARE_PERCENT: i32 = 40;

/// A predefined pattern of test data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    /// Frozen from today with no end date.
    IndefiniteFreeze,
    /// Frozen for a bounded window around today.
    TimeBoundedFreeze,
    /// Active today, with a freeze starting in the future.
    FutureFreeze,
    /// Frozen today while owing a payment that predates the freeze.
    DelinquentFreeze,
}

impl ScenarioKind {
    /// Every scenario kind.
    pub const ALL: [Self; 4] = [
        Self::IndefiniteFreeze,
        Self::TimeBoundedFreeze,
        Self::FutureFreeze,
        Self::DelinquentFreeze,
    ];

    /// The external name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IndefiniteFreeze => "indefinite-freeze",
            Self::TimeBoundedFreeze => "time-bounded-freeze",
            Self::FutureFreeze => "future-freeze",
            Self::DelinquentFreeze => "delinquent-freeze",
        }
    }

    /// External names of every kind.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }

    /// Plans this scenario's records relative to `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if any planned date falls outside the supported range.
    pub fn plan(&self, today: EffectiveDate) -> Result<ScenarioPlan, DomainError> {
        match self {
            Self::IndefiniteFreeze => ScenarioPlan::build(
                *self,
                "Scenario: Indefinite Freeze",
                MemberStatus::Frozen,
                FreezeWindow {
                    start: today,
                    end: None,
                },
                EnrollmentStatus::Frozen,
                today.add_days(-60)?,
                today.add_days(-30)?,
            ),
            Self::TimeBoundedFreeze => ScenarioPlan::build(
                *self,
                "Scenario: Time-Bounded Freeze",
                MemberStatus::Frozen,
                FreezeWindow {
                    start: today.add_days(-7)?,
                    end: Some(today.add_days(21)?),
                },
                EnrollmentStatus::Frozen,
                today.add_days(-67)?,
                today.add_days(-37)?,
            ),
            Self::FutureFreeze => ScenarioPlan::build(
                *self,
                "Scenario: Future Freeze",
                MemberStatus::Active,
                FreezeWindow {
                    start: today.add_days(7)?,
                    end: Some(today.add_days(37)?),
                },
                EnrollmentStatus::Active,
                today.add_days(-20)?,
                today.add_days(-20)?,
            ),
            Self::DelinquentFreeze => ScenarioPlan::build(
                *self,
                "Scenario: Delinquent Freeze",
                MemberStatus::Frozen,
                FreezeWindow {
                    start: today.add_days(-5)?,
                    end: Some(today.add_days(25)?),
                },
                EnrollmentStatus::Frozen,
                today.add_days(-90)?,
                today.add_days(-60)?,
            ),
        }
    }
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "indefinite-freeze" => Ok(Self::IndefiniteFreeze),
            "time-bounded-freeze" => Ok(Self::TimeBoundedFreeze),
            "future-freeze" => Ok(Self::FutureFreeze),
            "delinquent-freeze" => Ok(Self::DelinquentFreeze),
            _ => Err(DomainError::UnknownScenarioKind {
                requested: s.to_string(),
            }),
        }
    }
}

/// The dated records a scenario produces: one member, one enrollment and
/// the single payment that leaves the enrollment in the intended standing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioPlan {
    pub kind: ScenarioKind,
    pub member_name: String,
    pub member_status: MemberStatus,
    pub freeze: FreezeWindow,
    pub enrollment_status: EnrollmentStatus,
    /// Also the member's join date.
    pub enrollment_start: EffectiveDate,
    /// The payment is made on the first day of the period it covers.
    pub paid_period_start: EffectiveDate,
    pub paid_period_end: EffectiveDate,
    pub next_due_date: EffectiveDate,
}

impl ScenarioPlan {
    fn build(
        kind: ScenarioKind,
        member_name: &str,
        member_status: MemberStatus,
        freeze: FreezeWindow,
        enrollment_status: EnrollmentStatus,
        enrollment_start: EffectiveDate,
        paid_period_start: EffectiveDate,
    ) -> Result<Self, DomainError> {
        let paid_period_end: EffectiveDate = period_end(paid_period_start)?;
        Ok(Self {
            kind,
            member_name: member_name.to_string(),
            member_status,
            freeze,
            enrollment_status,
            enrollment_start,
            paid_period_start,
            paid_period_end,
            next_due_date: next_due_date(paid_period_end)?,
        })
    }
}
