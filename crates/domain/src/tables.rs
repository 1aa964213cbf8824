// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business tables and their foreign-key dependency order.
//!
//! The business schema forms a strict dependency DAG:
//!
//! ```text
//! instructors   rates
//!      \        /
//!       classes        members
//!            \         /
//!            enrollments
//!        /      |      \        \
//!  payments  ledger  enrollment_logs
//!      \
//!   instructor_payouts (also -> instructors, enrollments)
//! ```
//!
//! A parent row can only be removed once no child row references it, so
//! bulk deletion walks the DAG children first and creation walks it
//! parents first.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A table holding studio business data.
///
/// Operator and session tables are deliberately not listed here: they are
/// not business data and survive a wipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessTable {
    /// Instructor payouts (references instructors, enrollments and payments).
    InstructorPayouts,
    /// Enrollment history log.
    EnrollmentLogs,
    /// Finance ledger entries.
    LedgerEntries,
    /// Member payments against an enrollment.
    Payments,
    /// Member-to-class enrollment links.
    Enrollments,
    /// Member profiles.
    Members,
    /// Scheduled classes (references instructors and rates).
    Classes,
    /// Monthly fee definitions.
    Rates,
    /// Instructors.
    Instructors,
}

/// Coarse grouping of the wipe order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WipePhase {
    /// Payment, ledger, payout and log tables.
    Leaves,
    /// Enrollment-membership links.
    Enrollments,
    /// Member profiles.
    Members,
    /// Configuration tables: classes, rates, instructors.
    MasterData,
}

/// Canonical deletion order, children before parents.
///
/// Deleting in any other order risks the store rejecting a step because a
/// child row still references the parent being removed.
pub const WIPE_ORDER: [BusinessTable; 9] = [
    BusinessTable::InstructorPayouts,
    BusinessTable::EnrollmentLogs,
    BusinessTable::LedgerEntries,
    BusinessTable::Payments,
    BusinessTable::Enrollments,
    BusinessTable::Members,
    BusinessTable::Classes,
    BusinessTable::Rates,
    BusinessTable::Instructors,
];

impl BusinessTable {
    /// The SQL table name.
    #[must_use]
    pub const fn table_name(&self) -> &'static str {
        match self {
            Self::InstructorPayouts => "instructor_payouts",
            Self::EnrollmentLogs => "enrollment_logs",
            Self::LedgerEntries => "ledger_entries",
            Self::Payments => "payments",
            Self::Enrollments => "enrollments",
            Self::Members => "members",
            Self::Classes => "classes",
            Self::Rates => "rates",
            Self::Instructors => "instructors",
        }
    }

    /// The wipe phase this table belongs to.
    #[must_use]
    pub const fn phase(&self) -> WipePhase {
        match self {
            Self::InstructorPayouts | Self::EnrollmentLogs | Self::LedgerEntries | Self::Payments => {
                WipePhase::Leaves
            }
            Self::Enrollments => WipePhase::Enrollments,
            Self::Members => WipePhase::Members,
            Self::Classes | Self::Rates | Self::Instructors => WipePhase::MasterData,
        }
    }

    /// Tables holding foreign keys into this table.
    #[must_use]
    pub const fn dependents(&self) -> &'static [Self] {
        match self {
            Self::InstructorPayouts | Self::EnrollmentLogs | Self::LedgerEntries => &[],
            Self::Payments => &[Self::InstructorPayouts],
            Self::Enrollments => &[
                Self::InstructorPayouts,
                Self::EnrollmentLogs,
                Self::LedgerEntries,
                Self::Payments,
            ],
            Self::Members | Self::Classes => &[Self::Enrollments],
            Self::Rates => &[Self::Classes],
            Self::Instructors => &[Self::Classes, Self::InstructorPayouts],
        }
    }
}

impl std::fmt::Display for BusinessTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for BusinessTable {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WIPE_ORDER
            .iter()
            .copied()
            .find(|table| table.table_name() == s)
            .ok_or_else(|| DomainError::UnknownTable(s.to_string()))
    }
}
