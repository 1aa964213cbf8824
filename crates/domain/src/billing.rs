// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Enrollment billing and instructor payout maturity.
//!
//! ## Invariants
//!
//! - A billing period is 30 days, inclusive of its first and last day
//! - The next payment is due the day after the paid period ends
//! - A due date that falls inside an active freeze is suspended
//! - A due date that predates the freeze stays owed
//! - A payout matures 30 days after it was earned

use crate::error::DomainError;
use crate::freeze::{FreezeState, FreezeWindow};
use crate::types::EffectiveDate;
use serde::{Deserialize, Serialize};

/// Length of one billing period in days.
pub const BILLING_PERIOD_DAYS: i64 = 30;

/// Days between earning a payout and it becoming payable.
pub const PAYOUT_MATURITY_DAYS: i64 = 30;

/// Payment standing of an enrollment on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentStanding {
    /// Paid ahead; the next payment is due in `due_in_days` days.
    Current {
        /// Days until the due date.
        due_in_days: i64,
    },
    /// The next payment is due today.
    DueToday,
    /// The due date has passed without payment.
    Overdue {
        /// Days since the due date.
        days_overdue: i64,
    },
    /// Billing is suspended by an active freeze.
    Frozen,
}

/// Maturity of an instructor payout on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PayoutMaturity {
    /// Not yet payable.
    Pending {
        /// Days until the payout matures.
        days_remaining: i64,
    },
    /// Payable.
    Mature,
}

/// Last day of the billing period starting on `period_start`.
///
/// # Errors
///
/// Returns an error if the date arithmetic overflows.
pub fn period_end(period_start: EffectiveDate) -> Result<EffectiveDate, DomainError> {
    period_start.add_days(BILLING_PERIOD_DAYS - 1)
}

/// Due date of the payment following a period that ends on `paid_through`.
///
/// # Errors
///
/// Returns an error if the date arithmetic overflows.
pub fn next_due_date(paid_through: EffectiveDate) -> Result<EffectiveDate, DomainError> {
    paid_through.add_days(1)
}

/// Evaluates the payment standing of an enrollment on `today`.
///
/// # Arguments
///
/// * `next_due` - The enrollment's next due date
/// * `freeze` - The member's freeze window, if any
/// * `today` - The effective date
#[must_use]
pub fn evaluate_standing(
    next_due: EffectiveDate,
    freeze: Option<&FreezeWindow>,
    today: EffectiveDate,
) -> PaymentStanding {
    if let Some(window) = freeze
        && window.state_on(today) == FreezeState::Active
        && next_due >= window.start
    {
        return PaymentStanding::Frozen;
    }

    match next_due.cmp(&today) {
        std::cmp::Ordering::Greater => PaymentStanding::Current {
            due_in_days: next_due.days_since(today),
        },
        std::cmp::Ordering::Equal => PaymentStanding::DueToday,
        std::cmp::Ordering::Less => PaymentStanding::Overdue {
            days_overdue: today.days_since(next_due),
        },
    }
}

/// Date on which a payout earned on `earned_on` becomes payable.
///
/// # Errors
///
/// Returns an error if the date arithmetic overflows.
pub fn payout_matures_on(earned_on: EffectiveDate) -> Result<EffectiveDate, DomainError> {
    earned_on.add_days(PAYOUT_MATURITY_DAYS)
}

/// Evaluates payout maturity on `today`.
#[must_use]
pub fn evaluate_payout(matures_on: EffectiveDate, today: EffectiveDate) -> PayoutMaturity {
    if matures_on <= today {
        PayoutMaturity::Mature
    } else {
        PayoutMaturity::Pending {
            days_remaining: matures_on.days_since(today),
        }
    }
}

/// The instructor's share of a payment, rounded down to the cent.
#[must_use]
pub fn instructor_share(amount_cents: i64, share_percent: i32) -> i64 {
    amount_cents * i64::from(share_percent) / 100
}
