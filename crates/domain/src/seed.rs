// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Demo studio data.
//!
//! Offsets are in days relative to the effective date the seed runs on.
//! Classes and enrollments refer to their parents by index into the
//! preceding arrays. [`SeedPlan`] resolves every offset to a date up front,
//! so a seed that cannot be dated fails before it writes anything.

use crate::billing::{BILLING_PERIOD_DAYS, next_due_date, payout_matures_on, period_end};
use crate::error::DomainError;
use crate::types::{EffectiveDate, MemberStatus};

/// A demo instructor.
#[derive(Debug, Clone, Copy)]
pub struct DemoInstructor {
    pub name: &'static str,
    pub email: &'static str,
}

/// A demo rate.
#[derive(Debug, Clone, Copy)]
pub struct DemoRate {
    pub name: &'static str,
    pub monthly_fee_cents: i64,
    pub instructor_share_percent: i32,
}

/// A demo class.
#[derive(Debug, Clone, Copy)]
pub struct DemoClass {
    pub name: &'static str,
    /// Index into [`DEMO_INSTRUCTORS`].
    pub instructor: usize,
    /// Index into [`DEMO_RATES`].
    pub rate: usize,
    pub weekday: &'static str,
    pub start_time: &'static str,
}

/// A demo member.
#[derive(Debug, Clone, Copy)]
pub struct DemoMember {
    pub full_name: &'static str,
    pub phone: &'static str,
    pub status: MemberStatus,
    pub joined_offset: i64,
    /// `(start offset, end offset)` of a freeze, if any.
    pub freeze_offsets: Option<(i64, Option<i64>)>,
}

/// A demo studio expense, not tied to an enrollment.
#[derive(Debug, Clone, Copy)]
pub struct DemoExpense {
    pub description: &'static str,
    pub amount_cents: i64,
    pub offset: i64,
}

/// A demo enrollment with a run of consecutive paid periods from its start.
#[derive(Debug, Clone, Copy)]
pub struct DemoEnrollment {
    /// Index into [`DEMO_MEMBERS`].
    pub member: usize,
    /// Index into [`DEMO_CLASSES`].
    pub class: usize,
    pub start_offset: i64,
    pub paid_periods: u32,
}

pub const DEMO_INSTRUCTORS: [DemoInstructor; 2] = [
    DemoInstructor {
        name: "Lucia Moreno",
        email: "lucia@stepline.example",
    },
    DemoInstructor {
        name: "Dmitri Volkov",
        email: "dmitri@stepline.example",
    },
];

pub const DEMO_RATES: [DemoRate; 2] = [
    DemoRate {
        name: "Standard Monthly",
        monthly_fee_cents: 9_500,
        instructor_share_percent: 40,
    },
    DemoRate {
        name: "Intensive Monthly",
        monthly_fee_cents: 15_000,
        instructor_share_percent: 50,
    },
];

pub const DEMO_CLASSES: [DemoClass; 3] = [
    DemoClass {
        name: "Salsa Beginners",
        instructor: 0,
        rate: 0,
        weekday: "Monday",
        start_time: "18:30",
    },
    DemoClass {
        name: "Bachata Intermediate",
        instructor: 0,
        rate: 1,
        weekday: "Wednesday",
        start_time: "19:30",
    },
    DemoClass {
        name: "Ballet Foundations",
        instructor: 1,
        rate: 0,
        weekday: "Saturday",
        start_time: "10:00",
    },
];

pub const DEMO_MEMBERS: [DemoMember; 4] = [
    DemoMember {
        full_name: "Ana Ribeiro",
        phone: "555-0101",
        status: MemberStatus::Active,
        joined_offset: -120,
        freeze_offsets: None,
    },
    DemoMember {
        full_name: "Ben Okafor",
        phone: "555-0102",
        status: MemberStatus::Active,
        joined_offset: -75,
        freeze_offsets: None,
    },
    DemoMember {
        full_name: "Chloe Martin",
        phone: "555-0103",
        status: MemberStatus::Frozen,
        joined_offset: -200,
        freeze_offsets: Some((-10, Some(20))),
    },
    DemoMember {
        full_name: "Diego Santos",
        phone: "555-0104",
        status: MemberStatus::Active,
        joined_offset: -15,
        freeze_offsets: None,
    },
];

pub const DEMO_ENROLLMENTS: [DemoEnrollment; 5] = [
    DemoEnrollment {
        member: 0,
        class: 0,
        start_offset: -120,
        paid_periods: 4,
    },
    DemoEnrollment {
        member: 0,
        class: 2,
        start_offset: -60,
        paid_periods: 2,
    },
    DemoEnrollment {
        member: 1,
        class: 1,
        start_offset: -75,
        paid_periods: 1,
    },
    DemoEnrollment {
        member: 2,
        class: 0,
        start_offset: -200,
        paid_periods: 7,
    },
    DemoEnrollment {
        member: 3,
        class: 2,
        start_offset: -15,
        paid_periods: 1,
    },
];

pub const DEMO_EXPENSES: [DemoExpense; 2] = [
    DemoExpense {
        description: "Studio rent",
        amount_cents: 180_000,
        offset: -25,
    },
    DemoExpense {
        description: "Sound system repair",
        amount_cents: 14_500,
        offset: -8,
    },
];

/// Resolved dates of one demo member, parallel to [`DEMO_MEMBERS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMember {
    pub joined_on: EffectiveDate,
    pub freeze_start_date: Option<EffectiveDate>,
    pub freeze_end_date: Option<EffectiveDate>,
}

/// One paid billing period and the payout it earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedPeriod {
    pub start: EffectiveDate,
    pub end: EffectiveDate,
    pub payout_matures_on: EffectiveDate,
}

/// Resolved dates of one demo enrollment, parallel to [`DEMO_ENROLLMENTS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEnrollment {
    pub start: EffectiveDate,
    pub next_due_date: EffectiveDate,
    pub periods: Vec<PlannedPeriod>,
}

/// Every date the demo seed writes, computed for one effective date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    pub effective_date: EffectiveDate,
    pub members: Vec<PlannedMember>,
    pub enrollments: Vec<PlannedEnrollment>,
    /// Parallel to [`DEMO_EXPENSES`].
    pub expense_dates: Vec<EffectiveDate>,
}

impl SeedPlan {
    /// Dates the demo studio around `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if any demo date falls outside the supported range.
    pub fn build(today: EffectiveDate) -> Result<Self, DomainError> {
        let members: Vec<PlannedMember> = DEMO_MEMBERS
            .iter()
            .map(|member| -> Result<PlannedMember, DomainError> {
                let (freeze_start_date, freeze_end_date) = match member.freeze_offsets {
                    Some((start, end)) => (
                        Some(today.add_days(start)?),
                        end.map(|days| today.add_days(days)).transpose()?,
                    ),
                    None => (None, None),
                };
                Ok(PlannedMember {
                    joined_on: today.add_days(member.joined_offset)?,
                    freeze_start_date,
                    freeze_end_date,
                })
            })
            .collect::<Result<_, DomainError>>()?;

        let enrollments: Vec<PlannedEnrollment> = DEMO_ENROLLMENTS
            .iter()
            .map(|enrollment| plan_enrollment(today, enrollment))
            .collect::<Result<_, DomainError>>()?;

        let expense_dates: Vec<EffectiveDate> = DEMO_EXPENSES
            .iter()
            .map(|expense| today.add_days(expense.offset))
            .collect::<Result<_, DomainError>>()?;

        Ok(Self {
            effective_date: today,
            members,
            enrollments,
            expense_dates,
        })
    }
}

fn plan_enrollment(
    today: EffectiveDate,
    enrollment: &DemoEnrollment,
) -> Result<PlannedEnrollment, DomainError> {
    let start: EffectiveDate = today.add_days(enrollment.start_offset)?;
    let periods: Vec<PlannedPeriod> = (0..i64::from(enrollment.paid_periods))
        .map(|period| -> Result<PlannedPeriod, DomainError> {
            let period_start: EffectiveDate = start.add_days(period * BILLING_PERIOD_DAYS)?;
            Ok(PlannedPeriod {
                start: period_start,
                end: period_end(period_start)?,
                payout_matures_on: payout_matures_on(period_start)?,
            })
        })
        .collect::<Result<_, DomainError>>()?;

    // Unpaid enrollments are due on their first day.
    let next_due: EffectiveDate = match periods.last() {
        Some(last) => next_due_date(last.end)?,
        None => start,
    };

    Ok(PlannedEnrollment {
        start,
        next_due_date: next_due,
        periods,
    })
}
