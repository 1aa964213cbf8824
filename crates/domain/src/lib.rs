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

mod billing;
mod error;
mod freeze;
mod records;
mod scenario;
mod seed;
mod tables;
mod types;

#[cfg(test)]
mod tests;

pub use billing::{
    BILLING_PERIOD_DAYS, PAYOUT_MATURITY_DAYS, PaymentStanding, PayoutMaturity, evaluate_payout,
    evaluate_standing, instructor_share, next_due_date, payout_matures_on, period_end,
};
pub use error::DomainError;
pub use freeze::{FreezeState, FreezeWindow, evaluate_freeze};
pub use records::{
    NewClass, NewEnrollment, NewEnrollmentLog, NewInstructor, NewLedgerEntry, NewMember,
    NewPayment, NewPayout, NewRate, NewRecord, RecordLookup,
};
pub use scenario::{
    SCENARIO_CLASS_NAME, SCENARIO_INSTRUCTOR_NAME, SCENARIO_INSTRUCTOR_SHARE_PERCENT,
    SCENARIO_MONTHLY_FEE_CENTS, SCENARIO_RATE_NAME, ScenarioKind, ScenarioPlan,
};
pub use seed::{
    DEMO_CLASSES, DEMO_ENROLLMENTS, DEMO_EXPENSES, DEMO_INSTRUCTORS, DEMO_MEMBERS, DEMO_RATES,
    DemoClass, DemoEnrollment, DemoExpense, DemoInstructor, DemoMember, DemoRate,
    PlannedEnrollment, PlannedMember, PlannedPeriod, SeedPlan,
};
pub use tables::{BusinessTable, WIPE_ORDER, WipePhase};
pub use types::{EffectiveDate, EnrollmentStatus, LedgerKind, MemberStatus};
