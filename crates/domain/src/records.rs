// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shapes of business rows to be inserted.
//!
//! Foreign keys are plain numeric ids returned by earlier inserts, which is
//! what forces callers to create parents before children.

use crate::tables::BusinessTable;
use crate::types::{EffectiveDate, EnrollmentStatus, LedgerKind, MemberStatus};

/// A new instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInstructor {
    pub name: String,
    pub email: Option<String>,
}

/// A new monthly rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRate {
    pub name: String,
    pub monthly_fee_cents: i64,
    /// Share of each payment owed to the class instructor, 0-100.
    pub instructor_share_percent: i32,
}

/// A new class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClass {
    pub name: String,
    pub instructor_id: i64,
    pub rate_id: i64,
    /// Day of week the class meets, e.g. `"Tuesday"`.
    pub weekday: String,
    /// Start time, `HH:MM`.
    pub start_time: String,
}

/// A new member profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub full_name: String,
    pub phone: Option<String>,
    pub status: MemberStatus,
    pub freeze_start_date: Option<EffectiveDate>,
    pub freeze_end_date: Option<EffectiveDate>,
    pub joined_on: EffectiveDate,
}

/// A new enrollment of a member in a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    pub member_id: i64,
    pub class_id: i64,
    pub start_date: EffectiveDate,
    pub next_due_date: EffectiveDate,
    pub status: EnrollmentStatus,
}

/// A new payment covering one billing period of an enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub enrollment_id: i64,
    pub amount_cents: i64,
    pub paid_on: EffectiveDate,
    pub period_start: EffectiveDate,
    pub period_end: EffectiveDate,
}

/// A new finance ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLedgerEntry {
    pub enrollment_id: Option<i64>,
    pub kind: LedgerKind,
    pub amount_cents: i64,
    pub entry_date: EffectiveDate,
    pub description: String,
}

/// A new instructor payout earned from a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayout {
    pub instructor_id: i64,
    pub enrollment_id: i64,
    pub payment_id: i64,
    pub amount_cents: i64,
    pub earned_on: EffectiveDate,
    pub matures_on: EffectiveDate,
}

/// A new enrollment log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollmentLog {
    pub enrollment_id: i64,
    pub event: String,
    pub event_date: EffectiveDate,
}

/// Any insertable business row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewRecord {
    Instructor(NewInstructor),
    Rate(NewRate),
    Class(NewClass),
    Member(NewMember),
    Enrollment(NewEnrollment),
    Payment(NewPayment),
    LedgerEntry(NewLedgerEntry),
    Payout(NewPayout),
    EnrollmentLog(NewEnrollmentLog),
}

impl NewRecord {
    /// The table this record is inserted into.
    #[must_use]
    pub const fn table(&self) -> BusinessTable {
        match self {
            Self::Instructor(_) => BusinessTable::Instructors,
            Self::Rate(_) => BusinessTable::Rates,
            Self::Class(_) => BusinessTable::Classes,
            Self::Member(_) => BusinessTable::Members,
            Self::Enrollment(_) => BusinessTable::Enrollments,
            Self::Payment(_) => BusinessTable::Payments,
            Self::LedgerEntry(_) => BusinessTable::LedgerEntries,
            Self::Payout(_) => BusinessTable::InstructorPayouts,
            Self::EnrollmentLog(_) => BusinessTable::EnrollmentLogs,
        }
    }

    /// Foreign keys this record carries, as `(parent table, parent id)`.
    #[must_use]
    pub fn references(&self) -> Vec<(BusinessTable, i64)> {
        match self {
            Self::Instructor(_) | Self::Rate(_) | Self::Member(_) => Vec::new(),
            Self::Class(c) => vec![
                (BusinessTable::Instructors, c.instructor_id),
                (BusinessTable::Rates, c.rate_id),
            ],
            Self::Enrollment(e) => vec![
                (BusinessTable::Members, e.member_id),
                (BusinessTable::Classes, e.class_id),
            ],
            Self::Payment(p) => vec![(BusinessTable::Enrollments, p.enrollment_id)],
            Self::LedgerEntry(l) => l
                .enrollment_id
                .map(|id| (BusinessTable::Enrollments, id))
                .into_iter()
                .collect(),
            Self::Payout(p) => vec![
                (BusinessTable::Instructors, p.instructor_id),
                (BusinessTable::Enrollments, p.enrollment_id),
                (BusinessTable::Payments, p.payment_id),
            ],
            Self::EnrollmentLog(l) => vec![(BusinessTable::Enrollments, l.enrollment_id)],
        }
    }
}

/// A filtered select for a single row id, used to reuse existing parent rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordLookup {
    /// Instructor with exactly this name.
    InstructorByName(String),
    /// Rate with exactly this name.
    RateByName(String),
    /// Class with exactly this name.
    ClassByName(String),
}

impl RecordLookup {
    /// The table searched by this lookup.
    #[must_use]
    pub const fn table(&self) -> BusinessTable {
        match self {
            Self::InstructorByName(_) => BusinessTable::Instructors,
            Self::RateByName(_) => BusinessTable::Rates,
            Self::ClassByName(_) => BusinessTable::Classes,
        }
    }
}
