// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rows returned to callers.
//!
//! Dates are kept as the stored `YYYY-MM-DD` strings; interpreting them
//! against the effective date is the caller's job.

use serde::{Deserialize, Serialize};

/// A system operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorData {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    /// `"Admin"` or `"Staff"`.
    pub role: String,
    pub is_disabled: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// An operator session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    /// ISO 8601 expiry instant.
    pub expires_at: String,
}

/// A member profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberData {
    pub member_id: i64,
    pub full_name: String,
    pub phone: Option<String>,
    pub status: String,
    pub freeze_start_date: Option<String>,
    pub freeze_end_date: Option<String>,
    pub joined_on: String,
}

/// An enrollment with the name of its class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentData {
    pub enrollment_id: i64,
    pub member_id: i64,
    pub class_id: i64,
    pub class_name: String,
    pub start_date: String,
    pub next_due_date: String,
    pub status: String,
}

/// An instructor payout with the instructor's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutData {
    pub payout_id: i64,
    pub instructor_id: i64,
    pub instructor_name: String,
    pub enrollment_id: i64,
    pub payment_id: i64,
    pub amount_cents: i64,
    pub earned_on: String,
    pub matures_on: String,
    pub paid_out: bool,
}
