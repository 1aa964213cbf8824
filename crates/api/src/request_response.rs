// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross the boundary as `YYYY-MM-DD` strings.

use stepline_domain::{FreezeState, PaymentStanding, PayoutMaturity};

/// API request to log in and create a session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// The operator login name.
    pub login_name: String,
    /// The operator password.
    pub password: String,
}

/// API response for successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The session token.
    pub session_token: String,
    /// The operator's login name.
    pub login_name: String,
    /// The operator's display name.
    pub display_name: String,
    /// The operator's role.
    pub role: String,
    /// When the session expires (ISO 8601).
    pub expires_at: String,
}

/// API request to set the simulated date.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetSimulationDateRequest {
    /// The date to simulate. Stored as given.
    pub date: String,
}

/// API response describing the simulation state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimulationStatusResponse {
    /// Whether an override is stored for this client.
    pub is_simulating: bool,
    /// The date business logic uses.
    pub effective_date: String,
    /// The real current date in the studio timezone.
    pub real_date: String,
    /// The stored override, when one is set.
    pub simulated_date: Option<String>,
}

/// Rows affected in one business table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TableRows {
    /// The table name.
    pub table: String,
    /// The number of rows.
    pub rows: usize,
}

/// API response for a completed wipe.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WipeResponse {
    /// Rows deleted per table, in deletion order.
    pub deleted: Vec<TableRows>,
    /// Total rows deleted.
    pub total_rows: usize,
    /// A success message.
    pub message: String,
}

/// API response for completed demo seeding.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SeedResponse {
    /// The date the demo data is anchored on.
    pub effective_date: String,
    /// Rows created per table.
    pub created: Vec<TableRows>,
    /// A success message.
    pub message: String,
}

/// API response for a generated scenario.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScenarioResponse {
    /// The scenario kind.
    pub kind: String,
    /// The date the scenario is anchored on.
    pub effective_date: String,
    /// The created member.
    pub member_id: i64,
    /// The created enrollment.
    pub enrollment_id: i64,
    /// The created payment.
    pub payment_id: i64,
    /// Rows created per table.
    pub created: Vec<TableRows>,
    /// A success message.
    pub message: String,
}

/// API response listing row counts of every business table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TableCountsResponse {
    /// Counts in wipe order.
    pub counts: Vec<TableRows>,
    /// Sum of all counts.
    pub total_rows: usize,
}

/// An enrollment with its standing on the effective date.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EnrollmentInfo {
    pub enrollment_id: i64,
    pub class_name: String,
    pub start_date: String,
    pub next_due_date: String,
    pub status: String,
    pub standing: PaymentStanding,
}

/// A member with freeze state and enrollments on the effective date.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemberInfo {
    pub member_id: i64,
    pub full_name: String,
    pub phone: Option<String>,
    pub status: String,
    pub freeze_start_date: Option<String>,
    pub freeze_end_date: Option<String>,
    pub freeze_state: FreezeState,
    pub enrollments: Vec<EnrollmentInfo>,
}

/// API response listing members.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListMembersResponse {
    /// The date standings were evaluated on.
    pub effective_date: String,
    pub members: Vec<MemberInfo>,
}

/// An instructor payout with its maturity on the effective date.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PayoutInfo {
    pub payout_id: i64,
    pub instructor_id: i64,
    pub instructor_name: String,
    pub enrollment_id: i64,
    pub amount_cents: i64,
    pub earned_on: String,
    pub matures_on: String,
    pub paid_out: bool,
    pub maturity: PayoutMaturity,
}

/// API response listing payouts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListPayoutsResponse {
    /// The date maturity was evaluated on.
    pub effective_date: String,
    pub payouts: Vec<PayoutInfo>,
    /// Sum of unpaid payouts that are mature.
    pub payable_cents: i64,
    /// Sum of unpaid payouts that are still pending.
    pub pending_cents: i64,
}
