// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Every handler takes the override store of the calling client explicitly.
//! Handlers for administrative operations check authorization before
//! touching any state.

use std::collections::HashMap;
use stepline::{
    EffectiveDateResolver, LifecycleOrchestrator, OverrideStore, ScenarioReport, SeedReport,
    SimulationControl, SimulationStatus, WipeReport,
};
use stepline_domain::{
    BusinessTable, EffectiveDate, FreezeWindow, PayoutMaturity, evaluate_freeze, evaluate_payout,
    evaluate_standing,
};
use stepline_persistence::{
    EnrollmentData, MemberData, OperatorData, PayoutData, Persistence, SessionData,
};
use tracing::{debug, error, info};

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_persistence_error};
use crate::request_response::{
    EnrollmentInfo, ListMembersResponse, ListPayoutsResponse, LoginRequest, LoginResponse,
    MemberInfo, PayoutInfo, ScenarioResponse, SeedResponse, SetSimulationDateRequest,
    SimulationStatusResponse, TableCountsResponse, TableRows, WipeResponse,
};

fn table_rows(rows: &[(BusinessTable, usize)]) -> Vec<TableRows> {
    rows.iter()
        .map(|(table, rows)| TableRows {
            table: table.to_string(),
            rows: *rows,
        })
        .collect()
}

/// Parses a date read back from the database.
///
/// A malformed stored date is an internal error, not bad input.
fn parse_stored_date(field: &str, value: &str) -> Result<EffectiveDate, ApiError> {
    EffectiveDate::parse(value).map_err(|e| {
        error!(field, value, error = %e, "Stored date is malformed");
        ApiError::Internal {
            message: format!("Stored {field} is invalid: {e}"),
        }
    })
}

fn parse_stored_optional_date(
    field: &str,
    value: Option<&str>,
) -> Result<Option<EffectiveDate>, ApiError> {
    value.map(|v| parse_stored_date(field, v)).transpose()
}

// ============================================================================
// Sessions
// ============================================================================

/// Logs an operator in.
///
/// # Errors
///
/// Returns an error if the credentials are rejected or the session cannot
/// be stored.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, _authenticated_actor, operator): (
        String,
        AuthenticatedActor,
        OperatorData,
    ) = AuthenticationService::login(persistence, &request.login_name, &request.password)?;

    let session: Option<SessionData> = persistence
        .get_session_by_token(&session_token)
        .map_err(translate_persistence_error)?;

    let expires_at: String = session
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Session not found after creation"),
        })?
        .expires_at;

    Ok(LoginResponse {
        session_token,
        login_name: operator.login_name,
        display_name: operator.display_name,
        role: operator.role,
        expires_at,
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

// ============================================================================
// Simulation
// ============================================================================

/// Reports whether a simulated date is in effect for this client.
#[must_use]
pub fn simulation_status(
    control: &SimulationControl,
    overrides: &dyn OverrideStore,
) -> SimulationStatusResponse {
    let status: SimulationStatus = control.simulation_status(overrides);
    SimulationStatusResponse {
        is_simulating: status.is_simulating,
        effective_date: status.effective_date.to_string(),
        real_date: control.resolver().real_today().to_string(),
        simulated_date: control.resolver().active_override(overrides),
    }
}

/// Sets the simulated date for this client.
///
/// The date is stored as given. A value that is not a valid calendar date
/// is ignored when the effective date is resolved.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the override cannot
/// be stored.
pub fn set_simulation_date(
    control: &SimulationControl,
    overrides: &dyn OverrideStore,
    actor: &AuthenticatedActor,
    request: &SetSimulationDateRequest,
) -> Result<SimulationStatusResponse, ApiError> {
    AuthorizationService::authorize_simulation_control(actor)?;

    let accepted: String = control
        .set_simulation_date(overrides, &request.date)
        .map_err(translate_core_error)?;
    info!(actor = %actor.id, date = %accepted, "Simulation date set by operator");

    Ok(simulation_status(control, overrides))
}

/// Clears the simulated date for this client.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the override cannot
/// be removed.
pub fn clear_simulation_date(
    control: &SimulationControl,
    overrides: &dyn OverrideStore,
    actor: &AuthenticatedActor,
) -> Result<SimulationStatusResponse, ApiError> {
    AuthorizationService::authorize_simulation_control(actor)?;

    control
        .clear_simulation_date(overrides)
        .map_err(translate_core_error)?;
    info!(actor = %actor.id, "Simulation date cleared by operator");

    Ok(simulation_status(control, overrides))
}

// ============================================================================
// Data lifecycle
// ============================================================================

/// Deletes every business row.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, or
/// `ApiError::OperationIncomplete` naming the completed steps if a delete
/// is rejected.
pub fn wipe_all_business_data(
    lifecycle: &LifecycleOrchestrator,
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<WipeResponse, ApiError> {
    AuthorizationService::authorize_wipe(actor)?;
    info!(actor = %actor.id, "Wipe requested");

    let report: WipeReport = lifecycle
        .wipe_all_business_data(persistence)
        .map_err(translate_core_error)?;

    let total_rows: usize = report.total_rows();
    Ok(WipeResponse {
        deleted: table_rows(&report.deleted),
        total_rows,
        message: format!("Deleted {total_rows} rows from {} tables", report.deleted.len()),
    })
}

/// Seeds the demo studio on the effective date.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, or
/// `ApiError::OperationIncomplete` if an insert is rejected.
pub fn seed_demo_data(
    lifecycle: &LifecycleOrchestrator,
    persistence: &mut Persistence,
    overrides: &dyn OverrideStore,
    actor: &AuthenticatedActor,
) -> Result<SeedResponse, ApiError> {
    AuthorizationService::authorize_seed(actor)?;
    info!(actor = %actor.id, "Demo seed requested");

    let report: SeedReport = lifecycle
        .seed_demo_data(persistence, overrides)
        .map_err(translate_core_error)?;

    Ok(SeedResponse {
        effective_date: report.effective_date.to_string(),
        created: table_rows(&report.created),
        message: format!("Demo data seeded for {}", report.effective_date),
    })
}

/// Generates the named scenario on the effective date.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, `ApiError::InvalidInput`
/// for an unknown kind, or `ApiError::OperationIncomplete` if a store call
/// is rejected.
pub fn generate_scenario(
    lifecycle: &LifecycleOrchestrator,
    persistence: &mut Persistence,
    overrides: &dyn OverrideStore,
    actor: &AuthenticatedActor,
    kind: &str,
) -> Result<ScenarioResponse, ApiError> {
    AuthorizationService::authorize_generate_scenario(actor)?;
    info!(actor = %actor.id, kind, "Scenario requested");

    let report: ScenarioReport = lifecycle
        .generate_scenario(persistence, overrides, kind)
        .map_err(translate_core_error)?;

    Ok(ScenarioResponse {
        kind: report.kind.to_string(),
        effective_date: report.effective_date.to_string(),
        member_id: report.member_id,
        enrollment_id: report.enrollment_id,
        payment_id: report.payment_id,
        created: table_rows(&report.created),
        message: format!(
            "Scenario {} generated for {}",
            report.kind, report.effective_date
        ),
    })
}

/// Row counts of every business table.
///
/// # Errors
///
/// Returns an error if a count fails.
pub fn table_counts(persistence: &mut Persistence) -> Result<TableCountsResponse, ApiError> {
    let counts: Vec<(BusinessTable, usize)> =
        LifecycleOrchestrator::table_counts(persistence).map_err(translate_core_error)?;

    Ok(TableCountsResponse {
        total_rows: counts.iter().map(|(_, rows)| rows).sum(),
        counts: table_rows(&counts),
    })
}

// ============================================================================
// Listings
// ============================================================================

/// Lists members with freeze state and enrollment standing on the
/// effective date.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is malformed.
pub fn list_members(
    persistence: &mut Persistence,
    resolver: &EffectiveDateResolver,
    overrides: &dyn OverrideStore,
) -> Result<ListMembersResponse, ApiError> {
    let today: EffectiveDate = resolver.effective_today(overrides);
    let members: Vec<MemberData> = persistence
        .list_members()
        .map_err(translate_persistence_error)?;
    let enrollments: Vec<EnrollmentData> = persistence
        .list_enrollments()
        .map_err(translate_persistence_error)?;

    let mut windows: HashMap<i64, Option<FreezeWindow>> = HashMap::with_capacity(members.len());
    for member in &members {
        let window: Option<FreezeWindow> = FreezeWindow::from_dates(
            parse_stored_optional_date("freeze_start_date", member.freeze_start_date.as_deref())?,
            parse_stored_optional_date("freeze_end_date", member.freeze_end_date.as_deref())?,
        );
        windows.insert(member.member_id, window);
    }

    let mut by_member: HashMap<i64, Vec<EnrollmentInfo>> = HashMap::new();
    for enrollment in enrollments {
        let next_due: EffectiveDate =
            parse_stored_date("next_due_date", &enrollment.next_due_date)?;
        let window: Option<&FreezeWindow> = windows
            .get(&enrollment.member_id)
            .and_then(Option::as_ref);
        by_member
            .entry(enrollment.member_id)
            .or_default()
            .push(EnrollmentInfo {
                enrollment_id: enrollment.enrollment_id,
                class_name: enrollment.class_name,
                start_date: enrollment.start_date,
                next_due_date: enrollment.next_due_date,
                status: enrollment.status,
                standing: evaluate_standing(next_due, window, today),
            });
    }

    let members: Vec<MemberInfo> = members
        .into_iter()
        .map(|member| {
            let window: Option<&FreezeWindow> =
                windows.get(&member.member_id).and_then(Option::as_ref);
            MemberInfo {
                member_id: member.member_id,
                freeze_state: evaluate_freeze(window, today),
                enrollments: by_member.remove(&member.member_id).unwrap_or_default(),
                full_name: member.full_name,
                phone: member.phone,
                status: member.status,
                freeze_start_date: member.freeze_start_date,
                freeze_end_date: member.freeze_end_date,
            }
        })
        .collect();

    debug!(effective_date = %today, members = members.len(), "Listed members");
    Ok(ListMembersResponse {
        effective_date: today.to_string(),
        members,
    })
}

/// Lists instructor payouts with maturity on the effective date.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is malformed.
pub fn list_payouts(
    persistence: &mut Persistence,
    resolver: &EffectiveDateResolver,
    overrides: &dyn OverrideStore,
) -> Result<ListPayoutsResponse, ApiError> {
    let today: EffectiveDate = resolver.effective_today(overrides);
    let rows: Vec<PayoutData> = persistence
        .list_payouts()
        .map_err(translate_persistence_error)?;

    let mut payable_cents: i64 = 0;
    let mut pending_cents: i64 = 0;
    let mut payouts: Vec<PayoutInfo> = Vec::with_capacity(rows.len());
    for row in rows {
        let matures_on: EffectiveDate = parse_stored_date("matures_on", &row.matures_on)?;
        let maturity: PayoutMaturity = evaluate_payout(matures_on, today);
        if !row.paid_out {
            match maturity {
                PayoutMaturity::Mature => payable_cents += row.amount_cents,
                PayoutMaturity::Pending { .. } => pending_cents += row.amount_cents,
            }
        }
        payouts.push(PayoutInfo {
            payout_id: row.payout_id,
            instructor_id: row.instructor_id,
            instructor_name: row.instructor_name,
            enrollment_id: row.enrollment_id,
            amount_cents: row.amount_cents,
            earned_on: row.earned_on,
            matures_on: row.matures_on,
            paid_out: row.paid_out,
            maturity,
        });
    }

    debug!(effective_date = %today, payouts = payouts.len(), "Listed payouts");
    Ok(ListPayoutsResponse {
        effective_date: today.to_string(),
        payouts,
        payable_cents,
        pending_cents,
    })
}
