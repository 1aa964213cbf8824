// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Stepline studio system.
//!
//! Handlers here are transport-agnostic: they take the persistence adapter,
//! the core services, the calling client's override store and the
//! authenticated actor, and return plain response types or an [`ApiError`].

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    clear_simulation_date, generate_scenario, list_members, list_payouts, login, logout,
    seed_demo_data, set_simulation_date, simulation_status, table_counts,
    wipe_all_business_data,
};
pub use request_response::{
    EnrollmentInfo, ListMembersResponse, ListPayoutsResponse, LoginRequest, LoginResponse,
    MemberInfo, PayoutInfo, ScenarioResponse, SeedResponse, SetSimulationDateRequest,
    SimulationStatusResponse, TableCountsResponse, TableRows, WipeResponse,
};
