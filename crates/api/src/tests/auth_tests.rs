// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login, session validation, and role checks.

use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

use crate::{
    ApiError, AuthError, AuthenticationService, AuthorizationService, LoginRequest, Role, login,
    logout,
};

use super::helpers::{create_test_admin, create_test_staff, persistence_with_operators};

fn request(login_name: &str, password: &str) -> LoginRequest {
    LoginRequest {
        login_name: login_name.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn test_login_creates_session() {
    let mut persistence = persistence_with_operators();

    let response = login(&mut persistence, &request("Admin", "admin-password")).unwrap();

    assert_eq!(response.login_name, "ADMIN");
    assert_eq!(response.role, "Admin");
    assert!(response.session_token.starts_with("session_"));
    let session = persistence
        .get_session_by_token(&response.session_token)
        .unwrap()
        .unwrap();
    assert_eq!(session.expires_at, response.expires_at);
}

#[test]
fn test_session_expires_after_eight_hours() {
    let mut persistence = persistence_with_operators();
    let before = OffsetDateTime::now_utc();

    let response = login(&mut persistence, &request("admin", "admin-password")).unwrap();

    let expires_at = OffsetDateTime::parse(&response.expires_at, &Iso8601::DEFAULT).unwrap();
    let lifetime = expires_at - before;
    assert!(lifetime >= AuthenticationService::SESSION_LIFETIME - time::Duration::minutes(1));
    assert!(lifetime <= AuthenticationService::SESSION_LIFETIME + time::Duration::minutes(1));
}

#[test]
fn test_login_rejects_wrong_password() {
    let mut persistence = persistence_with_operators();

    let result = login(&mut persistence, &request("admin", "nope"));

    assert!(matches!(result, Err(ApiError::AuthenticationFailed { .. })));
    assert_eq!(persistence.count_sessions().unwrap(), 0);
}

#[test]
fn test_login_rejects_unknown_operator() {
    let mut persistence = persistence_with_operators();

    let result = login(&mut persistence, &request("ghost", "admin-password"));

    assert!(matches!(result, Err(ApiError::AuthenticationFailed { .. })));
}

#[test]
fn test_validate_session_returns_actor_with_role() {
    let mut persistence = persistence_with_operators();
    let response = login(&mut persistence, &request("frontdesk", "staff-password")).unwrap();

    let (actor, operator) =
        AuthenticationService::validate_session(&mut persistence, &response.session_token)
            .unwrap();

    assert_eq!(actor.role, Role::Staff);
    assert_eq!(actor.id, "FRONTDESK");
    assert_eq!(operator.display_name, "Front Desk");
}

#[test]
fn test_validate_unknown_session_fails() {
    let mut persistence = persistence_with_operators();

    let result = AuthenticationService::validate_session(&mut persistence, "session_missing");

    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_expired_session_is_rejected_and_deleted() {
    let mut persistence = persistence_with_operators();
    let operator = persistence.get_operator_by_login("admin").unwrap().unwrap();
    persistence
        .create_session(
            "session_old",
            operator.operator_id,
            "2020-01-01T00:00:00.000000000Z",
        )
        .unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, "session_old");

    assert_eq!(
        result,
        Err(AuthError::AuthenticationFailed {
            reason: String::from("Session expired")
        })
    );
    assert!(
        persistence
            .get_session_by_token("session_old")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_logout_deletes_session() {
    let mut persistence = persistence_with_operators();
    let response = login(&mut persistence, &request("admin", "admin-password")).unwrap();

    logout(&mut persistence, &response.session_token).unwrap();

    assert!(
        AuthenticationService::validate_session(&mut persistence, &response.session_token)
            .is_err()
    );
}

#[test]
fn test_admin_passes_every_admin_check() {
    let admin = create_test_admin();

    assert!(AuthorizationService::authorize_simulation_control(&admin).is_ok());
    assert!(AuthorizationService::authorize_wipe(&admin).is_ok());
    assert!(AuthorizationService::authorize_seed(&admin).is_ok());
    assert!(AuthorizationService::authorize_generate_scenario(&admin).is_ok());
}

#[test]
fn test_staff_fails_admin_checks() {
    let staff = create_test_staff();

    assert_eq!(
        AuthorizationService::authorize_wipe(&staff),
        Err(AuthError::Unauthorized {
            action: String::from("wipe_all_business_data"),
            required_role: String::from("Admin"),
        })
    );
    assert!(AuthorizationService::authorize_simulation_control(&staff).is_err());
    assert!(AuthorizationService::authorize_seed(&staff).is_err());
    assert!(AuthorizationService::authorize_generate_scenario(&staff).is_err());
}

#[test]
fn test_role_parse_round_trips_stored_names() {
    assert_eq!(Role::parse("Admin"), Some(Role::Admin));
    assert_eq!(Role::parse("Staff"), Some(Role::Staff));
    assert_eq!(Role::parse("admin"), None);
    assert_eq!(Role::Staff.as_str(), "Staff");
}
