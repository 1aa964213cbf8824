// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for operator and session persistence operations.

use super::fresh;
use crate::PersistenceError;

#[test]
fn test_create_operator_normalizes_login() {
    let mut persistence = fresh();

    let operator_id = persistence
        .create_operator("frontdesk", "Front Desk", "password", "Staff")
        .unwrap();

    let operator = persistence
        .get_operator_by_login("FrontDesk")
        .unwrap()
        .unwrap();
    assert_eq!(operator.operator_id, operator_id);
    assert_eq!(operator.login_name, "FRONTDESK");
    assert_eq!(operator.role, "Staff");
    assert!(!operator.is_disabled);
    assert!(operator.last_login_at.is_none());
}

#[test]
fn test_duplicate_login_is_rejected() {
    let mut persistence = fresh();
    persistence
        .create_operator("admin", "Admin", "password", "Admin")
        .unwrap();

    let result = persistence.create_operator("ADMIN", "Other", "password", "Staff");

    assert!(matches!(
        result,
        Err(PersistenceError::ConstraintViolation(_))
    ));
}

#[test]
fn test_invalid_role_is_rejected() {
    let mut persistence = fresh();

    let result = persistence.create_operator("owner", "Owner", "password", "Owner");

    assert!(matches!(
        result,
        Err(PersistenceError::ConstraintViolation(_))
    ));
}

#[test]
fn test_password_is_hashed_and_verifiable() {
    let mut persistence = fresh();
    let operator_id = persistence
        .create_operator("admin", "Admin", "s3cret", "Admin")
        .unwrap();

    let operator = persistence.get_operator_by_id(operator_id).unwrap().unwrap();

    assert_ne!(operator.password_hash, "s3cret");
    assert!(
        persistence
            .verify_password("s3cret", &operator.password_hash)
            .unwrap()
    );
    assert!(
        !persistence
            .verify_password("wrong", &operator.password_hash)
            .unwrap()
    );
}

#[test]
fn test_update_last_login_sets_timestamp() {
    let mut persistence = fresh();
    let operator_id = persistence
        .create_operator("admin", "Admin", "password", "Admin")
        .unwrap();

    persistence.update_last_login(operator_id).unwrap();

    let operator = persistence.get_operator_by_id(operator_id).unwrap().unwrap();
    assert!(operator.last_login_at.is_some());
}

#[test]
fn test_unknown_operator_is_none() {
    let mut persistence = fresh();

    assert!(persistence.get_operator_by_id(42).unwrap().is_none());
    assert!(persistence.get_operator_by_login("ghost").unwrap().is_none());
}

#[test]
fn test_session_lifecycle() {
    let mut persistence = fresh();
    let operator_id = persistence
        .create_operator("admin", "Admin", "password", "Admin")
        .unwrap();

    let session_id = persistence
        .create_session("session_abc", operator_id, "2099-01-01T00:00:00.000000000Z")
        .unwrap();

    let session = persistence
        .get_session_by_token("session_abc")
        .unwrap()
        .unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.operator_id, operator_id);
    assert_eq!(session.expires_at, "2099-01-01T00:00:00.000000000Z");

    persistence.update_session_activity(session_id).unwrap();
    persistence.delete_session("session_abc").unwrap();

    assert!(
        persistence
            .get_session_by_token("session_abc")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_session_for_unknown_operator_is_rejected() {
    let mut persistence = fresh();

    let result = persistence.create_session("session_x", 999, "2099-01-01T00:00:00Z");

    assert!(matches!(
        result,
        Err(PersistenceError::ConstraintViolation(_))
    ));
}
