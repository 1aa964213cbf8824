// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{FakeStore, date, harness};
use crate::{CoreError, SIMULATION_OVERRIDE_KEY, ViewScope};
use stepline_domain::{
    BusinessTable, EnrollmentStatus, MemberStatus, NewRecord, SCENARIO_INSTRUCTOR_NAME,
    ScenarioKind,
};
use time::macros::datetime;

fn only_member(store: &FakeStore) -> stepline_domain::NewMember {
    match store.rows(BusinessTable::Members).as_slice() {
        [NewRecord::Member(member)] => member.clone(),
        other => panic!("expected one member, got {other:?}"),
    }
}

fn only_enrollment(store: &FakeStore) -> stepline_domain::NewEnrollment {
    match store.rows(BusinessTable::Enrollments).as_slice() {
        [NewRecord::Enrollment(enrollment)] => enrollment.clone(),
        other => panic!("expected one enrollment, got {other:?}"),
    }
}

#[test]
fn test_unknown_kind_is_rejected_without_mutation() {
    let h = harness();
    let mut store: FakeStore = FakeStore::default();
    let err = h
        .lifecycle
        .generate_scenario(&mut store, &h.overrides, "half-freeze")
        .unwrap_err();

    let CoreError::Validation(message) = err else {
        panic!("expected Validation, got {err:?}");
    };
    assert!(message.contains("half-freeze"));
    assert!(message.contains("indefinite-freeze"));
    assert_eq!(store.total(), 0);
    assert_eq!(store.lookup_count, 0);
    assert!(h.invalidator.scopes().is_empty());
}

#[test]
fn test_indefinite_freeze_scenario() {
    let h = harness();
    let mut store: FakeStore = FakeStore::default();
    let report = h
        .lifecycle
        .generate_scenario(&mut store, &h.overrides, "indefinite-freeze")
        .unwrap();

    assert_eq!(report.kind, ScenarioKind::IndefiniteFreeze);
    let member = only_member(&store);
    assert_eq!(member.status, MemberStatus::Frozen);
    assert_eq!(member.freeze_start_date, Some(date("2025-06-15")));
    assert_eq!(member.freeze_end_date, None);
    assert_eq!(store.len(BusinessTable::Payments), 1);
    assert_eq!(store.len(BusinessTable::EnrollmentLogs), 1);
    assert_eq!(h.invalidator.scopes(), vec![ViewScope::Listings]);
}

#[test]
fn test_time_bounded_freeze_scenario() {
    let h = harness();
    let mut store: FakeStore = FakeStore::default();
    h.lifecycle
        .generate_scenario(&mut store, &h.overrides, "time-bounded-freeze")
        .unwrap();

    let member = only_member(&store);
    assert_eq!(member.freeze_start_date, Some(date("2025-06-08")));
    assert_eq!(member.freeze_end_date, Some(date("2025-07-06")));
    assert_eq!(only_enrollment(&store).status, EnrollmentStatus::Frozen);
}

#[test]
fn test_future_freeze_scenario_starts_after_today() {
    let h = harness();
    h.overrides
        .insert_raw(SIMULATION_OVERRIDE_KEY, "2025-01-01")
        .unwrap();
    let mut store: FakeStore = FakeStore::default();
    h.lifecycle
        .generate_scenario(&mut store, &h.overrides, "future-freeze")
        .unwrap();

    let member = only_member(&store);
    assert_eq!(member.status, MemberStatus::Active);
    assert!(member.freeze_start_date.unwrap() > date("2025-01-01"));
    assert_eq!(only_enrollment(&store).status, EnrollmentStatus::Active);
}

#[test]
fn test_delinquent_freeze_scenario_leaves_debt() {
    let h = harness();
    let mut store: FakeStore = FakeStore::default();
    h.lifecycle
        .generate_scenario(&mut store, &h.overrides, "delinquent-freeze")
        .unwrap();

    let member = only_member(&store);
    let enrollment = only_enrollment(&store);
    assert_eq!(enrollment.next_due_date, date("2025-05-16"));
    assert!(enrollment.next_due_date < member.freeze_start_date.unwrap());
}

#[test]
fn test_scenarios_reuse_fixture_rows() {
    let h = harness();
    let mut store: FakeStore = FakeStore::default();
    for kind in ScenarioKind::names() {
        h.lifecycle
            .generate_scenario(&mut store, &h.overrides, kind)
            .unwrap();
    }

    assert_eq!(store.len(BusinessTable::Instructors), 1);
    assert_eq!(store.len(BusinessTable::Rates), 1);
    assert_eq!(store.len(BusinessTable::Classes), 1);
    assert_eq!(store.len(BusinessTable::Members), 4);
    assert!(matches!(
        store.rows(BusinessTable::Instructors).as_slice(),
        [NewRecord::Instructor(i)] if i.name == SCENARIO_INSTRUCTOR_NAME
    ));
}

#[test]
fn test_second_scenario_reports_only_new_rows() {
    let h = harness();
    let mut store: FakeStore = FakeStore::default();
    h.lifecycle
        .generate_scenario(&mut store, &h.overrides, "future-freeze")
        .unwrap();
    let report = h
        .lifecycle
        .generate_scenario(&mut store, &h.overrides, "future-freeze")
        .unwrap();
    let tables: Vec<BusinessTable> = report.created.iter().map(|(t, _)| *t).collect();
    assert_eq!(
        tables,
        vec![
            BusinessTable::Members,
            BusinessTable::Enrollments,
            BusinessTable::Payments,
            BusinessTable::EnrollmentLogs,
        ]
    );
}

#[test]
fn test_scenario_rows_are_stamped_with_effective_now() {
    let h = harness();
    h.overrides
        .insert_raw(SIMULATION_OVERRIDE_KEY, "2024-11-30")
        .unwrap();
    let mut store: FakeStore = FakeStore::default();
    let report = h
        .lifecycle
        .generate_scenario(&mut store, &h.overrides, "indefinite-freeze")
        .unwrap();
    assert_eq!(report.effective_date, date("2024-11-30"));
    assert!(
        store
            .recorded_at
            .iter()
            .all(|at| *at == datetime!(2024-11-30 00:00))
    );
}

#[test]
fn test_scenario_failure_stops_after_member() {
    let h = harness();
    let mut store: FakeStore = FakeStore::default();
    store.fail_insert = Some(BusinessTable::Enrollments);

    let err = h
        .lifecycle
        .generate_scenario(&mut store, &h.overrides, "delinquent-freeze")
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::StepFailed {
            operation: "scenario",
            table: BusinessTable::Enrollments,
            ..
        }
    ));
    assert_eq!(store.len(BusinessTable::Members), 1);
    assert_eq!(store.len(BusinessTable::Payments), 0);
}
