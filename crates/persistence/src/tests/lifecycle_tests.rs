// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wipe, seed, and scenario runs against a real database.

use stepline::{CoreError, LifecycleOrchestrator, OverrideStore, SIMULATION_OVERRIDE_KEY};
use stepline_domain::{BusinessTable, WIPE_ORDER};
use time::Duration;

use super::{fresh, orchestrator};

fn count(persistence: &mut crate::Persistence, table: BusinessTable) -> usize {
    persistence.count_rows(table).unwrap()
}

#[test]
fn test_seed_creates_demo_studio() {
    let mut persistence = fresh();
    let (lifecycle, overrides) = orchestrator();

    let report = lifecycle
        .seed_demo_data(&mut persistence, &overrides)
        .unwrap();

    assert_eq!(report.effective_date.to_string(), "2025-06-15");
    assert_eq!(count(&mut persistence, BusinessTable::Instructors), 2);
    assert_eq!(count(&mut persistence, BusinessTable::Rates), 2);
    assert_eq!(count(&mut persistence, BusinessTable::Classes), 3);
    assert_eq!(count(&mut persistence, BusinessTable::Members), 4);
    assert_eq!(count(&mut persistence, BusinessTable::Enrollments), 5);
    assert_eq!(count(&mut persistence, BusinessTable::EnrollmentLogs), 5);
    assert_eq!(count(&mut persistence, BusinessTable::Payments), 15);
    assert_eq!(count(&mut persistence, BusinessTable::InstructorPayouts), 15);
    assert_eq!(count(&mut persistence, BusinessTable::LedgerEntries), 17);
}

#[test]
fn test_seed_is_dated_from_simulated_day() {
    let mut persistence = fresh();
    let (lifecycle, overrides) = orchestrator();
    overrides
        .write(SIMULATION_OVERRIDE_KEY, "2024-02-29", Duration::hours(24))
        .unwrap();

    lifecycle
        .seed_demo_data(&mut persistence, &overrides)
        .unwrap();

    let members = persistence.list_members().unwrap();
    let diego = members
        .iter()
        .find(|m| m.full_name == "Diego Santos")
        .unwrap();
    assert_eq!(diego.joined_on, "2024-02-14");
}

#[test]
fn test_wipe_after_seed_empties_every_business_table() {
    let mut persistence = fresh();
    let (lifecycle, overrides) = orchestrator();
    lifecycle
        .seed_demo_data(&mut persistence, &overrides)
        .unwrap();

    let report = lifecycle.wipe_all_business_data(&mut persistence).unwrap();

    assert_eq!(report.deleted.len(), WIPE_ORDER.len());
    assert_eq!(report.total_rows(), 68);
    for table in WIPE_ORDER {
        assert_eq!(count(&mut persistence, table), 0, "{table}");
    }
}

#[test]
fn test_wipe_leaves_operators_and_sessions() {
    let mut persistence = fresh();
    let (lifecycle, overrides) = orchestrator();
    let operator_id = persistence
        .create_operator("admin", "Admin", "password", "Admin")
        .unwrap();
    persistence
        .create_session("session_token", operator_id, "2099-01-01T00:00:00.000000000Z")
        .unwrap();
    lifecycle
        .seed_demo_data(&mut persistence, &overrides)
        .unwrap();

    lifecycle.wipe_all_business_data(&mut persistence).unwrap();

    assert_eq!(persistence.count_operators().unwrap(), 1);
    assert_eq!(persistence.count_sessions().unwrap(), 1);
}

#[test]
fn test_wipe_of_empty_database_succeeds() {
    let mut persistence = fresh();
    let (lifecycle, _) = orchestrator();

    let report = lifecycle.wipe_all_business_data(&mut persistence).unwrap();

    assert_eq!(report.total_rows(), 0);
}

#[test]
fn test_seed_twice_then_wipe_succeeds() {
    let mut persistence = fresh();
    let (lifecycle, overrides) = orchestrator();
    lifecycle
        .seed_demo_data(&mut persistence, &overrides)
        .unwrap();
    lifecycle
        .seed_demo_data(&mut persistence, &overrides)
        .unwrap();

    assert_eq!(count(&mut persistence, BusinessTable::Members), 8);
    lifecycle.wipe_all_business_data(&mut persistence).unwrap();
    assert_eq!(count(&mut persistence, BusinessTable::Members), 0);
}

#[test]
fn test_scenarios_share_fixtures() {
    let mut persistence = fresh();
    let (lifecycle, overrides) = orchestrator();

    let first = lifecycle
        .generate_scenario(&mut persistence, &overrides, "indefinite-freeze")
        .unwrap();
    let second = lifecycle
        .generate_scenario(&mut persistence, &overrides, "delinquent-freeze")
        .unwrap();

    assert_ne!(first.member_id, second.member_id);
    assert_eq!(count(&mut persistence, BusinessTable::Instructors), 1);
    assert_eq!(count(&mut persistence, BusinessTable::Rates), 1);
    assert_eq!(count(&mut persistence, BusinessTable::Classes), 1);
    assert_eq!(count(&mut persistence, BusinessTable::Members), 2);
    assert_eq!(count(&mut persistence, BusinessTable::Payments), 2);
}

#[test]
fn test_scenario_after_seed_adds_its_own_fixtures() {
    let mut persistence = fresh();
    let (lifecycle, overrides) = orchestrator();
    lifecycle
        .seed_demo_data(&mut persistence, &overrides)
        .unwrap();

    lifecycle
        .generate_scenario(&mut persistence, &overrides, "future-freeze")
        .unwrap();

    assert_eq!(count(&mut persistence, BusinessTable::Instructors), 3);
    assert_eq!(count(&mut persistence, BusinessTable::Members), 5);
}

#[test]
fn test_unknown_scenario_writes_nothing() {
    let mut persistence = fresh();
    let (lifecycle, overrides) = orchestrator();

    let result = lifecycle.generate_scenario(&mut persistence, &overrides, "bogus");

    assert!(matches!(result, Err(CoreError::Validation(_))));
    for table in WIPE_ORDER {
        assert_eq!(count(&mut persistence, table), 0, "{table}");
    }
}

#[test]
fn test_scenario_member_is_dated_from_effective_day() {
    let mut persistence = fresh();
    let (lifecycle, overrides) = orchestrator();

    lifecycle
        .generate_scenario(&mut persistence, &overrides, "indefinite-freeze")
        .unwrap();

    let members = persistence.list_members().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].status, "frozen");
    assert_eq!(members[0].freeze_start_date.as_deref(), Some("2025-06-15"));
    assert_eq!(members[0].freeze_end_date, None);
}

#[test]
fn test_table_counts_follow_wipe_order() {
    let mut persistence = fresh();
    let (lifecycle, overrides) = orchestrator();
    lifecycle
        .seed_demo_data(&mut persistence, &overrides)
        .unwrap();

    let counts = LifecycleOrchestrator::table_counts(&mut persistence).unwrap();

    let tables: Vec<BusinessTable> = counts.iter().map(|(table, _)| *table).collect();
    assert_eq!(tables, WIPE_ORDER.to_vec());
    assert_eq!(counts.iter().map(|(_, rows)| rows).sum::<usize>(), 68);
}
