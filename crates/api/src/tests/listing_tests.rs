// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member and payout listings evaluated on the effective date.

use stepline::{OverrideStore, SIMULATION_OVERRIDE_KEY};
use stepline_domain::{FreezeState, PaymentStanding, PayoutMaturity};
use time::Duration;

use crate::{MemberInfo, generate_scenario, list_members, list_payouts, seed_demo_data};

use super::helpers::{Services, create_test_admin, services};

fn seeded() -> Services {
    let mut s = services();
    seed_demo_data(&s.lifecycle, &mut s.persistence, &s.overrides, &create_test_admin()).unwrap();
    s
}

fn member<'a>(members: &'a [MemberInfo], name: &str) -> &'a MemberInfo {
    members.iter().find(|m| m.full_name == name).unwrap()
}

#[test]
fn test_members_are_listed_by_name() {
    let mut s = seeded();

    let response = list_members(&mut s.persistence, &s.resolver, &s.overrides).unwrap();

    let names: Vec<&str> = response
        .members
        .iter()
        .map(|m| m.full_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Ana Ribeiro", "Ben Okafor", "Chloe Martin", "Diego Santos"]
    );
    assert_eq!(response.effective_date, "2025-06-15");
}

#[test]
fn test_standings_on_seed_day() {
    let mut s = seeded();

    let response = list_members(&mut s.persistence, &s.resolver, &s.overrides).unwrap();

    let ana = member(&response.members, "Ana Ribeiro");
    assert_eq!(ana.enrollments.len(), 2);
    assert!(
        ana.enrollments
            .iter()
            .all(|e| e.standing == PaymentStanding::DueToday)
    );

    let ben = member(&response.members, "Ben Okafor");
    assert_eq!(
        ben.enrollments[0].standing,
        PaymentStanding::Overdue { days_overdue: 45 }
    );

    let chloe = member(&response.members, "Chloe Martin");
    assert_eq!(chloe.freeze_state, FreezeState::Active);
    assert_eq!(chloe.enrollments[0].standing, PaymentStanding::Frozen);

    let diego = member(&response.members, "Diego Santos");
    assert_eq!(diego.freeze_state, FreezeState::NotFrozen);
    assert_eq!(
        diego.enrollments[0].standing,
        PaymentStanding::Current { due_in_days: 15 }
    );
}

#[test]
fn test_standings_follow_simulated_date() {
    let mut s = seeded();
    s.overrides
        .write(SIMULATION_OVERRIDE_KEY, "2025-07-15", Duration::hours(24))
        .unwrap();

    let response = list_members(&mut s.persistence, &s.resolver, &s.overrides).unwrap();

    assert_eq!(response.effective_date, "2025-07-15");
    let chloe = member(&response.members, "Chloe Martin");
    assert_eq!(chloe.freeze_state, FreezeState::Ended);
    assert_eq!(
        chloe.enrollments[0].standing,
        PaymentStanding::Overdue { days_overdue: 20 }
    );
}

#[test]
fn test_delinquent_scenario_stays_overdue_while_frozen() {
    let mut s = services();
    generate_scenario(
        &s.lifecycle,
        &mut s.persistence,
        &s.overrides,
        &create_test_admin(),
        "delinquent-freeze",
    )
    .unwrap();

    let response = list_members(&mut s.persistence, &s.resolver, &s.overrides).unwrap();

    let member = &response.members[0];
    assert_eq!(member.freeze_state, FreezeState::Active);
    assert_eq!(
        member.enrollments[0].standing,
        PaymentStanding::Overdue { days_overdue: 30 }
    );
}

#[test]
fn test_payout_totals_on_seed_day() {
    let mut s = seeded();

    let response = list_payouts(&mut s.persistence, &s.resolver, &s.overrides).unwrap();

    assert_eq!(response.payouts.len(), 15);
    assert_eq!(response.pending_cents, 7_600);
    assert_eq!(response.payable_cents, 53_100);
    let newest = response.payouts.last().unwrap();
    assert_eq!(newest.instructor_name, "Dmitri Volkov");
    assert_eq!(
        newest.maturity,
        PayoutMaturity::Pending { days_remaining: 15 }
    );
}

#[test]
fn test_every_payout_matures_a_month_later() {
    let mut s = seeded();
    s.overrides
        .write(SIMULATION_OVERRIDE_KEY, "2025-07-15", Duration::hours(24))
        .unwrap();

    let response = list_payouts(&mut s.persistence, &s.resolver, &s.overrides).unwrap();

    assert!(
        response
            .payouts
            .iter()
            .all(|p| p.maturity == PayoutMaturity::Mature)
    );
    assert_eq!(response.pending_cents, 0);
    assert_eq!(response.payable_cents, 60_700);
}
