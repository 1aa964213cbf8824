// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::date;
use crate::{DEMO_ENROLLMENTS, DEMO_EXPENSES, DEMO_MEMBERS, DomainError, SeedPlan};

#[test]
fn test_seed_plan_is_parallel_to_demo_data() {
    let plan = SeedPlan::build(date("2025-06-15")).unwrap();

    assert_eq!(plan.members.len(), DEMO_MEMBERS.len());
    assert_eq!(plan.enrollments.len(), DEMO_ENROLLMENTS.len());
    assert_eq!(plan.expense_dates.len(), DEMO_EXPENSES.len());
    for (planned, demo) in plan.enrollments.iter().zip(DEMO_ENROLLMENTS) {
        assert_eq!(planned.periods.len(), usize::try_from(demo.paid_periods).unwrap());
    }
}

#[test]
fn test_seed_plan_dates_follow_offsets() {
    let plan = SeedPlan::build(date("2025-06-15")).unwrap();

    // Chloe Martin is frozen from ten days ago until twenty days ahead.
    assert_eq!(plan.members[2].freeze_start_date, Some(date("2025-06-05")));
    assert_eq!(plan.members[2].freeze_end_date, Some(date("2025-07-05")));
    assert_eq!(plan.members[3].joined_on, date("2025-05-31"));
    assert_eq!(plan.members[3].freeze_start_date, None);

    // Diego Santos paid one period starting fifteen days ago.
    let diego = &plan.enrollments[4];
    assert_eq!(diego.start, date("2025-05-31"));
    assert_eq!(diego.periods[0].end, date("2025-06-29"));
    assert_eq!(diego.periods[0].payout_matures_on, date("2025-06-30"));
    assert_eq!(diego.next_due_date, date("2025-06-30"));
}

#[test]
fn test_seed_plan_periods_are_consecutive() {
    let plan = SeedPlan::build(date("2024-02-29")).unwrap();

    for enrollment in &plan.enrollments {
        assert_eq!(enrollment.periods[0].start, enrollment.start);
        for pair in enrollment.periods.windows(2) {
            assert_eq!(pair[1].start, pair[0].end.add_days(1).unwrap());
        }
    }
}

#[test]
fn test_seed_plan_near_end_of_range_is_rejected() {
    let err = SeedPlan::build(date("9999-12-20")).unwrap_err();

    assert!(matches!(err, DomainError::DateArithmeticOverflow { .. }));
}
