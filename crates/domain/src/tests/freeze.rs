// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::date;
use crate::{FreezeState, FreezeWindow, evaluate_freeze};

fn bounded() -> FreezeWindow {
    FreezeWindow {
        start: date("2025-03-10"),
        end: Some(date("2025-03-20")),
    }
}

#[test]
fn test_no_freeze_is_not_frozen() {
    assert_eq!(
        evaluate_freeze(None, date("2025-03-15")),
        FreezeState::NotFrozen
    );
}

#[test]
fn test_bounded_freeze_states() {
    let window: FreezeWindow = bounded();
    assert_eq!(window.state_on(date("2025-03-09")), FreezeState::Scheduled);
    assert_eq!(window.state_on(date("2025-03-10")), FreezeState::Active);
    assert_eq!(window.state_on(date("2025-03-20")), FreezeState::Active);
    assert_eq!(window.state_on(date("2025-03-21")), FreezeState::Ended);
}

#[test]
fn test_indefinite_freeze_never_ends() {
    let window: FreezeWindow = FreezeWindow {
        start: date("2025-03-10"),
        end: None,
    };
    assert!(window.is_indefinite());
    assert_eq!(window.state_on(date("2099-01-01")), FreezeState::Active);
}

#[test]
fn test_from_dates_requires_start() {
    assert_eq!(FreezeWindow::from_dates(None, Some(date("2025-03-20"))), None);
    assert_eq!(
        FreezeWindow::from_dates(Some(date("2025-03-10")), Some(date("2025-03-20"))),
        Some(bounded())
    );
}

#[test]
fn test_freeze_state_follows_simulated_day() {
    // The same stored window reads differently as the effective day moves.
    let window: FreezeWindow = bounded();
    let states: Vec<FreezeState> = ["2025-03-01", "2025-03-15", "2025-04-01"]
        .into_iter()
        .map(|day| evaluate_freeze(Some(&window), date(day)))
        .collect();
    assert_eq!(
        states,
        vec![FreezeState::Scheduled, FreezeState::Active, FreezeState::Ended]
    );
}
