// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::date;
use crate::{DomainError, EffectiveDate, EnrollmentStatus, LedgerKind, MemberStatus};

#[test]
fn test_effective_date_parses_iso_date() {
    let parsed: EffectiveDate = EffectiveDate::parse("2023-06-15").unwrap();
    assert_eq!(parsed.date().year(), 2023);
    assert_eq!(u8::from(parsed.date().month()), 6);
    assert_eq!(parsed.date().day(), 15);
}

#[test]
fn test_effective_date_displays_as_iso_date() {
    assert_eq!(date("2025-01-01").to_string(), "2025-01-01");
    assert_eq!(date("0999-12-31").to_string(), "0999-12-31");
}

#[test]
fn test_effective_date_rejects_malformed_inputs() {
    for input in [
        "",
        "not-a-date",
        "2025-13-01",
        "2025-02-30",
        "2025-1-01",
        "2025/01/01",
        "2025-01-01T00:00:00",
        " 2025-01-01",
        "+025-01-01",
    ] {
        let result = EffectiveDate::parse(input);
        assert!(
            matches!(result, Err(DomainError::InvalidDate { .. })),
            "expected '{input}' to be rejected, got {result:?}"
        );
    }
}

#[test]
fn test_effective_date_accepts_leap_day() {
    assert!(EffectiveDate::parse("2024-02-29").is_ok());
    assert!(EffectiveDate::parse("2023-02-29").is_err());
}

#[test]
fn test_start_of_day_is_midnight() {
    let start = date("2023-06-15").start_of_day();
    assert_eq!(start.date(), date("2023-06-15").date());
    assert_eq!(start.hour(), 0);
    assert_eq!(start.minute(), 0);
    assert_eq!(start.second(), 0);
}

#[test]
fn test_add_days_crosses_month_and_year() {
    assert_eq!(date("2024-12-30").add_days(3).unwrap(), date("2025-01-02"));
    assert_eq!(date("2025-03-01").add_days(-1).unwrap(), date("2025-02-28"));
}

#[test]
fn test_days_since() {
    assert_eq!(date("2025-01-31").days_since(date("2025-01-01")), 30);
    assert_eq!(date("2025-01-01").days_since(date("2025-01-31")), -30);
}

#[test]
fn test_effective_date_string_conversions() {
    assert_eq!(String::from(date("2025-06-01")), "2025-06-01");
    let back: EffectiveDate = EffectiveDate::try_from(String::from("2025-06-01")).unwrap();
    assert_eq!(back, date("2025-06-01"));
    assert!(EffectiveDate::try_from(String::from("06/01/2025")).is_err());
}

#[test]
fn test_status_round_trip_through_storage_strings() {
    for status in [MemberStatus::Active, MemberStatus::Frozen, MemberStatus::Inactive] {
        assert_eq!(status.as_str().parse::<MemberStatus>().unwrap(), status);
    }
    for status in [
        EnrollmentStatus::Active,
        EnrollmentStatus::Frozen,
        EnrollmentStatus::Cancelled,
    ] {
        assert_eq!(status.as_str().parse::<EnrollmentStatus>().unwrap(), status);
    }
    assert_eq!("income".parse::<LedgerKind>().unwrap(), LedgerKind::Income);
}

#[test]
fn test_unknown_status_is_rejected() {
    let err = "paused".parse::<MemberStatus>().unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidStatus {
            field: "member status",
            value: String::from("paused"),
        }
    );
}
