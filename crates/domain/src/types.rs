// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, Duration, PrimitiveDateTime};

/// Calendar date format used for every date exchanged with callers: `YYYY-MM-DD`.
const DATE_FORMAT: &[time::format_description::FormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// The date all business logic treats as "today".
///
/// An effective date is a bare calendar date with no time-of-day component.
/// It is either the real current date or an operator-supplied simulation
/// override; in both cases it is always a valid calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EffectiveDate(Date);

impl EffectiveDate {
    /// Wraps a calendar date.
    #[must_use]
    pub const fn new(date: Date) -> Self {
        Self(date)
    }

    /// Parses a strict `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDate` if the input is not exactly ten
    /// characters of the form `YYYY-MM-DD` or names a day that does not exist
    /// (e.g. `2025-02-30`).
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        if input.len() != 10 || !input.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(DomainError::InvalidDate {
                input: input.to_string(),
                reason: String::from("expected YYYY-MM-DD"),
            });
        }

        Date::parse(input, DATE_FORMAT)
            .map(Self)
            .map_err(|e| DomainError::InvalidDate {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.0
    }

    /// Returns this date anchored at 00:00:00.
    #[must_use]
    pub const fn start_of_day(&self) -> PrimitiveDateTime {
        self.0.midnight()
    }

    /// Returns the date `days` days away (negative values go backwards).
    ///
    /// # Errors
    ///
    /// Returns an error if the result is outside the supported date range.
    pub fn add_days(&self, days: i64) -> Result<Self, DomainError> {
        self.0
            .checked_add(Duration::days(days))
            .map(Self)
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("adding {days} days to {self}"),
            })
    }

    /// Number of whole days from `earlier` to this date.
    #[must_use]
    pub fn days_since(&self, earlier: Self) -> i64 {
        (self.0 - earlier.0).whole_days()
    }
}

impl std::fmt::Display for EffectiveDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl FromStr for EffectiveDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EffectiveDate {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EffectiveDate> for String {
    fn from(value: EffectiveDate) -> Self {
        value.to_string()
    }
}

/// Membership status of a studio member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Attending and billed normally.
    Active,
    /// Membership paused; billing is suspended while the freeze is active.
    Frozen,
    /// No longer attending.
    Inactive,
}

impl MemberStatus {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Frozen => "frozen",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for MemberStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "frozen" => Ok(Self::Frozen),
            "inactive" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidStatus {
                field: "member status",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a member's enrollment in a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Billed monthly.
    Active,
    /// Suspended by a member freeze.
    Frozen,
    /// Ended; no further billing.
    Cancelled,
}

impl EnrollmentStatus {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Frozen => "frozen",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for EnrollmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "frozen" => Ok(Self::Frozen),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus {
                field: "enrollment status",
                value: s.to_string(),
            }),
        }
    }
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    /// Money received.
    Income,
    /// Money paid out.
    Expense,
}

impl LedgerKind {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for LedgerKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(DomainError::InvalidStatus {
                field: "ledger kind",
                value: s.to_string(),
            }),
        }
    }
}
