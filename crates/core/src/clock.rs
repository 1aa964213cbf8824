// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall clock sources.
//!
//! The resolver is the only reader of the real date for business purposes,
//! and it reads it through [`WallClock`].

use chrono::{Offset, TimeZone};
use std::sync::Mutex;
use time::{Date, Duration, OffsetDateTime, UtcOffset};

/// A source of the real current time.
pub trait WallClock: Send + Sync {
    /// The current instant in UTC.
    fn now_utc(&self) -> OffsetDateTime;

    /// The current calendar date in the studio's timezone.
    fn today(&self) -> Date {
        self.now_utc().date()
    }
}

/// The system clock, observed in a fixed IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    timezone: chrono_tz::Tz,
}

impl SystemClock {
    #[must_use]
    pub const fn new(timezone: chrono_tz::Tz) -> Self {
        Self { timezone }
    }

    #[must_use]
    pub const fn timezone(&self) -> chrono_tz::Tz {
        self.timezone
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(chrono_tz::UTC)
    }
}

impl WallClock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn today(&self) -> Date {
        local_date(self.now_utc(), self.timezone)
    }
}

/// The calendar date of `now` as observed in `timezone`.
pub fn local_date(now: OffsetDateTime, timezone: chrono_tz::Tz) -> Date {
    let Some(utc) = chrono::DateTime::from_timestamp(now.unix_timestamp(), 0) else {
        return now.date();
    };
    let offset_seconds: i32 = timezone
        .offset_from_utc_datetime(&utc.naive_utc())
        .fix()
        .local_minus_utc();
    UtcOffset::from_whole_seconds(offset_seconds)
        .map_or_else(|_| now.date(), |offset| now.to_offset(offset).date())
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<OffsetDateTime>,
}

impl ManualClock {
    #[must_use]
    pub const fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Pins the clock to `now`.
    pub fn set(&self, now: OffsetDateTime) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl WallClock for ManualClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.now
            .lock()
            .map_or_else(|poisoned| *poisoned.into_inner(), |guard| *guard)
    }
}
