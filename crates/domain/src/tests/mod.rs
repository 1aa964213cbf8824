// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod freeze;
mod seed;
mod types;

use crate::EffectiveDate;

/// Parses a `YYYY-MM-DD` literal for tests.
pub fn date(value: &str) -> EffectiveDate {
    EffectiveDate::parse(value).expect("Valid test date")
}
