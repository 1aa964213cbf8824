// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Which views an invalidation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewScope {
    /// Views that depend on the effective date.
    DateDependent,
    /// Listings of business rows.
    Listings,
}

impl ViewScope {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DateDependent => "date_dependent",
            Self::Listings => "listings",
        }
    }
}

/// Signals that cached views must be recomputed.
pub trait ViewInvalidator: Send + Sync {
    fn invalidate(&self, scope: ViewScope);
}

/// Discards every invalidation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInvalidator;

impl ViewInvalidator for NoopInvalidator {
    fn invalidate(&self, _scope: ViewScope) {}
}
