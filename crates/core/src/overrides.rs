// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-client key-value storage for the simulation override.
//!
//! The server backs this with a browser cookie; tests use
//! [`MemoryOverrideStore`]. Values are opaque strings and are validated by
//! the resolver on every read, never on write.

use crate::clock::WallClock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

/// Key under which the simulated date is stored.
pub const SIMULATION_OVERRIDE_KEY: &str = "simulated_date";

/// How long a stored override lives before it silently expires.
pub const SIMULATION_OVERRIDE_LIFETIME: Duration = Duration::hours(24);

/// The override store could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Override store error: {message}")]
pub struct ContextError {
    pub message: String,
}

impl ContextError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Storage scoped to one client for the lifetime of its requests.
pub trait OverrideStore {
    /// Reads `key`, or `None` if it is absent or expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, ContextError>;

    /// Stores `value` under `key` for `lifetime`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn write(&self, key: &str, value: &str, lifetime: Duration) -> Result<(), ContextError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove(&self, key: &str) -> Result<(), ContextError>;
}

/// An in-memory override store that expires entries against a wall clock.
pub struct MemoryOverrideStore {
    clock: Arc<dyn WallClock>,
    entries: Mutex<HashMap<String, (String, OffsetDateTime)>>,
    fail_writes: AtomicBool,
}

impl MemoryOverrideStore {
    #[must_use]
    pub fn new(clock: Arc<dyn WallClock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent write and remove fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Stores a raw value that never expires within the test horizon.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn insert_raw(&self, key: &str, value: &str) -> Result<(), ContextError> {
        self.write(key, value, SIMULATION_OVERRIDE_LIFETIME)
    }

    fn check_writable(&self) -> Result<(), ContextError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ContextError::new("store is read-only"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for MemoryOverrideStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryOverrideStore")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl OverrideStore for MemoryOverrideStore {
    fn read(&self, key: &str) -> Result<Option<String>, ContextError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| ContextError::new("store lock poisoned"))?;
        let now: OffsetDateTime = self.clock.now_utc();
        Ok(entries
            .get(key)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(value, _)| value.clone()))
    }

    fn write(&self, key: &str, value: &str, lifetime: Duration) -> Result<(), ContextError> {
        self.check_writable()?;
        let expires_at: OffsetDateTime = self.clock.now_utc() + lifetime;
        self.entries
            .lock()
            .map_err(|_| ContextError::new("store lock poisoned"))?
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ContextError> {
        self.check_writable()?;
        self.entries
            .lock()
            .map_err(|_| ContextError::new("store lock poisoned"))?
            .remove(key);
        Ok(())
    }
}
