// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use stepline_domain::{BusinessTable, DomainError};
use thiserror::Error;

/// Message shown to operators when the override store cannot be written.
pub const CONTEXT_UNAVAILABLE_MESSAGE: &str =
    "The simulation date could not be saved for this session";

/// Errors raised by simulation control and data lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input was rejected before anything was changed.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// The store failed outside of a multi-step operation.
    #[error("Persistence error: {0}")]
    Persistence(String),
    /// The per-client override store could not be written.
    #[error("{CONTEXT_UNAVAILABLE_MESSAGE}")]
    ContextUnavailable,
    /// A step of a multi-step operation failed. Earlier steps stay applied.
    #[error("{operation} stopped at {table}: {message}")]
    StepFailed {
        /// The operation that was running, e.g. `"wipe"`.
        operation: &'static str,
        /// The table the failing step targeted.
        table: BusinessTable,
        /// The store's message.
        message: String,
        /// Human-readable descriptions of the steps that completed.
        completed: Vec<String>,
    },
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}
