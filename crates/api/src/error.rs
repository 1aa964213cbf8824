// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use stepline::CoreError;
use stepline_domain::DomainError;
use stepline_persistence::PersistenceError;
use thiserror::Error;
use tracing::{error, warn};

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Authentication failed.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The per-client simulation date could not be stored.
    ContextUnavailable {
        /// The operator-facing message.
        message: String,
    },
    /// A multi-step operation stopped part way through.
    OperationIncomplete {
        /// A human-readable description of the failing step.
        message: String,
        /// Descriptions of the steps that completed before the failure.
        completed: Vec<String>,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ContextUnavailable { message } | Self::Internal { message } => {
                write!(f, "{message}")
            }
            Self::OperationIncomplete { message, completed } => {
                write!(f, "{message} ({} steps completed)", completed.len())
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    warn!(error = %err, "Rejected invalid input");
    match err {
        kind @ DomainError::UnknownScenarioKind { .. } => ApiError::InvalidInput {
            field: String::from("kind"),
            message: kind.to_string(),
        },
        date @ (DomainError::InvalidDate { .. } | DomainError::DateArithmeticOverflow { .. }) => {
            ApiError::InvalidInput {
                field: String::from("date"),
                message: date.to_string(),
            }
        }
        stored @ (DomainError::InvalidStatus { .. } | DomainError::UnknownTable(_)) => {
            ApiError::Internal {
                message: format!("Stored data is invalid: {stored}"),
            }
        }
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Validation(message) => {
            warn!(message, "Validation failed");
            ApiError::InvalidInput {
                field: String::from("request"),
                message,
            }
        }
        CoreError::Persistence(message) => {
            error!(message, "Persistence failure");
            ApiError::Internal {
                message: format!("Database error: {message}"),
            }
        }
        CoreError::ContextUnavailable => ApiError::ContextUnavailable {
            message: err.to_string(),
        },
        CoreError::StepFailed { ref completed, .. } => {
            let completed: Vec<String> = completed.clone();
            let message: String = err.to_string();
            error!(message, completed = completed.len(), "Operation incomplete");
            ApiError::OperationIncomplete { message, completed }
        }
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    error!(error = %err, "Persistence failure");
    match err {
        PersistenceError::NotFound(message) => ApiError::Internal {
            message: format!("Record not found: {message}"),
        },
        other => ApiError::Internal {
            message: format!("Database error: {other}"),
        },
    }
}
