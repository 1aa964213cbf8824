// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The requested scenario kind is not one of the known kinds.
    UnknownScenarioKind {
        /// The kind that was requested.
        requested: String,
    },
    /// A date string is not a valid `YYYY-MM-DD` calendar date.
    InvalidDate {
        /// The rejected input.
        input: String,
        /// The parser's explanation.
        reason: String,
    },
    /// Date arithmetic left the representable range.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A stored status value is not recognized.
    InvalidStatus {
        /// The kind of status (member, enrollment, ledger kind).
        field: &'static str,
        /// The stored value.
        value: String,
    },
    /// A business table name is not recognized.
    UnknownTable(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownScenarioKind { requested } => {
                write!(
                    f,
                    "Unknown scenario kind '{requested}'. Expected one of: {}",
                    crate::ScenarioKind::names().join(", ")
                )
            }
            Self::InvalidDate { input, reason } => {
                write!(f, "Invalid date '{input}': {reason}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidStatus { field, value } => {
                write!(f, "Invalid {field} '{value}'")
            }
            Self::UnknownTable(name) => write!(f, "Unknown business table '{name}'"),
        }
    }
}

impl std::error::Error for DomainError {}
