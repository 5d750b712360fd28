//! Rejection model for the validation core.

use thiserror::Error;

/// Result type used across the validation units.
pub type EvaluationResult<T> = Result<T, Rejection>;

/// Why a request was refused before reaching persistence.
///
/// Keep this focused on deterministic, request-local failures (format,
/// coherence). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A single field failed a length/pattern/type constraint.
    #[error("invalid {field}: {message}")]
    Format {
        field: &'static str,
        message: String,
    },

    /// Fields are individually well-formed but jointly implausible.
    #[error("inconsistent request: {0}")]
    Semantic(String),

    /// A referenced identifier does not exist.
    ///
    /// Never produced by the validation units themselves; only the
    /// persistence collaborator can resolve references. Defined here so the
    /// whole rejection taxonomy lives in one type.
    #[error("unresolved {field}: {id}")]
    UnresolvedReference { field: &'static str, id: i64 },
}

impl Rejection {
    pub fn format(field: &'static str, message: impl Into<String>) -> Self {
        Self::Format {
            field,
            message: message.into(),
        }
    }

    pub fn semantic(message: impl Into<String>) -> Self {
        Self::Semantic(message.into())
    }

    pub fn unresolved(field: &'static str, id: i64) -> Self {
        Self::UnresolvedReference { field, id }
    }
}
