//! Error hierarchy for sqlvalidator-lint.
//!
//! Exposes `is_xxx()` methods rather than the internal `ErrorKind`.
//! Syntax problems in the linted SQL are *not* errors: they are reported as
//! [`Violation`](crate::Violation)s. A `LintError` means the linter itself
//! could not do its job.

use thiserror::Error;

/// Root error type for the linter.
///
/// # Example
///
/// ```rust,ignore
/// use sqlvalidator_lint::LintDialect;
///
/// let err = "oracle".parse::<LintDialect>().unwrap_err();
/// assert!(err.is_unknown_dialect());
/// ```
#[derive(Error, Debug)]
#[error("{kind}")]
pub struct LintError {
    kind: ErrorKind,
}

/// Internal error classification.
#[derive(Error, Debug)]
#[non_exhaustive]
pub(crate) enum ErrorKind {
    /// Dialect name not supported by the linter.
    #[error("Unknown dialect: {name}")]
    UnknownDialect { name: String },

    /// The parser gave up on deeply nested input.
    #[error("linter failure: recursion limit exceeded")]
    RecursionLimit,
}

impl LintError {
    /// Create error for an unsupported dialect name.
    #[must_use]
    pub fn unknown_dialect(name: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::UnknownDialect { name: name.into() },
        }
    }

    /// Create error for parser recursion limit exhaustion.
    #[must_use]
    pub const fn recursion_limit() -> Self {
        Self {
            kind: ErrorKind::RecursionLimit,
        }
    }

    /// Returns true if the dialect name was not recognized.
    #[must_use]
    pub const fn is_unknown_dialect(&self) -> bool {
        matches!(self.kind, ErrorKind::UnknownDialect { .. })
    }

    /// Returns true if the parser hit its recursion limit.
    #[must_use]
    pub const fn is_recursion_limit(&self) -> bool {
        matches!(self.kind, ErrorKind::RecursionLimit)
    }
}

/// Result type alias for linter operations.
pub type Result<T> = std::result::Result<T, LintError>;
