use axum::http::StatusCode;
use sqlvalidator_lint::LintError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No SQL provided")]
    EmptyInput,

    /// Request body could not be decoded; the decoder message is passed through
    #[error("{0}")]
    MalformedRequest(String),

    #[error("{0}")]
    Linter(#[from] LintError),

    #[error("Validation task failed: {0}")]
    Task(String),

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// HTTP status used when this error is returned to a caller
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyInput | Self::UnknownDialect(_) => StatusCode::BAD_REQUEST,
            Self::MalformedRequest(_)
            | Self::Linter(_)
            | Self::Task(_)
            | Self::Config(_)
            | Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::UnknownDialect(_))
    }

    #[must_use]
    pub const fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }

    #[must_use]
    pub const fn is_linter(&self) -> bool {
        matches!(self, Self::Linter(_))
    }

    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_bad_request() {
        let err = Error::EmptyInput;
        assert!(err.is_empty_input());
        assert!(err.is_client_error());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "No SQL provided");
    }

    #[test]
    fn test_malformed_request_passes_message_through() {
        let err = Error::MalformedRequest("expected value at line 1 column 1".to_string());
        assert!(!err.is_client_error());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "expected value at line 1 column 1");
    }

    #[test]
    fn test_linter_error_is_server_error() {
        let err: Error = LintError::recursion_limit().into();
        assert!(err.is_linter());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("recursion limit"));
    }

    #[test]
    fn test_unknown_dialect_is_bad_request() {
        let err = Error::UnknownDialect("sqlite".to_string());
        assert!(err.is_client_error());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Unknown dialect: sqlite");
    }

    #[test]
    fn test_config_predicate() {
        let err = Error::Config("db_type must not be empty".to_string());
        assert!(err.is_config());
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_transport_predicate() {
        let err = Error::Transport("address in use".to_string());
        assert!(matches!(err, Error::Transport(_)));
        assert!(!err.is_config());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_task_error_display() {
        let err = Error::Task("task panicked".to_string());
        assert!(err.to_string().contains("task panicked"));
    }
}
