//! Request and response types for the HTTP API

use serde::{Deserialize, Serialize};

/// Body of `POST /validate` and `POST /lint`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// SQL text to check; a missing key is treated as empty
    #[serde(default)]
    pub sql: String,
    /// Dialect hint from the caller
    #[serde(default)]
    pub dialect: Option<String>,
}

impl ValidationRequest {
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            dialect: None,
        }
    }

    #[must_use]
    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = Some(dialect.into());
        self
    }
}

/// A positioned problem in the submitted SQL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// 1-based line
    pub line: usize,
    /// Character position within the line
    pub pos: usize,
    /// Human-readable message
    pub message: String,
}

impl ErrorDetail {
    #[must_use]
    pub fn new(line: usize, pos: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            pos,
            message: message.into(),
        }
    }
}

/// Entry of the `errors` array: positioned on success paths, bare text on failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorEntry {
    Detail(ErrorDetail),
    Message(String),
}

impl ErrorEntry {
    /// Message text regardless of shape
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Detail(detail) => &detail.message,
            Self::Message(message) => message,
        }
    }
}

/// Verdict returned to the caller; `valid` is true iff `errors` is empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ErrorEntry>,
}

impl ValidationResult {
    /// Verdict for SQL with no problems
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Verdict derived from positioned errors
    #[must_use]
    pub fn from_details(details: Vec<ErrorDetail>) -> Self {
        Self {
            valid: details.is_empty(),
            errors: details.into_iter().map(ErrorEntry::Detail).collect(),
        }
    }

    /// Verdict for a request that could not be validated at all
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![ErrorEntry::Message(message.into())],
        }
    }

    /// Iterate over all error messages
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(ErrorEntry::message)
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_missing_sql_defaults_to_empty() {
        let request: ValidationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.sql.is_empty());
        assert!(request.dialect.is_none());
    }

    #[test]
    fn test_request_with_dialect() {
        let request: ValidationRequest =
            serde_json::from_value(json!({"sql": "SELECT 1", "dialect": "postgres"})).unwrap();
        assert_eq!(request, ValidationRequest::new("SELECT 1").with_dialect("postgres"));
    }

    #[test]
    fn test_request_null_sql_is_rejected() {
        let result: Result<ValidationRequest, _> = serde_json::from_str(r#"{"sql": null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_non_string_sql_is_rejected() {
        let result: Result<ValidationRequest, _> = serde_json::from_str(r#"{"sql": 42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_valid_result_serialization() {
        let value = serde_json::to_value(ValidationResult::valid()).unwrap();
        assert_eq!(value, json!({"valid": true, "errors": []}));
    }

    #[test]
    fn test_detail_result_serialization() {
        let result = ValidationResult::from_details(vec![ErrorDetail::new(1, 8, "bad")]);
        assert!(!result.valid);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"valid": false, "errors": [{"line": 1, "pos": 8, "message": "bad"}]})
        );
    }

    #[test]
    fn test_from_empty_details_is_valid() {
        assert_eq!(ValidationResult::from_details(Vec::new()), ValidationResult::valid());
    }

    #[test]
    fn test_failure_serialization() {
        let value = serde_json::to_value(ValidationResult::failure("No SQL provided")).unwrap();
        assert_eq!(value, json!({"valid": false, "errors": ["No SQL provided"]}));
    }

    #[test]
    fn test_untagged_entries_deserialize() {
        let result: ValidationResult = serde_json::from_value(json!({
            "valid": false,
            "errors": ["boom", {"line": 2, "pos": 3, "message": "bad"}]
        }))
        .unwrap();
        let messages: Vec<_> = result.messages().collect();
        assert_eq!(messages, vec!["boom", "bad"]);
    }
}
