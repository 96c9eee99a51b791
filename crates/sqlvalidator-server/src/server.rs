//! Validation service shared by all HTTP handlers

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use sqlvalidator_lint::{Linter, SqlLinter};

use crate::config::Config;
use crate::dialect::DbType;
use crate::types::{ValidationRequest, ValidationResult};
use crate::validation::{Validator, lint_request};
use crate::{Error, Result};

/// Endpoint label for the filtered validation pipeline
pub const VALIDATE_ENDPOINT: &str = "/validate";
/// Endpoint label for raw linting
pub const LINT_ENDPOINT: &str = "/lint";

/// Decodes requests, runs the synchronous pipeline off the async runtime and
/// turns every outcome into a status plus verdict.
#[derive(Clone)]
pub struct ValidationService {
    validator: Arc<Validator>,
    linter: Arc<dyn SqlLinter>,
}

impl fmt::Debug for ValidationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationService")
            .field("validator", &self.validator)
            .field("linter", &"<SqlLinter>")
            .finish()
    }
}

impl ValidationService {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let linter = Linter::with_excluded_rules(&config.lint.exclude_rules);
        for (code, name) in linter.enabled_rule_names() {
            tracing::debug!(code, name, "Linter rule enabled");
        }
        Self::with_linter(config.db_type.clone(), Arc::new(linter))
    }

    /// Service backed by a caller-supplied linter
    #[must_use]
    pub fn with_linter(db_type: DbType, linter: Arc<dyn SqlLinter>) -> Self {
        let validator = Validator::new(db_type, Arc::clone(&linter));
        Self {
            validator: Arc::new(validator),
            linter,
        }
    }

    #[must_use]
    pub fn db_type(&self) -> &DbType {
        self.validator.db_type()
    }

    /// Handle a `/validate` body
    pub async fn validate(&self, body: &[u8]) -> (StatusCode, ValidationResult) {
        let validator = Arc::clone(&self.validator);
        let started = Instant::now();
        let result = run_blocking(body, move |request| validator.validate(&request)).await;
        finish(VALIDATE_ENDPOINT, started, result)
    }

    /// Handle a `/lint` body
    pub async fn lint(&self, body: &[u8]) -> (StatusCode, ValidationResult) {
        let linter = Arc::clone(&self.linter);
        let started = Instant::now();
        let result = run_blocking(body, move |request| lint_request(&*linter, &request)).await;
        finish(LINT_ENDPOINT, started, result)
    }
}

/// Only a JSON object is a request; serde would also accept a sequence.
fn decode_request(body: &[u8]) -> Result<ValidationRequest> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| Error::MalformedRequest(e.to_string()))?;
    if !value.is_object() {
        return Err(Error::MalformedRequest(format!(
            "invalid type: {}, expected a JSON object",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| Error::MalformedRequest(e.to_string()))
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

async fn run_blocking<F>(body: &[u8], f: F) -> Result<ValidationResult>
where
    F: FnOnce(ValidationRequest) -> Result<ValidationResult> + Send + 'static,
{
    let request = decode_request(body)?;
    tokio::task::spawn_blocking(move || f(request))
        .await
        .map_err(|e| Error::Task(e.to_string()))?
}

#[cfg_attr(not(feature = "metrics"), allow(unused_variables))]
fn finish(
    endpoint: &str,
    started: Instant,
    result: Result<ValidationResult>,
) -> (StatusCode, ValidationResult) {
    let (status, verdict) = match result {
        Ok(verdict) => {
            #[cfg(feature = "metrics")]
            crate::observability::record_validation(endpoint, started.elapsed(), verdict.valid);
            (StatusCode::OK, verdict)
        }
        Err(err) => {
            if err.is_client_error() {
                tracing::debug!(endpoint, error = %err, "Rejected request");
            } else {
                tracing::error!(endpoint, error = %err, "Request failed");
            }
            (err.status_code(), ValidationResult::failure(err.to_string()))
        }
    };

    #[cfg(feature = "metrics")]
    crate::observability::record_request(endpoint, status.as_u16());

    (status, verdict)
}
