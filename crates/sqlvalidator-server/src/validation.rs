//! SQL validation pipeline

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use sqlvalidator_lint::{LintDialect, SqlLinter, Violation};

use crate::constants::{
    DEFAULT_LINT_DIALECT, SYNTAX_ERROR_MARKER, SYNTAX_ERROR_MESSAGE, UNPARSABLE_MARKER,
    UNPARSABLE_MESSAGE_TEMPLATE,
};
use crate::dialect::DbType;
use crate::security::FunctionGuard;
use crate::types::{ErrorDetail, ValidationRequest, ValidationResult};
use crate::{Error, Result};

/// `%name` / `$name` substitution markers
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[%$][A-Za-z0-9_]+").expect("valid placeholder pattern"));

static UNPARSABLE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"unparsable section: '([^']+)'").expect("valid unparsable section pattern")
});

/// Validates SQL against the process-wide database type.
///
/// Holds only immutable state, so one instance is shared by every request.
#[derive(Clone)]
pub struct Validator {
    guard: FunctionGuard,
    linter: Arc<dyn SqlLinter>,
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("guard", &self.guard)
            .field("linter", &"<SqlLinter>")
            .finish()
    }
}

impl Validator {
    pub fn new(db_type: DbType, linter: Arc<dyn SqlLinter>) -> Self {
        Self {
            guard: FunctionGuard::new(db_type),
            linter,
        }
    }

    #[must_use]
    pub const fn db_type(&self) -> &DbType {
        self.guard.db_type()
    }

    /// Produce a verdict for `request`.
    ///
    /// Returns `Err` only for empty input and linter failures; invalid SQL
    /// is a normal `Ok` verdict.
    pub fn validate(&self, request: &ValidationRequest) -> Result<ValidationResult> {
        let sql = request.sql.as_str();
        if sql.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        if let Some(dialect) = request.dialect.as_deref()
            && !dialect.eq_ignore_ascii_case(self.db_type().as_str())
        {
            tracing::debug!(
                requested = dialect,
                db_type = %self.db_type(),
                "Ignoring request dialect in favor of configured DB type"
            );
        }

        let violations = self.linter.lint(sql, self.db_type().lint_dialect())?;
        for v in &violations {
            tracing::debug!(
                rule = %v.rule_code,
                line = v.line,
                pos = v.column,
                message = %v.description,
                "Linter violation"
            );
        }

        let function_errors = self.guard.scan(sql);

        let total = violations.len();
        let retained: Vec<Violation> = violations
            .into_iter()
            .filter(|v| !is_placeholder_noise(v))
            .collect();
        let suppressed = total - retained.len();
        if suppressed > 0 {
            tracing::debug!(suppressed, "Suppressed placeholder violations");
            #[cfg(feature = "metrics")]
            crate::observability::record_suppressed_violations(suppressed);
        }

        if retained.is_empty() {
            #[cfg(feature = "metrics")]
            crate::observability::record_rejected_functions(function_errors.len());
            return Ok(ValidationResult::from_details(function_errors));
        }

        if !function_errors.is_empty() {
            tracing::debug!(
                count = function_errors.len(),
                "Function errors not reported alongside linter violations"
            );
        }

        let details = retained
            .iter()
            .map(|v| ErrorDetail::new(v.line, v.column, friendly_message(&v.description)))
            .collect();
        Ok(ValidationResult::from_details(details))
    }
}

/// Lint `request` with its own dialect (default `ansi`) and report every
/// violation as-is.
pub fn lint_request(
    linter: &dyn SqlLinter,
    request: &ValidationRequest,
) -> Result<ValidationResult> {
    let name = request.dialect.as_deref().unwrap_or(DEFAULT_LINT_DIALECT);
    let dialect: LintDialect = name
        .parse()
        .map_err(|_| Error::UnknownDialect(name.to_string()))?;

    let details = linter
        .lint(&request.sql, dialect)?
        .into_iter()
        .map(|v| ErrorDetail::new(v.line, v.column, v.description))
        .collect();
    Ok(ValidationResult::from_details(details))
}

/// Violations mentioning a placeholder are false positives from templated SQL
fn is_placeholder_noise(violation: &Violation) -> bool {
    PLACEHOLDER.is_match(&violation.description)
}

/// User-facing text for a linter description
fn friendly_message(description: &str) -> String {
    if description.contains(UNPARSABLE_MARKER) {
        let section = UNPARSABLE_SECTION
            .captures(description)
            .and_then(|caps| caps.get(1))
            .map_or("", |m| m.as_str());
        return UNPARSABLE_MESSAGE_TEMPLATE.replace("{SECTION}", section);
    }

    if description.to_lowercase().contains(SYNTAX_ERROR_MARKER) {
        return SYNTAX_ERROR_MESSAGE.to_string();
    }

    description.to_string()
}
