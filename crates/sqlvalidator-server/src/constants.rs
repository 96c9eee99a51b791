//! Constants for the validation service

/// Marker the linter puts in descriptions of SQL it could not parse
pub const UNPARSABLE_MARKER: &str = "unparsable section";

/// Marker (matched case-insensitively) for generic syntax errors
pub const SYNTAX_ERROR_MARKER: &str = "syntax error";

/// User-facing message template for unparsable SQL (use .replace("{SECTION}", section))
pub const UNPARSABLE_MESSAGE_TEMPLATE: &str =
    "Your SQL could not be understood. Please check the syntax near '{SECTION}'.";

/// User-facing message for generic syntax errors
pub const SYNTAX_ERROR_MESSAGE: &str =
    "There is a syntax error in your SQL. Please review your query.";

/// Dialect used by the raw lint endpoint when the request names none
pub const DEFAULT_LINT_DIALECT: &str = "ansi";

/// Health status: ok
pub const STATUS_OK: &str = "ok";
