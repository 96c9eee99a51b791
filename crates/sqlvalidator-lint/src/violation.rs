//! Lint violation record

/// Rule code for SQL the parser could not understand.
pub const PARSE_RULE_CODE: &str = "PRS";

/// Rule code for SQL the tokenizer could not split into tokens.
pub const LEX_RULE_CODE: &str = "LXR";

/// A single issue found in a SQL string.
///
/// `line` and `column` are 1-based and count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Violation {
    /// Line of the offending token
    pub line: usize,
    /// Column of the offending token
    pub column: usize,
    /// Human-readable description
    pub description: String,
    /// Code of the rule that produced the violation (`PRS`, `LXR`, `CV03`, ...)
    pub rule_code: String,
}

impl Violation {
    /// Create a new violation.
    #[must_use]
    pub fn new(
        line: usize,
        column: usize,
        description: impl Into<String>,
        rule_code: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column,
            description: description.into(),
            rule_code: rule_code.into(),
        }
    }

    /// Returns true for parse and lexing failures.
    #[must_use]
    pub fn is_parse_failure(&self) -> bool {
        self.rule_code == PARSE_RULE_CODE || self.rule_code == LEX_RULE_CODE
    }
}
