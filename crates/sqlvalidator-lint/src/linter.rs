//! Linter entry point

use std::collections::HashSet;

use sqlparser::parser::Parser;
use sqlparser::tokenizer::Tokenizer;

use crate::rules::{LintContext, LintRule, builtin_rules};
use crate::{LintDialect, Result, Violation, parse};

/// Rule code that excludes every rule at once
const EXCLUDE_ALL: &str = "ALL";

/// Anything that can lint a SQL string for a dialect.
///
/// Implementations must be deterministic: the same input yields the same
/// violations.
pub trait SqlLinter: Send + Sync {
    /// Lint `sql` and return violations ordered by position.
    fn lint(&self, sql: &str, dialect: LintDialect) -> Result<Vec<Violation>>;
}

/// sqlparser-backed linter with a configurable rule set.
#[derive(Debug)]
pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
}

impl Linter {
    /// Linter with every built-in rule enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Linter with the given rule codes disabled (`all` disables every rule).
    ///
    /// Parse and lexing failures are always reported.
    #[must_use]
    pub fn with_excluded_rules<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excluded: HashSet<String> = excluded
            .into_iter()
            .map(|code| code.as_ref().trim().to_uppercase())
            .filter(|code| !code.is_empty())
            .collect();

        if excluded.contains(EXCLUDE_ALL) {
            return Self { rules: Vec::new() };
        }

        Self {
            rules: builtin_rules()
                .into_iter()
                .filter(|rule| !excluded.contains(rule.code()))
                .collect(),
        }
    }

    /// `(code, name)` pairs of the enabled rules.
    pub fn enabled_rule_names(
        &self,
    ) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.rules.iter().map(|rule| (rule.code(), rule.name()))
    }

    /// Lint a SQL string.
    pub fn lint_string(&self, sql: &str, dialect: LintDialect) -> Result<Vec<Violation>> {
        let parser_dialect = dialect.parser_dialect();
        let mut violations = Vec::new();

        let tokens = Tokenizer::new(&*parser_dialect, sql)
            .tokenize_with_location()
            .unwrap_or_default();

        let statements = match Parser::parse_sql(&*parser_dialect, sql) {
            Ok(statements) => Some(statements),
            Err(err) => {
                violations.push(parse::violation_from_error(sql, err)?);
                None
            }
        };

        let ctx = LintContext::new(&tokens, statements.as_deref());
        for rule in &self.rules {
            violations.extend(rule.check(&ctx));
        }

        violations.sort_by_key(|v| (v.line, v.column));
        Ok(violations)
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlLinter for Linter {
    fn lint(&self, sql: &str, dialect: LintDialect) -> Result<Vec<Violation>> {
        self.lint_string(sql, dialect)
    }
}
