//! Lint rules
//!
//! Rules run after parsing. Token rules see the token stream even when the
//! parser failed; AST rules only run on successfully parsed statements.

mod trailing_comma;
mod unresolved_reference;

use std::fmt;

use sqlparser::ast::Statement;
use sqlparser::tokenizer::{Location, TokenWithSpan};

pub use trailing_comma::TrailingComma;
pub use unresolved_reference::UnresolvedReference;

use crate::Violation;

/// Input shared by all rules for one lint run.
#[derive(Debug, Clone, Copy)]
pub struct LintContext<'a> {
    tokens: &'a [TokenWithSpan],
    statements: Option<&'a [Statement]>,
}

impl<'a> LintContext<'a> {
    /// Create a context from tokens and (if parsing succeeded) statements.
    #[must_use]
    pub const fn new(tokens: &'a [TokenWithSpan], statements: Option<&'a [Statement]>) -> Self {
        Self { tokens, statements }
    }

    /// Tokens with source spans; empty if tokenizing failed.
    #[must_use]
    pub const fn tokens(&self) -> &'a [TokenWithSpan] {
        self.tokens
    }

    /// Parsed statements, or `None` if parsing failed.
    #[must_use]
    pub const fn statements(&self) -> Option<&'a [Statement]> {
        self.statements
    }
}

/// A single lint check identified by a short code.
pub trait LintRule: Send + Sync + fmt::Debug {
    /// Short rule code, e.g. `CV03`
    fn code(&self) -> &'static str;

    /// Descriptive rule name
    fn name(&self) -> &'static str;

    /// Run the check
    fn check(&self, ctx: &LintContext<'_>) -> Vec<Violation>;
}

/// All rules shipped with the linter.
#[must_use]
pub fn builtin_rules() -> Vec<Box<dyn LintRule>> {
    vec![Box::new(TrailingComma), Box::new(UnresolvedReference)]
}

/// Convert a sqlparser location to 1-based `(line, column)`; `None` if unknown.
pub(crate) fn position(location: Location) -> Option<(usize, usize)> {
    let line = usize::try_from(location.line).ok()?;
    let column = usize::try_from(location.column).ok()?;
    (line > 0).then_some((line, column.max(1)))
}
