//! Function-call scan against the whitelist

use std::sync::LazyLock;

use regex::Regex;

use super::FunctionWhitelist;
use crate::dialect::DbType;
use crate::types::ErrorDetail;

/// Identifier immediately followed (modulo whitespace) by `(`.
///
/// Lexical only: also matches inside string literals and comments.
static FUNCTION_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z_][a-zA-Z0-9_]*)\s*\(").expect("valid function call pattern")
});

/// Rejects function calls that are not allowed for the selected database type
#[derive(Debug, Clone)]
pub struct FunctionGuard {
    db_type: DbType,
    allowed: &'static [&'static str],
}

impl FunctionGuard {
    #[must_use]
    pub fn new(db_type: DbType) -> Self {
        let allowed = FunctionWhitelist::allowed_for(&db_type);
        Self { db_type, allowed }
    }

    #[must_use]
    pub const fn db_type(&self) -> &DbType {
        &self.db_type
    }

    #[must_use]
    pub const fn allowed(&self) -> &'static [&'static str] {
        self.allowed
    }

    /// Check an uppercase function name
    #[must_use]
    pub fn is_allowed(&self, name: &str) -> bool {
        self.allowed.contains(&name)
    }

    /// One error per call to a function outside the whitelist, in source order.
    ///
    /// `line` is 1-based; `pos` is the character distance from the preceding
    /// newline (or from a virtual newline before the input).
    #[must_use]
    pub fn scan(&self, sql: &str) -> Vec<ErrorDetail> {
        FUNCTION_CALL
            .captures_iter(sql)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.get(1)?.as_str().to_ascii_uppercase();
                if self.is_allowed(&name) {
                    return None;
                }

                let (line, pos) = line_and_pos(sql, whole.start());
                Some(ErrorDetail::new(
                    line,
                    pos,
                    format!(
                        "Function '{name}' is not allowed for {}.",
                        self.db_type.display_name()
                    ),
                ))
            })
            .collect()
    }
}

/// Line and character position of the byte offset `start` in `sql`
fn line_and_pos(sql: &str, start: usize) -> (usize, usize) {
    let before = &sql[..start];
    let line = before.matches('\n').count() + 1;
    let start_chars = before.chars().count();

    let pos = before.rfind('\n').map_or(start_chars + 1, |newline| {
        start_chars - before[..newline].chars().count()
    });

    (line, pos)
}
