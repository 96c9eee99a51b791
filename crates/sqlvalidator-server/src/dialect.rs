//! Process-wide database type selection

use std::fmt;
use std::str::FromStr;

use sqlvalidator_lint::LintDialect;

use crate::Error;

/// Database types with a dedicated function whitelist
pub const KNOWN_DB_TYPES: &[&str] = &["mysql", "postgres", "oracle", "ansi"];

/// Database type selected once at startup.
///
/// Stored lowercase. Unknown names are accepted: the whitelist and the
/// linter dialect both fall back to MySQL for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DbType(String);

impl DbType {
    pub fn new(name: &str) -> Result<Self, Error> {
        let normalized = name.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(Error::Config("db_type must not be empty".into()));
        }
        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercase name used in user-facing messages
    #[must_use]
    pub fn display_name(&self) -> String {
        self.0.to_uppercase()
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        KNOWN_DB_TYPES.contains(&self.as_str())
    }

    /// Dialect handed to the linter. Only mysql, postgres and ansi pass
    /// through; everything else (oracle included) lints as MySQL.
    #[must_use]
    pub fn lint_dialect(&self) -> LintDialect {
        match self.as_str() {
            "postgres" => LintDialect::Postgres,
            "ansi" => LintDialect::Ansi,
            _ => LintDialect::MySql,
        }
    }
}

impl Default for DbType {
    fn default() -> Self {
        Self("mysql".to_string())
    }
}

impl FromStr for DbType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
