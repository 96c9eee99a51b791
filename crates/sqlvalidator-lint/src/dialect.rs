//! Dialects understood by the linter.

use std::fmt;
use std::str::FromStr;

use sqlparser::dialect::{AnsiDialect, Dialect, MySqlDialect, PostgreSqlDialect};

use crate::LintError;

/// SQL grammar variant used for tokenizing and parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LintDialect {
    /// MySQL
    #[default]
    MySql,
    /// PostgreSQL
    Postgres,
    /// ANSI SQL
    Ansi,
}

impl LintDialect {
    /// Lowercase dialect name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
            Self::Ansi => "ansi",
        }
    }

    pub(crate) fn parser_dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::MySql => Box::new(MySqlDialect {}),
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::Ansi => Box::new(AnsiDialect {}),
        }
    }
}

impl FromStr for LintDialect {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "postgres" => Ok(Self::Postgres),
            "ansi" => Ok(Self::Ansi),
            _ => Err(LintError::unknown_dialect(s.trim())),
        }
    }
}

impl fmt::Display for LintDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_dialects() {
        assert_eq!("mysql".parse::<LintDialect>().unwrap(), LintDialect::MySql);
        assert_eq!(
            "postgres".parse::<LintDialect>().unwrap(),
            LintDialect::Postgres
        );
        assert_eq!("ansi".parse::<LintDialect>().unwrap(), LintDialect::Ansi);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(" MySQL ".parse::<LintDialect>().unwrap(), LintDialect::MySql);
        assert_eq!("ANSI".parse::<LintDialect>().unwrap(), LintDialect::Ansi);
    }

    #[test]
    fn test_parse_unknown_dialect() {
        let err = "oracle".parse::<LintDialect>().unwrap_err();
        assert!(err.is_unknown_dialect());
        assert!(err.to_string().contains("oracle"));

        // Aliases are not accepted
        assert!("postgresql".parse::<LintDialect>().is_err());
    }

    #[test]
    fn test_default_is_mysql() {
        assert_eq!(LintDialect::default(), LintDialect::MySql);
    }

    #[test]
    fn test_display_round_trips_name() {
        for dialect in [LintDialect::MySql, LintDialect::Postgres, LintDialect::Ansi] {
            assert_eq!(dialect.to_string(), dialect.name());
        }
    }
}
