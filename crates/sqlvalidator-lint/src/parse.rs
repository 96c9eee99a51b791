//! Conversion of parser failures into violations

use std::sync::LazyLock;

use regex::Regex;
use sqlparser::parser::ParserError;

use crate::violation::{LEX_RULE_CODE, PARSE_RULE_CODE};
use crate::{LintError, Result, Violation};

/// Location suffix appended by sqlparser to error messages
static LOCATION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*at Line: (\d+), Column: (\d+)").expect("valid location pattern")
});

/// Build the single violation describing why `sql` failed to parse.
pub fn violation_from_error(sql: &str, err: ParserError) -> Result<Violation> {
    match err {
        ParserError::TokenizerError(message) => {
            let (message, location) = split_location(&message);
            let (line, column) = location.unwrap_or_else(|| end_of_input(sql));
            Ok(Violation::new(
                line,
                column,
                format!("Syntax error: {message}"),
                LEX_RULE_CODE,
            ))
        }
        ParserError::ParserError(message) => {
            let (message, location) = split_location(&message);

            if let Some((line, column)) = location
                && let Some(section) = section_at(sql, line, column)
            {
                return Ok(Violation::new(
                    line,
                    column,
                    format!("Found unparsable section: '{section}'"),
                    PARSE_RULE_CODE,
                ));
            }

            let (line, column) = location.unwrap_or_else(|| end_of_input(sql));
            Ok(Violation::new(
                line,
                column,
                format!("Syntax error: {message}"),
                PARSE_RULE_CODE,
            ))
        }
        ParserError::RecursionLimitExceeded => Err(LintError::recursion_limit()),
    }
}

/// Split `"... at Line: L, Column: C"` into the message and its location.
fn split_location(message: &str) -> (&str, Option<(usize, usize)>) {
    let Some(caps) = LOCATION_SUFFIX.captures(message) else {
        return (message.trim(), None);
    };

    let location = match (caps[1].parse::<usize>(), caps[2].parse::<usize>()) {
        (Ok(line), Ok(column)) if line > 0 => Some((line, column.max(1))),
        _ => None,
    };

    let start = caps.get(0).map_or(message.len(), |m| m.start());
    (message[..start].trim(), location)
}

/// Statement text from `line`:`column` up to the next `;`, trimmed.
fn section_at(sql: &str, line: usize, column: usize) -> Option<&str> {
    let line_start = if line <= 1 {
        0
    } else {
        sql.match_indices('\n').nth(line - 2).map(|(i, _)| i + 1)?
    };

    let rest = &sql[line_start..];
    let offset = rest
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(rest.len(), |(i, _)| i);
    let rest = &rest[offset..];

    let end = rest.find(';').unwrap_or(rest.len());
    let section = rest[..end].trim();
    (!section.is_empty()).then_some(section)
}

/// Position just past the last character of `sql`.
fn end_of_input(sql: &str) -> (usize, usize) {
    let line = sql.matches('\n').count() + 1;
    let last_line = sql.rsplit('\n').next().unwrap_or_default();
    (line, last_line.chars().count() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_location() {
        let (msg, loc) = split_location("Expected: an SQL statement, found: SELEC at Line: 1, Column: 1");
        assert_eq!(msg, "Expected: an SQL statement, found: SELEC");
        assert_eq!(loc, Some((1, 1)));
    }

    #[test]
    fn test_split_location_without_suffix() {
        let (msg, loc) = split_location("Expected: identifier, found: EOF");
        assert_eq!(msg, "Expected: identifier, found: EOF");
        assert_eq!(loc, None);
    }

    #[test]
    fn test_split_location_line_zero_is_unknown() {
        let (_, loc) = split_location("oops at Line: 0, Column: 0");
        assert_eq!(loc, None);
    }

    #[test]
    fn test_section_at_first_line() {
        assert_eq!(
            section_at("SELEC name FROM employees;", 1, 1),
            Some("SELEC name FROM employees")
        );
    }

    #[test]
    fn test_section_at_later_line_and_column() {
        let sql = "SELECT a\nFROM t\nWHERE = 1; SELECT 2";
        assert_eq!(section_at(sql, 3, 7), Some("= 1"));
    }

    #[test]
    fn test_section_at_counts_characters() {
        let sql = "SELECT 'é' + %x";
        assert_eq!(section_at(sql, 1, 14), Some("%x"));
    }

    #[test]
    fn test_section_at_empty_tail() {
        assert_eq!(section_at("SELECT a FROM ;", 1, 15), None);
        assert_eq!(section_at("SELECT a", 5, 1), None);
    }

    #[test]
    fn test_end_of_input() {
        assert_eq!(end_of_input("SELECT a FROM"), (1, 14));
        assert_eq!(end_of_input("SELECT a\nFROM"), (2, 5));
        assert_eq!(end_of_input(""), (1, 1));
    }

    #[test]
    fn test_parser_error_with_section() {
        let err = ParserError::ParserError(
            "Expected: an SQL statement, found: SELEC at Line: 1, Column: 1".to_string(),
        );
        let violation = violation_from_error("SELEC name FROM employees;", err).unwrap();
        assert_eq!(violation.rule_code, PARSE_RULE_CODE);
        assert_eq!(
            violation.description,
            "Found unparsable section: 'SELEC name FROM employees'"
        );
        assert_eq!((violation.line, violation.column), (1, 1));
    }

    #[test]
    fn test_parser_error_without_location() {
        let err = ParserError::ParserError("Expected: identifier, found: EOF".to_string());
        let violation = violation_from_error("SELECT a FROM", err).unwrap();
        assert_eq!(violation.rule_code, PARSE_RULE_CODE);
        assert_eq!(
            violation.description,
            "Syntax error: Expected: identifier, found: EOF"
        );
        assert_eq!((violation.line, violation.column), (1, 14));
    }

    #[test]
    fn test_tokenizer_error() {
        let err = ParserError::TokenizerError(
            "Unterminated string literal at Line: 1, Column: 8".to_string(),
        );
        let violation = violation_from_error("SELECT 'abc", err).unwrap();
        assert_eq!(violation.rule_code, LEX_RULE_CODE);
        assert_eq!(
            violation.description,
            "Syntax error: Unterminated string literal"
        );
        assert_eq!((violation.line, violation.column), (1, 8));
    }

    #[test]
    fn test_recursion_limit_is_an_error() {
        let err = violation_from_error("SELECT 1", ParserError::RecursionLimitExceeded).unwrap_err();
        assert!(err.is_recursion_limit());
    }
}
