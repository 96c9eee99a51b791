//! CV03: trailing comma in a select list

use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, TokenWithSpan};

use super::{LintContext, LintRule, position};
use crate::Violation;

const DESCRIPTION: &str = "Trailing comma in select clause is not allowed.";

/// Flags `SELECT a, FROM t` and `SELECT a,` style lists.
///
/// Only commas in a projection count; `ORDER BY a,` and similar lists are left
/// to the parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingComma;

impl LintRule for TrailingComma {
    fn code(&self) -> &'static str {
        "CV03"
    }

    fn name(&self) -> &'static str {
        "convention.trailing_comma"
    }

    fn check(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
        let tokens = ctx.tokens();

        tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.token == Token::Comma)
            .filter(|(i, _)| closes_list(next_significant(&tokens[i + 1..])))
            .filter(|(i, _)| in_projection(&tokens[..*i]))
            .map(|(_, t)| {
                let (line, column) = position(t.span.start).unwrap_or((1, 1));
                Violation::new(line, column, DESCRIPTION, self.code())
            })
            .collect()
    }
}

fn next_significant(tokens: &[TokenWithSpan]) -> Option<&Token> {
    tokens
        .iter()
        .map(|t| &t.token)
        .find(|t| !matches!(t, Token::Whitespace(_)))
}

/// Whether the innermost clause opened before the comma is `SELECT`.
///
/// Walks backwards over `preceding` at the comma's parenthesis depth.
fn in_projection(preceding: &[TokenWithSpan]) -> bool {
    let mut depth = 0usize;
    for t in preceding.iter().rev() {
        match &t.token {
            Token::RParen => depth += 1,
            Token::LParen if depth == 0 => return false,
            Token::LParen => depth -= 1,
            Token::Word(word) if depth == 0 => match word.keyword {
                Keyword::SELECT => return true,
                Keyword::FROM
                | Keyword::WHERE
                | Keyword::GROUP
                | Keyword::HAVING
                | Keyword::ORDER
                | Keyword::LIMIT
                | Keyword::VALUES
                | Keyword::SET
                | Keyword::INTO
                | Keyword::WINDOW
                | Keyword::QUALIFY
                | Keyword::RETURNING
                | Keyword::ON
                | Keyword::USING
                | Keyword::PARTITION => return false,
                _ => {}
            },
            _ => {}
        }
    }
    false
}

fn closes_list(next: Option<&Token>) -> bool {
    match next {
        None | Some(Token::SemiColon | Token::EOF) => true,
        Some(Token::Word(word)) => word.keyword == Keyword::FROM,
        _ => false,
    }
}
