//! RF01: column references in a SELECT without FROM

use sqlparser::ast::{Expr, Ident, SelectItem, SetExpr, Statement};

use super::{LintContext, LintRule, position};
use crate::Violation;

/// Flags `SELECT name` where `name` cannot resolve to any table.
///
/// Literals, placeholders and function calls are allowed without `FROM`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnresolvedReference;

impl LintRule for UnresolvedReference {
    fn code(&self) -> &'static str {
        "RF01"
    }

    fn name(&self) -> &'static str {
        "references.from"
    }

    fn check(&self, ctx: &LintContext<'_>) -> Vec<Violation> {
        let Some(statements) = ctx.statements() else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        for statement in statements {
            if let Statement::Query(query) = statement {
                check_set_expr(&query.body, self.code(), &mut violations);
            }
        }
        violations
    }
}

fn check_set_expr(body: &SetExpr, code: &str, out: &mut Vec<Violation>) {
    match body {
        SetExpr::Select(select) if select.from.is_empty() => {
            for (name, ident) in select.projection.iter().filter_map(projected_reference) {
                let (line, column) = position(ident.span.start).unwrap_or((1, 1));
                out.push(Violation::new(
                    line,
                    column,
                    format!("Column '{name}' is referenced but the query has no FROM clause."),
                    code,
                ));
            }
        }
        SetExpr::SetOperation { left, right, .. } => {
            check_set_expr(left, code, out);
            check_set_expr(right, code, out);
        }
        SetExpr::Query(query) => check_set_expr(&query.body, code, out),
        _ => {}
    }
}

fn projected_reference(item: &SelectItem) -> Option<(String, &Ident)> {
    let expr = match item {
        SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => expr,
        _ => return None,
    };

    match expr {
        // MySQL session variables are not column references
        Expr::Identifier(ident) if !ident.value.starts_with('@') => {
            Some((ident.value.clone(), ident))
        }
        Expr::CompoundIdentifier(parts) => {
            let first = parts.first()?;
            let name = parts
                .iter()
                .map(|p| p.value.as_str())
                .collect::<Vec<_>>()
                .join(".");
            Some((name, first))
        }
        _ => None,
    }
}
