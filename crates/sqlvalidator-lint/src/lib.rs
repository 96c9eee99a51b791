//! Dialect-aware SQL linting built on `sqlparser`.
//!
//! This crate turns a SQL string and a target dialect into a list of
//! line/column-tagged [`Violation`]s. It never decides whether a query is
//! "acceptable"; callers interpret the violations.
//!
//! # Features
//!
//! - Parse failures reported as `PRS` (unparsable section) and `LXR` (lexing) violations
//! - Token and AST lint rules, individually excludable by code
//! - A [`SqlLinter`] trait so consumers can substitute their own linter
//!
//! # Example
//!
//! ```rust,ignore
//! use sqlvalidator_lint::{LintDialect, Linter, SqlLinter};
//!
//! let linter = Linter::new();
//! let violations = linter.lint("SELECT name, FROM employees", LintDialect::MySql)?;
//! assert!(violations.iter().any(|v| v.rule_code == "CV03"));
//! ```
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dialect;
pub mod error;
pub mod linter;
mod parse;
pub mod rules;
pub mod violation;

// Re-export main types for convenience
pub use dialect::LintDialect;
pub use error::{LintError, Result};
pub use linter::{Linter, SqlLinter};
pub use violation::Violation;
