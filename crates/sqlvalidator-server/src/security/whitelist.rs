//! Allowed SQL functions per database type

use crate::dialect::DbType;

const MYSQL_FUNCTIONS: &[&str] = &["NOW", "CURDATE", "DATE_ADD", "IFNULL", "CONCAT"];
const POSTGRES_FUNCTIONS: &[&str] = &["NOW", "AGE", "TO_CHAR", "DATE_TRUNC"];
const ORACLE_FUNCTIONS: &[&str] = &["SYSDATE", "NVL", "TO_DATE", "ADD_MONTHS"];
const ANSI_FUNCTIONS: &[&str] = &["CURRENT_TIMESTAMP", "CURRENT_DATE"];

/// Fixed mapping from database type to its allowed (uppercase) function names
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionWhitelist;

impl FunctionWhitelist {
    /// Allowed functions for `db_type`; unknown types get the MySQL list
    #[must_use]
    pub fn allowed_for(db_type: &DbType) -> &'static [&'static str] {
        match db_type.as_str() {
            "postgres" => POSTGRES_FUNCTIONS,
            "oracle" => ORACLE_FUNCTIONS,
            "ansi" => ANSI_FUNCTIONS,
            _ => MYSQL_FUNCTIONS,
        }
    }
}
