//! HTTP service that validates SQL against a configured database type

pub mod config;
mod constants;
pub mod dialect;
mod error;
pub mod observability;
pub mod security;
pub mod server;
pub mod transport;
pub mod types;
pub mod validation;

pub use config::{Config, ConfigBuilder, LintConfig, TelemetryConfig, TransportConfig};
pub use dialect::DbType;
pub use error::{Error, Result};
pub use security::{FunctionGuard, FunctionWhitelist};
pub use server::ValidationService;
pub use types::*;
pub use validation::Validator;
