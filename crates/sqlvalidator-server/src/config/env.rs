//! Environment variable loading for configuration

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use super::builder::ConfigBuilder;
use super::split_list;

/// Environment variable names
mod vars {
    pub const DB_TYPE: &str = "SQLVALIDATOR_DB_TYPE";
    pub const EXCLUDE_RULES: &str = "SQLVALIDATOR_EXCLUDE_RULES";
    pub const HTTP_HOST: &str = "SQLVALIDATOR_HTTP_HOST";
    pub const HTTP_PORT: &str = "SQLVALIDATOR_HTTP_PORT";
    pub const CORS_ORIGIN: &str = "SQLVALIDATOR_CORS_ORIGIN";
    pub const REQUEST_TIMEOUT_SECS: &str = "SQLVALIDATOR_REQUEST_TIMEOUT_SECS";
    pub const RUST_LOG: &str = "RUST_LOG";
    pub const JSON_LOGS: &str = "SQLVALIDATOR_JSON_LOGS";
}

/// Load configuration from environment variables.
///
/// Values that fail to parse are ignored.
pub fn load_from_env(mut builder: ConfigBuilder) -> ConfigBuilder {
    if let Ok(db_type) = env::var(vars::DB_TYPE) {
        builder = builder.db_type(db_type);
    }

    if let Ok(rules) = env::var(vars::EXCLUDE_RULES) {
        builder = builder.exclude_rules(split_list(&rules));
    }

    if let Ok(host_str) = env::var(vars::HTTP_HOST)
        && let Ok(host) = host_str.parse::<IpAddr>()
    {
        builder = builder.http_host(host);
    }

    if let Ok(port_str) = env::var(vars::HTTP_PORT)
        && let Ok(port) = port_str.parse::<u16>()
    {
        builder = builder.http_port(port);
    }

    if let Ok(origin) = env::var(vars::CORS_ORIGIN) {
        builder = builder.cors_origin(Some(origin));
    }

    if let Ok(timeout_str) = env::var(vars::REQUEST_TIMEOUT_SECS)
        && let Ok(secs) = timeout_str.parse::<u64>()
    {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }

    if let Ok(level) = env::var(vars::RUST_LOG) {
        builder = builder.log_level(level);
    }

    if let Ok(val) = env::var(vars::JSON_LOGS) {
        builder = builder.json_logs(parse_bool(&val));
    }

    builder
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
