//! Configuration builder

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::Error;
use crate::dialect::DbType;

/// Server configuration, immutable once built
#[derive(Debug, Clone)]
pub struct Config {
    pub db_type: DbType,
    pub lint: LintConfig,
    pub transport: TransportConfig,
    pub telemetry: TelemetryConfig,
}

impl Config {
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    #[must_use]
    pub const fn db_type(&self) -> &DbType {
        &self.db_type
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.transport.request_timeout
    }
}

/// Linter rule selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintConfig {
    /// Rule codes to disable; `all` disables every rule
    pub exclude_rules: Vec<String>,
}

/// HTTP transport configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub http_host: IpAddr,
    pub http_port: u16,
    /// Allowed CORS origin; `None` or `*` allows any origin
    pub cors_origin: Option<String>,
    pub request_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            http_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            http_port: ConfigBuilder::DEFAULT_HTTP_PORT,
            cors_origin: None,
            request_timeout: ConfigBuilder::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json_logs: bool,
}

/// Configuration builder with fluent API
#[derive(Debug)]
pub struct ConfigBuilder {
    db_type: String,
    lint: LintConfig,
    transport: TransportConfig,
    telemetry: TelemetryConfig,
}

impl ConfigBuilder {
    const DEFAULT_DB_TYPE: &'static str = "mysql";
    const DEFAULT_HTTP_PORT: u16 = 5000;
    const DEFAULT_LOG_LEVEL: &'static str = "info";
    const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    #[must_use]
    pub fn new() -> Self {
        Self {
            db_type: Self::DEFAULT_DB_TYPE.to_string(),
            lint: LintConfig::default(),
            transport: TransportConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }

    #[must_use]
    pub fn db_type(mut self, db_type: impl Into<String>) -> Self {
        self.db_type = db_type.into();
        self
    }

    #[must_use]
    pub fn exclude_rules(mut self, rules: Vec<String>) -> Self {
        self.lint.exclude_rules = rules;
        self
    }

    #[must_use]
    pub const fn http_host(mut self, host: IpAddr) -> Self {
        self.transport.http_host = host;
        self
    }

    #[must_use]
    pub const fn http_port(mut self, port: u16) -> Self {
        self.transport.http_port = port;
        self
    }

    #[must_use]
    pub fn cors_origin(mut self, origin: Option<String>) -> Self {
        self.transport.cors_origin = origin;
        self
    }

    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.transport.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn log_level(mut self, level: String) -> Self {
        self.telemetry.log_level = level;
        self
    }

    #[must_use]
    pub const fn json_logs(mut self, enabled: bool) -> Self {
        self.telemetry.json_logs = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> crate::Result<Config> {
        let db_type = DbType::new(&self.db_type)?;

        if self.transport.http_port == 0 {
            return Err(Error::Config("http_port must be greater than 0".into()));
        }

        if self.transport.request_timeout.is_zero() {
            return Err(Error::Config(
                "request_timeout must be greater than 0".into(),
            ));
        }

        let log_level = if self.telemetry.log_level.is_empty() {
            Self::DEFAULT_LOG_LEVEL.to_string()
        } else {
            self.telemetry.log_level
        };

        let cors_origin = self
            .transport
            .cors_origin
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty());

        Ok(Config {
            db_type,
            lint: self.lint,
            transport: TransportConfig {
                cors_origin,
                ..self.transport
            },
            telemetry: TelemetryConfig {
                log_level,
                json_logs: self.telemetry.json_logs,
            },
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
