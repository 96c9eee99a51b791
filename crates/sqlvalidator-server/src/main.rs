use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use sqlvalidator_server::ValidationService;
use sqlvalidator_server::config::{self, split_list};
use sqlvalidator_server::dialect::KNOWN_DB_TYPES;
use sqlvalidator_server::observability::init_observability;
use sqlvalidator_server::transport::run_transport;

#[derive(Parser, Debug)]
#[command(name = "sqlvalidator")]
#[command(about = "HTTP service that validates SQL queries", long_about = None)]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database type used for linting and the function whitelist
    #[arg(short, long)]
    db_type: Option<String>,

    /// Linter rule codes to disable (comma-separated, `all` disables every rule)
    #[arg(long)]
    exclude_rules: Option<String>,

    /// HTTP bind host
    #[arg(long)]
    http_host: Option<IpAddr>,

    /// HTTP bind port
    #[arg(long)]
    http_port: Option<u16>,

    /// Allowed CORS origin (`*` allows any)
    #[arg(long)]
    cors_origin: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    request_timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable JSON logging output
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Precedence: CLI > env > file > defaults
    let mut builder = if let Some(ref path) = args.config {
        config::load_config_from_path(path)?
    } else {
        config::load_config()?
    };

    if let Some(db_type) = args.db_type {
        builder = builder.db_type(db_type);
    }

    if let Some(ref rules) = args.exclude_rules {
        builder = builder.exclude_rules(split_list(rules));
    }

    if let Some(host) = args.http_host {
        builder = builder.http_host(host);
    }

    if let Some(port) = args.http_port {
        builder = builder.http_port(port);
    }

    if let Some(origin) = args.cors_origin {
        builder = builder.cors_origin(Some(origin));
    }

    if let Some(secs) = args.request_timeout {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }

    if args.verbose {
        builder = builder.log_level("debug".to_string());
    }

    if args.json_logs {
        builder = builder.json_logs(true);
    }

    let config = builder.build()?;

    init_observability(&config.telemetry)?;

    if !config.db_type.is_known() {
        tracing::warn!(
            "Unknown DB type '{}', expected one of {:?}. Falling back to MySQL rules",
            config.db_type,
            KNOWN_DB_TYPES
        );
    }

    let service = ValidationService::new(&config);

    tracing::info!("Using DB type: {}", config.db_type.display_name());
    tracing::info!("Linter dialect: {}", config.db_type.lint_dialect());
    if !config.lint.exclude_rules.is_empty() {
        tracing::info!("Excluded lint rules: {:?}", config.lint.exclude_rules);
    }
    tracing::info!("Request timeout: {:?}", config.request_timeout());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received");
    };

    run_transport(service, &config, shutdown)
        .await
        .map_err(Into::into)
}
