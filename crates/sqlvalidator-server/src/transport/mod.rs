//! Transport layer
//!
//! The service is exposed over HTTP only

mod http;

use std::future::Future;

pub use http::router;

use crate::Result;
use crate::config::Config;
use crate::server::ValidationService;

/// Serve `service` until `shutdown` resolves
pub async fn run_transport(
    service: ValidationService,
    config: &Config,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    http::run_http(service, &config.transport, shutdown).await
}
