//! HTTP transport implementation

use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::TransportConfig;
use crate::constants::STATUS_OK;
use crate::server::{LINT_ENDPOINT, VALIDATE_ENDPOINT, ValidationService};
use crate::types::HealthResponse;
use crate::{Error, Result};

/// Build the application router
pub fn router(service: ValidationService, config: &TransportConfig) -> Router {
    #[allow(unused_mut)]
    let mut app = Router::new()
        .route(VALIDATE_ENDPOINT, post(validate_handler))
        .route(LINT_ENDPOINT, post(lint_handler))
        .route("/health", get(health_handler));

    #[cfg(feature = "metrics")]
    {
        app = app.route("/metrics", get(metrics_handler));
    }

    app.with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(build_cors_layer(config.cors_origin.as_deref()))
}

/// Run HTTP server until `shutdown` resolves
pub async fn run_http(
    service: ValidationService,
    config: &TransportConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = SocketAddr::new(config.http_host, config.http_port);

    emit_security_warnings(config.http_host, config.cors_origin.as_deref());

    let app = router(service, config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Transport(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("HTTP server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Transport(format!("HTTP server error: {e}")))?;

    tracing::info!("HTTP server shutdown complete");
    Ok(())
}

fn build_cors_layer(origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    match origin {
        None | Some("*") => cors.allow_origin(Any),
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => cors.allow_origin(value),
            Err(_) => {
                tracing::warn!(origin, "Invalid CORS origin, allowing any origin");
                cors.allow_origin(Any)
            }
        },
    }
}

fn emit_security_warnings(host: IpAddr, cors_origin: Option<&str>) {
    let is_non_loopback = !host.is_loopback();
    let is_all_interfaces =
        host == IpAddr::V4(Ipv4Addr::UNSPECIFIED) || host == IpAddr::V6(Ipv6Addr::UNSPECIFIED);

    if is_all_interfaces {
        tracing::warn!(
            "HTTP server binding to all interfaces ({host}). \
             This exposes the server to all network interfaces."
        );
    } else if is_non_loopback {
        tracing::warn!(
            "HTTP server binding to non-loopback address ({host}). \
             Ensure network security policies are in place."
        );
    }

    if is_non_loopback {
        tracing::warn!(
            "SECURITY WARNING: HTTP server accessible from network without authentication."
        );
    }

    if matches!(cors_origin, None | Some("*")) {
        tracing::info!(
            "CORS origin not restricted (SQLVALIDATOR_CORS_ORIGIN). Allowing any origin"
        );
    }
}

async fn validate_handler(
    State(service): State<ValidationService>,
    body: Bytes,
) -> impl IntoResponse {
    let (status, result) = service.validate(&body).await;
    (status, Json(result))
}

async fn lint_handler(State(service): State<ValidationService>, body: Bytes) -> impl IntoResponse {
    let (status, result) = service.lint(&body).await;
    (status, Json(result))
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: STATUS_OK.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(feature = "metrics")]
async fn metrics_handler() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        crate::observability::render_metrics(),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    fn app_with(config: &Config) -> Router {
        router(ValidationService::new(config), &config.transport)
    }

    fn app() -> Router {
        app_with(&Config::builder().build().unwrap())
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validate_valid_query() {
        let (status, body) = post_json(
            app(),
            "/validate",
            r#"{"sql": "SELECT name FROM employees;"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"valid": true, "errors": []}));
    }

    #[tokio::test]
    async fn test_validate_disallowed_function() {
        let (status, body) = post_json(
            app(),
            "/validate",
            r#"{"sql": "SELECT mx(name) FROM employees;"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "valid": false,
                "errors": [{"line": 1, "pos": 8, "message": "Function 'MX' is not allowed for MYSQL."}]
            })
        );
    }

    #[tokio::test]
    async fn test_validate_trailing_comma() {
        let (status, body) = post_json(
            app(),
            "/validate",
            r#"{"sql": "SELECT name, FROM employees;"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], json!(false));
        let errors = body["errors"].as_array().unwrap();
        assert!(errors.iter().all(|e| e["line"].is_u64() && e["pos"].is_u64()));
        assert!(
            errors
                .iter()
                .any(|e| e["message"].as_str().unwrap().contains("comma"))
        );
    }

    #[tokio::test]
    async fn test_validate_empty_sql() {
        let (status, body) = post_json(app(), "/validate", r#"{"sql": "   "}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"valid": false, "errors": ["No SQL provided"]}));
    }

    #[tokio::test]
    async fn test_validate_malformed_body() {
        let (status, body) = post_json(app(), "/validate", "{not json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["valid"], json!(false));
        assert!(body["errors"][0].is_string());
    }

    #[tokio::test]
    async fn test_validate_array_body_is_malformed() {
        for payload in ["[]", r#"["SELECT mx(name) FROM employees;"]"#] {
            let (status, body) = post_json(app(), "/validate", payload).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body,
                json!({"valid": false, "errors": ["invalid type: array, expected a JSON object"]})
            );
        }
    }

    #[tokio::test]
    async fn test_validate_request_dialect_ignored() {
        let config = Config::builder().db_type("postgres").build().unwrap();
        let (_, body) = post_json(
            app_with(&config),
            "/validate",
            r#"{"sql": "SELECT NVL(a, 0) FROM t", "dialect": "oracle"}"#,
        )
        .await;
        assert_eq!(
            body["errors"][0]["message"],
            json!("Function 'NVL' is not allowed for POSTGRES.")
        );
    }

    #[tokio::test]
    async fn test_lint_endpoint() {
        let (status, body) = post_json(
            app(),
            "/lint",
            r#"{"sql": "SELECT name", "dialect": "ansi"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], json!(false));
        assert_eq!(body["errors"][0]["line"], json!(1));
    }

    #[tokio::test]
    async fn test_lint_unknown_dialect() {
        let (status, body) = post_json(
            app(),
            "/lint",
            r#"{"sql": "SELECT 1", "dialect": "cobol"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"valid": false, "errors": ["Unknown dialect: cobol"]}));
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], json!("ok"));
        assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
    }

    #[tokio::test]
    async fn test_validate_rejects_get() {
        let response = app()
            .oneshot(Request::get("/validate").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        let response = app()
            .oneshot(
                Request::post("/validate")
                    .header(header::ORIGIN, "https://anywhere.example")
                    .body(Body::from(r#"{"sql": "SELECT 1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_restricted_origin() {
        let config = Config::builder()
            .cors_origin(Some("https://app.example.com".to_string()))
            .build()
            .unwrap();
        let response = app_with(&config)
            .oneshot(
                Request::post("/validate")
                    .header(header::ORIGIN, "https://app.example.com")
                    .body(Body::from(r#"{"sql": "SELECT 1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://app.example.com"
        );
    }

    #[test]
    fn test_build_cors_layer_variants() {
        let _ = build_cors_layer(None);
        let _ = build_cors_layer(Some("*"));
        let _ = build_cors_layer(Some("https://example.com"));
        let _ = build_cors_layer(Some("bad\norigin"));
    }

    #[test]
    fn test_security_warnings_emitted_for_non_loopback() {
        emit_security_warnings(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)), None);
        emit_security_warnings(IpAddr::V4(Ipv4Addr::UNSPECIFIED), Some("*"));
    }

    #[test]
    fn test_loopback_no_warning_needed() {
        emit_security_warnings(IpAddr::V4(Ipv4Addr::LOCALHOST), Some("https://example.com"));
    }
}
