use crate::config::Config;
use crate::error::{GlossaryError, Result};
use crate::rpc::service::{parse_message, GlossaryService};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// JSON-RPC over HTTP
pub struct HttpServer {
    service: GlossaryService,
    api_key: Option<String>,
    allowed_origins: Vec<String>,
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    service: GlossaryService,
    api_key: Option<String>,
    allowed_origins: Vec<String>,
}

impl HttpServer {
    pub fn new(service: GlossaryService, api_key: Option<String>, allowed_origins: Vec<String>) -> Self {
        Self {
            service,
            api_key,
            allowed_origins,
        }
    }

    /// Build from config; fails when auth is enabled but the key variable is unset
    pub fn from_config(service: GlossaryService, config: &Config) -> Result<Self> {
        let api_key = config
            .api_key()
            .map_err(|e| GlossaryError::Config(e.to_string()))?;
        Ok(Self::new(service, api_key, config.server.allowed_origins.clone()))
    }

    /// Bind and serve until Ctrl-C
    pub async fn run(&self, addr: &str) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            GlossaryError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to bind to {}: {}", addr, e),
            ))
        })?;

        log::info!("Glossary HTTP server listening on http://{}", addr);
        log::info!("JSON-RPC endpoint: http://{}/rpc", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                GlossaryError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("HTTP server error: {}", e),
                ))
            })?;

        log::info!("Glossary HTTP server stopped");
        Ok(())
    }

    /// Create the axum router
    pub fn router(&self) -> Router {
        // Restrict CORS to configured origins so preflight matches enforcement;
        // allow Any when none are configured (local use).
        let cors = if self.allowed_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<axum::http::HeaderValue> = self
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/rpc", post(handle_rpc))
            .route("/health", get(handle_health))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(cors),
            )
            .with_state(AppState {
                service: self.service.clone(),
                api_key: self.api_key.clone(),
                allowed_origins: self.allowed_origins.clone(),
            })
    }
}

/// Handle one JSON-RPC request per POST; the response is the body
async fn handle_rpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Response {
    if let Some(expected) = &state.api_key {
        if let Err(response) = validate_auth(&headers, expected) {
            return response;
        }
    }

    if let Err(response) = validate_origin(&headers, &state.allowed_origins) {
        return response;
    }

    let value = match parse_message(&body) {
        Ok(value) => value,
        Err(error) => return (StatusCode::BAD_REQUEST, Json(error)).into_response(),
    };

    match state.service.process_value(value) {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        // Notification
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Handle health check endpoint
async fn handle_health(State(state): State<AppState>) -> Response {
    let engine = state.service.engine();
    let mut body = serde_json::json!({
        "status": "ok",
        "service": "glossary-graph",
        "version": env!("CARGO_PKG_VERSION"),
        "term_count": engine.term_count(),
        "relation_count": engine.relation_count(),
    });

    if let Some(report) = state.service.report() {
        body["loaded_at"] = serde_json::json!(report.loaded_at.to_rfc3339());
        body["terms_sha256"] = serde_json::json!(report.terms_sha256);
        body["links_sha256"] = serde_json::json!(report.links_sha256);
    }

    (StatusCode::OK, Json(body)).into_response()
}

/// Validate Authorization header
fn validate_auth(headers: &HeaderMap, expected_key: &str) -> std::result::Result<(), Response> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "error": "Missing Authorization header",
                    "message": "Use 'Authorization: Bearer <api-key>' header"
                })),
            )
                .into_response()
        })?;

    match auth_header.strip_prefix("Bearer ") {
        Some(provided) if provided == expected_key => Ok(()),
        Some(_) => Err((
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Invalid API key" })),
        )
            .into_response()),
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "Invalid Authorization header format",
                "message": "Use 'Authorization: Bearer <api-key>' header"
            })),
        )
            .into_response()),
    }
}

/// Validate Origin header (prevents DNS rebinding attacks)
fn validate_origin(headers: &HeaderMap, allowed_origins: &[String]) -> std::result::Result<(), Response> {
    // No origins configured: allow all
    if allowed_origins.is_empty() {
        return Ok(());
    }

    // No origin header: direct request, not a browser
    let origin = match headers.get("origin").and_then(|h| h.to_str().ok()) {
        Some(o) => o,
        None => return Ok(()),
    };

    if allowed_origins.iter().any(|allowed| origin == allowed) {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({
                "error": "Origin not allowed",
                "message": format!("Origin '{}' is not in the allowed origins list", origin)
            })),
        )
            .into_response())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
