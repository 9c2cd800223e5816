//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the record endpoints
//! - Wire up middleware (request ID, tracing, CORS, body limit, panics)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Request},
    response::Response,
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{CorsConfig, GatewayConfig};
use crate::http::handlers::{create_record, delete_record, health, list_records, update_record};
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::unknown_error_response;
use crate::lifecycle::signals::shutdown_signal;
use crate::remote::RemoteTable;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<dyn RemoteTable>,
}

/// HTTP server for the record gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server bound to the given table.
    pub fn new(config: GatewayConfig, table: Arc<dyn RemoteTable>) -> Self {
        let state = AppState { table };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let routes = Router::new()
            .route("/record", get(list_records).post(create_record))
            .route("/record/{id}", put(update_record).delete(delete_record))
            .route("/health", get(health))
            .with_state(state);

        apply_layers(routes, config)
    }

    /// Run the server until a shutdown signal or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            table = %self.config.airtable.table_name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Wrap `router` in the middleware stack. The last layer added runs first.
///
/// The body limit is enforced by the `Json` extractor, so an oversized body
/// is rejected through `ApiError` with the usual envelope.
fn apply_layers(router: Router, config: &GatewayConfig) -> Router {
    let mut router = router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(DefaultBodyLimit::max(config.listener.max_body_bytes))
        .layer(cors_layer(&config.cors));

    if config.observability.request_logging {
        router = router.layer(TraceLayer::new_for_http().make_span_with(
            |request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(&X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id,
                )
            },
        ));
    }

    router
        .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
        .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
}

fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    unknown_error_response()
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let max_age = Duration::from_secs(config.max_age_secs);
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive().max_age(max_age);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(max_age)
}
