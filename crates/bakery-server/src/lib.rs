//! HTTP layer for the bakery availability checker.
//!
//! [`build_router`] wires the routes around a shared [`ServerState`]; the
//! binary in `main.rs` loads configuration and serves it.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::get;
use axum::Router;
use bakery_agent::QueryService;
use bakery_core::ToolSchema;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub service: QueryService,
    /// Tools the agent may call; empty when delegation is disabled.
    pub tools: Vec<ToolSchema>,
}

impl ServerState {
    pub fn new(service: QueryService, tools: Vec<ToolSchema>) -> Self {
        Self { service, tools }
    }
}

/// Builds the application router with request tracing and permissive CORS.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/check", get(handlers::check::check_get).post(handlers::check::check_post))
        .route("/tools", get(handlers::tools::list))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
