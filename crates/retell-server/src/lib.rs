//! HTTP façade over Retell voice agents.
//!
//! [`build_router`] assembles the full application: the agents API under
//! `/api/v1`, health probes, request metrics, the service banner and the
//! embedded console.

pub mod dto;
mod error;
mod handlers;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use retell_core::AgentRepository;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::error::{panic_response, AGENT_FAILURE_MESSAGE, INTERNAL_FAILURE_MESSAGE};
use crate::services::health::HealthService;
use crate::services::metrics::{track_metrics, MetricsSink};

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub repository: Arc<dyn AgentRepository>,
    pub health: HealthService,
    pub metrics: Arc<dyn MetricsSink>,
}

/// Routes under `/api/v1`. Panics here answer with the agent failure message.
fn api_routes() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/agents", get(handlers::agents::list))
        .route("/agents/", get(handlers::agents::get_empty))
        .route("/agents/{id}", get(handlers::agents::get))
        .route("/agents/{id}/prompt", get(handlers::agents::prompt))
        .route("/agents/{id}/versions", get(handlers::agents::versions))
        .layer(CatchPanicLayer::custom(|payload| panic_response(payload, AGENT_FAILURE_MESSAGE)))
}

/// Builds the application router around the given state.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                request_id = %Uuid::new_v4(),
                method = %req.method(),
                uri = %req.uri(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    Router::new()
        .route("/", get(handlers::banner))
        .route("/health", get(handlers::health::health))
        .route("/readiness", get(handlers::health::readiness))
        .route("/liveness", get(handlers::health::liveness))
        .route("/metrics", get(handlers::metrics::metrics))
        .nest("/api/v1", api_routes())
        .nest("/console", retell_console::routes())
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(|payload| panic_response(payload, INTERNAL_FAILURE_MESSAGE)))
        .layer(middleware::from_fn_with_state(state.metrics.clone(), track_metrics))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
