//! Health, readiness and liveness handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::dto::{HealthResponse, OverallStatus, StatusResponse};
use crate::error::AppError;
use crate::services::health::check_failure_status;
use crate::ServerState;

/// Aggregated dependency health; 503 while unhealthy.
pub async fn health(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let report = state.health.report().await;
    let status = match report.status {
        OverallStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };

    let body = HealthResponse {
        status: report.status,
        timestamp: Utc::now(),
        uptime: state.health.uptime().as_secs_f64(),
        services: report.services.into_iter().map(|(name, outcome)| (name, outcome.status)).collect(),
    };
    (status, Json(body))
}

pub async fn readiness(State(state): State<Arc<ServerState>>) -> Result<Json<StatusResponse>, AppError> {
    state.health.ready().map_err(check_failed)?;
    Ok(Json(StatusResponse { status: "ready" }))
}

pub async fn liveness(State(state): State<Arc<ServerState>>) -> Result<Json<StatusResponse>, AppError> {
    state.health.alive().map_err(check_failed)?;
    Ok(Json(StatusResponse { status: "alive" }))
}

fn check_failed(message: String) -> AppError {
    match check_failure_status(&message) {
        503 => AppError::Unavailable(message),
        _ => AppError::Internal(message),
    }
}
