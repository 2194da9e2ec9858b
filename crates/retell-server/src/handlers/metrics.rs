//! Request metrics handler.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::MetricsSnapshot;
use crate::ServerState;

pub async fn metrics(State(state): State<Arc<ServerState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
