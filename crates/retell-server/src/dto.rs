//! Data transfer objects for HTTP message serialization.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The one response shape: payload plus a human-readable message.
///
/// Errors carry `data: null`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self { data: Some(data), message: message.into() }
    }
}

impl Envelope<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self { data: None, message: message.into() }
    }
}

// === Health Types ===

/// Status of a single dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Up,
    Degraded,
    Down,
}

/// Status of the service as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: OverallStatus,
    pub timestamp: DateTime<Utc>,
    /// Seconds since startup.
    pub uptime: f64,
    pub services: BTreeMap<String, ServiceStatus>,
}

/// Body of readiness and liveness answers.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

// === Metrics Types ===

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointMetrics {
    pub requests: u64,
    pub errors: u64,
    pub error_rate: f64,
    pub average_response_time_ms: f64,
    pub p95_response_time_ms: f64,
    pub p99_response_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub total_errors: u64,
    pub error_rate: f64,
    pub average_response_time_ms: f64,
    pub p95_response_time_ms: f64,
    pub p99_response_time_ms: f64,
    pub endpoints: BTreeMap<String, EndpointMetrics>,
}

// === Banner ===

/// Service banner served at `/`.
#[derive(Debug, Serialize)]
pub struct Banner {
    pub name: &'static str,
    pub version: &'static str,
    pub links: BannerLinks,
}

#[derive(Debug, Serialize)]
pub struct BannerLinks {
    pub agents: &'static str,
    pub console: &'static str,
    pub health: &'static str,
    pub metrics: &'static str,
}
