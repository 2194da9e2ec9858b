//! HTTP route handlers.

pub mod agents;
pub mod health;
pub mod metrics;

use axum::{http::StatusCode, Json};

use crate::dto::{Banner, BannerLinks, Envelope};

/// Service banner with links to the main entry points.
pub async fn banner() -> Json<Banner> {
    Json(Banner {
        name: "Retell Agent Gateway",
        version: env!("CARGO_PKG_VERSION"),
        links: BannerLinks {
            agents: "/api/v1/agents",
            console: "/console",
            health: "/health",
            metrics: "/metrics",
        },
    })
}

/// Any route nothing else matched.
pub async fn not_found() -> (StatusCode, Json<Envelope<()>>) {
    (StatusCode::NOT_FOUND, Json(Envelope::error("Route not found")))
}
