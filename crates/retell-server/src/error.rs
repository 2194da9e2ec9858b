//! Application error type and Axum response conversion.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use retell_core::ApiError;
use tracing::{error, warn};

use crate::dto::Envelope;

/// Message for panics inside the agents API.
pub const AGENT_FAILURE_MESSAGE: &str = "Failed to retrieve agent";

/// Message for panics anywhere else.
pub const INTERNAL_FAILURE_MESSAGE: &str = "Internal server error";

/// Any failure a handler can return; rendered as the error envelope.
#[derive(Debug)]
pub enum AppError {
    /// A classified domain or upstream failure.
    Api(ApiError),
    /// The service cannot take traffic right now.
    Unavailable(String),
    Internal(String),
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Api(err) => {
                let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, err.message().to_string())
            }
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        match status.is_server_error() {
            true => error!("Request failed ({}): {}", status.as_u16(), message),
            false => warn!("Request rejected ({}): {}", status.as_u16(), message),
        }
        (status, Json(Envelope::error(message))).into_response()
    }
}

/// Answers a caught panic with a fixed message; the payload is only logged.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>, message: &'static str) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!("Handler panicked: {}", detail);

    (StatusCode::INTERNAL_SERVER_ERROR, Json(Envelope::error(message))).into_response()
}
