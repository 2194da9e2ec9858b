//! Error taxonomy and failure classification.

use thiserror::Error;

/// Message fragments that mark an untyped failure as a missing resource.
const NOT_FOUND_MARKERS: &[&str] = &["not found"];

/// Keyword families checked in priority order; a message mentioning several
/// families is classified by the first one that matches.
const VALIDATION_KEYWORDS: &[&str] = &["invalid", "validation", "required"];
const AUTHORIZATION_KEYWORDS: &[&str] = &["unauthorized", "forbidden", "authentication"];
const CONNECTIVITY_KEYWORDS: &[&str] = &["timeout", "connection", "network"];

/// Errors surfaced to HTTP clients, each tied to a single status code.
///
/// The `Display` output is the message text alone so that it can be echoed
/// verbatim in response bodies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request was malformed or failed validation.
    #[error("{0}")]
    Validation(String),

    /// Upstream rejected our credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Upstream could not be reached or answered with a server error.
    #[error("{0}")]
    Gateway(String),

    /// The service is misconfigured. Not recoverable per request.
    #[error("{0}")]
    Configuration(String),

    /// Anything that does not fit the categories above.
    #[error("{0}")]
    Unknown(String),
}

impl ApiError {
    /// Classifies an untyped failure message into a typed error.
    ///
    /// Used at the upstream boundary where failures arrive as text. Matching
    /// is case-insensitive and the original message is kept unchanged.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if mentions(NOT_FOUND_MARKERS) {
            Self::NotFound(message)
        } else if mentions(VALIDATION_KEYWORDS) {
            Self::Validation(message)
        } else if mentions(AUTHORIZATION_KEYWORDS) {
            Self::Unauthorized(message)
        } else if mentions(CONNECTIVITY_KEYWORDS) {
            Self::Gateway(message)
        } else {
            Self::Unknown(message)
        }
    }

    /// Creates the not-found error for a resource looked up by ID.
    pub fn not_found(resource: &str, id: &str) -> Self {
        Self::NotFound(format!("{resource} with ID {id} not found"))
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Gateway(_) => 502,
            Self::Configuration(_) | Self::Unknown(_) => 500,
        }
    }

    /// Returns `true` for anticipated failures with a defined client-facing
    /// outcome, `false` for defects such as misconfiguration.
    pub fn is_operational(&self) -> bool {
        !matches!(self, Self::Configuration(_) | Self::Unknown(_))
    }

    /// The message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m)
            | Self::Validation(m)
            | Self::Unauthorized(m)
            | Self::Gateway(m)
            | Self::Configuration(m)
            | Self::Unknown(m) => m,
        }
    }
}
