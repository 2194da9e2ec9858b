//! Upstream failures and their translation into [`ApiError`].

use retell_core::ApiError;
use thiserror::Error;

/// Errors raised while talking to the Retell API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetellError {
    /// Retell answered with a non-2xx status.
    #[error("Retell API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response.
    #[error("Network error calling Retell API: {0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("Retell API request timeout")]
    Timeout,

    /// The response body did not match the expected shape.
    #[error("Failed to decode Retell API response: {0}")]
    Decode(String),

    /// The agent's response engine does not reference a Retell LLM.
    #[error("Agent {agent_id} does not have an associated LLM")]
    MissingLlm { agent_id: String },
}

impl RetellError {
    /// Returns `true` if retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Decode(_) | Self::MissingLlm { .. } => false,
        }
    }

    /// Returns `true` if Retell reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Structured status codes map directly; everything without one falls back
/// to keyword classification of the message.
impl From<RetellError> for ApiError {
    fn from(err: RetellError) -> Self {
        let message = err.to_string();
        match &err {
            RetellError::Status { status: 404, .. } => ApiError::NotFound(message),
            RetellError::Status { status: 400 | 422, .. } => ApiError::Validation(message),
            RetellError::Status { status: 401 | 403, .. } => ApiError::Unauthorized(message),
            RetellError::Status { status, .. } if *status == 429 || *status >= 500 => {
                ApiError::Gateway(message)
            }
            RetellError::Transport(_) | RetellError::Timeout | RetellError::Decode(_) => {
                ApiError::Gateway(message)
            }
            RetellError::Status { .. } | RetellError::MissingLlm { .. } => ApiError::classify(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn status(code: u16, message: &str) -> RetellError {
        RetellError::Status { status: code, message: message.into() }
    }

    #[rstest]
    #[case(status(404, "Not Found"), 404)]
    #[case(status(400, "bad"), 400)]
    #[case(status(422, "bad"), 400)]
    #[case(status(401, "nope"), 401)]
    #[case(status(403, "nope"), 401)]
    #[case(status(429, "slow down"), 502)]
    #[case(status(500, "boom"), 502)]
    #[case(status(503, "unavailable"), 502)]
    #[case(RetellError::Timeout, 502)]
    #[case(RetellError::Transport("connection refused".into()), 502)]
    #[case(RetellError::Decode("missing field `agent_id`".into()), 502)]
    #[case(RetellError::MissingLlm { agent_id: "a".into() }, 500)]
    fn maps_to_api_status(#[case] err: RetellError, #[case] expected: u16) {
        assert_eq!(ApiError::from(err).status_code(), expected);
    }

    #[test]
    fn unmapped_status_falls_back_to_message_keywords() {
        let err = ApiError::from(status(409, "Authentication token expired"));
        assert!(matches!(err, ApiError::Unauthorized(_)));

        let err = ApiError::from(status(418, "teapot"));
        assert!(matches!(err, ApiError::Unknown(_)));
    }

    #[test]
    fn message_carries_status_and_body() {
        let err = ApiError::from(status(500, "upstream exploded"));
        assert_eq!(err.message(), "Retell API error 500: upstream exploded");
    }

    #[test]
    fn transient_failures() {
        assert!(RetellError::Timeout.is_transient());
        assert!(status(502, "").is_transient());
        assert!(status(429, "").is_transient());
        assert!(!status(404, "").is_transient());
        assert!(!RetellError::Decode("x".into()).is_transient());
    }
}
