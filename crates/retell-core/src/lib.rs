//! Core domain types and error definitions for retell-gateway.
//!
//! This crate provides the types shared by the client and the server:
//!
//! - [`Agent`], [`AgentPrompt`], [`AgentVersion`]: camelCase domain entities
//! - [`EpochMillis`]: unit-typed upstream timestamp
//! - [`Nullable`]: optional field that keeps `null` apart from absent
//! - [`ApiError`]: error taxonomy with HTTP status mapping and the keyword
//!   classifier for untyped failures
//! - [`require_found`]: existence guard for repository lookups
//! - [`AgentRepository`]: the read contract the server depends on
//!
//! # Example
//!
//! ```rust
//! use retell_core::{require_found, ApiError};
//!
//! let missing: Option<String> = None;
//! let err = require_found(missing, "Agent", "agent-999").unwrap_err();
//! assert_eq!(err.status_code(), 404);
//! assert_eq!(err.message(), "Agent with ID agent-999 not found");
//!
//! assert_eq!(ApiError::classify("Network timeout").status_code(), 502);
//! ```

mod error;
mod model;
pub mod nullable;
mod presence;
mod repository;

pub use error::ApiError;
pub use model::{
    Agent, AgentPrompt, AgentVersion, EpochMillis, PiiConfig, PronunciationEntry, ResponseEngine,
    UserDtmfOptions,
};
pub use nullable::Nullable;
pub use presence::{require_found, Presence};
pub use repository::AgentRepository;
