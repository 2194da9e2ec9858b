//! Retell API access for retell-gateway.
//!
//! - [`RetellApi`]: the upstream endpoints the gateway reads
//! - [`RetellClient`]: `reqwest` implementation with bearer auth, timeouts
//!   and retry of transient failures
//! - [`RetellRepository`]: [`AgentRepository`](retell_core::AgentRepository)
//!   over any [`RetellApi`], mapping wire records into domain entities
//! - [`mapper`]: the snake_case → camelCase translation and its defaults
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use retell_client::{RetellClient, RetellRepository};
//! use retell_core::AgentRepository;
//!
//! let client = RetellClient::new("https://api.retellai.com", "key_...")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_retry_attempts(3);
//! let repo = RetellRepository::new(client);
//!
//! for agent in repo.list_agents().await? {
//!     println!("{} ({})", agent.name, agent.id);
//! }
//! ```

mod client;
mod error;
pub mod mapper;
mod repository;
pub mod wire;

pub use client::{RetellApi, RetellClient};
pub use error::RetellError;
pub use repository::RetellRepository;
