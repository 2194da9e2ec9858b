//! Read access to agent data, independent of where it comes from.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::{Agent, AgentPrompt, AgentVersion};

/// Source of agents and their prompts and versions.
///
/// Single-item lookups return `Ok(None)` when the resource does not exist;
/// the caller decides how absence is reported.
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Lists every agent.
    async fn list_agents(&self) -> Result<Vec<Agent>, ApiError>;

    /// Looks up one agent.
    async fn find_agent(&self, id: &str) -> Result<Option<Agent>, ApiError>;

    /// Looks up the prompt of an agent's LLM.
    async fn find_agent_prompt(&self, id: &str) -> Result<Option<AgentPrompt>, ApiError>;

    /// Lists all versions of an agent.
    async fn list_agent_versions(&self, id: &str) -> Result<Vec<AgentVersion>, ApiError>;
}
