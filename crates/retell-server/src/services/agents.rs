//! Agent use cases: validate input, then read through the repository.

use retell_core::{require_found, Agent, AgentPrompt, AgentRepository, AgentVersion, ApiError};

/// Rejects blank IDs before any upstream call is made.
fn validate_id(id: &str) -> Result<&str, ApiError> {
    match id.trim().is_empty() {
        true => Err(ApiError::Validation("Agent ID is required".into())),
        false => Ok(id),
    }
}

pub async fn list_agents(repo: &dyn AgentRepository) -> Result<Vec<Agent>, ApiError> {
    repo.list_agents().await
}

pub async fn get_agent(repo: &dyn AgentRepository, id: &str) -> Result<Agent, ApiError> {
    let id = validate_id(id)?;
    require_found(repo.find_agent(id).await?, "Agent", id)
}

pub async fn get_agent_prompt(repo: &dyn AgentRepository, id: &str) -> Result<AgentPrompt, ApiError> {
    let id = validate_id(id)?;
    require_found(repo.find_agent_prompt(id).await?, "Agent", id)
}

pub async fn get_agent_versions(repo: &dyn AgentRepository, id: &str) -> Result<Vec<AgentVersion>, ApiError> {
    let id = validate_id(id)?;
    repo.list_agent_versions(id).await
}
