//! Agent HTTP handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use retell_core::{Agent, AgentPrompt, AgentVersion};
use tracing::info;

use crate::dto::Envelope;
use crate::error::AppError;
use crate::services::agents;
use crate::ServerState;

/// Lists every agent.
pub async fn list(State(state): State<Arc<ServerState>>) -> Result<Json<Envelope<Vec<Agent>>>, AppError> {
    let agents = agents::list_agents(state.repository.as_ref()).await?;
    info!("Listed {} agents", agents.len());
    Ok(Json(Envelope::ok(agents, "Agents retrieved successfully")))
}

/// Fetches one agent.
pub async fn get(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Agent>>, AppError> {
    let agent = agents::get_agent(state.repository.as_ref(), &id).await?;
    Ok(Json(Envelope::ok(agent, "Agent retrieved successfully")))
}

/// `/agents/` with nothing after the slash: an empty ID.
pub async fn get_empty(State(state): State<Arc<ServerState>>) -> Result<Json<Envelope<Agent>>, AppError> {
    let agent = agents::get_agent(state.repository.as_ref(), "").await?;
    Ok(Json(Envelope::ok(agent, "Agent retrieved successfully")))
}

/// Fetches the prompt of an agent's LLM.
pub async fn prompt(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<AgentPrompt>>, AppError> {
    let prompt = agents::get_agent_prompt(state.repository.as_ref(), &id).await?;
    Ok(Json(Envelope::ok(prompt, "Agent prompt retrieved successfully")))
}

/// Lists the version history of an agent.
pub async fn versions(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Vec<AgentVersion>>>, AppError> {
    let versions = agents::get_agent_versions(state.repository.as_ref(), &id).await?;
    Ok(Json(Envelope::ok(versions, "Agent versions retrieved successfully")))
}
