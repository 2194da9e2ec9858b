//! [`AgentRepository`] backed by the Retell API.

use async_trait::async_trait;
use chrono::Utc;
use retell_core::{Agent, AgentPrompt, AgentRepository, AgentVersion, ApiError};
use tracing::debug;

use crate::client::RetellApi;
use crate::error::RetellError;
use crate::mapper::{map_agent, map_agent_prompt, map_agent_version};
use crate::wire::AgentRecord;

/// Reads agents from Retell and maps them into domain entities.
pub struct RetellRepository<A> {
    api: A,
}

impl<A: RetellApi> RetellRepository<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Fetches an agent record, treating a Retell 404 as absent.
    async fn fetch_agent(&self, id: &str) -> Result<Option<AgentRecord>, RetellError> {
        match self.api.get_agent(id).await {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.is_not_found() => {
                debug!("Retell has no agent {}", id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<A: RetellApi> AgentRepository for RetellRepository<A> {
    async fn list_agents(&self) -> Result<Vec<Agent>, ApiError> {
        let records = self.api.list_agents().await?;
        Ok(records.into_iter().map(map_agent).collect())
    }

    async fn find_agent(&self, id: &str) -> Result<Option<Agent>, ApiError> {
        Ok(self.fetch_agent(id).await?.map(map_agent))
    }

    async fn find_agent_prompt(&self, id: &str) -> Result<Option<AgentPrompt>, ApiError> {
        let Some(agent) = self.fetch_agent(id).await? else {
            return Ok(None);
        };

        let llm_id = agent
            .response_engine
            .as_ref()
            .and_then(|engine| engine.llm_id.as_deref())
            .ok_or_else(|| RetellError::MissingLlm { agent_id: agent.agent_id.clone() })?;

        let llm = self.api.get_retell_llm(llm_id).await?;
        Ok(Some(map_agent_prompt(&agent, llm, Utc::now())))
    }

    async fn list_agent_versions(&self, id: &str) -> Result<Vec<AgentVersion>, ApiError> {
        let records = self.api.get_agent_versions(id).await?;
        Ok(records.into_iter().map(map_agent_version).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::wire::{AgentVersionRecord, LlmRecord, ResponseEngineRecord};

    /// In-memory Retell API that records which LLMs were requested.
    #[derive(Default)]
    struct FakeApi {
        agents: HashMap<String, AgentRecord>,
        llms: HashMap<String, LlmRecord>,
        failure: Option<RetellError>,
        llm_requests: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn with_agent(mut self, record: AgentRecord) -> Self {
            self.agents.insert(record.agent_id.clone(), record);
            self
        }

        fn with_llm(mut self, record: LlmRecord) -> Self {
            self.llms.insert(record.llm_id.clone(), record);
            self
        }

        fn failing(mut self, err: RetellError) -> Self {
            self.failure = Some(err);
            self
        }

        fn check(&self) -> Result<(), RetellError> {
            self.failure.clone().map_or(Ok(()), Err)
        }
    }

    fn not_found() -> RetellError {
        RetellError::Status { status: 404, message: "Not Found".into() }
    }

    #[async_trait]
    impl RetellApi for FakeApi {
        async fn list_agents(&self) -> Result<Vec<AgentRecord>, RetellError> {
            self.check()?;
            Ok(self.agents.values().cloned().collect())
        }

        async fn get_agent(&self, agent_id: &str) -> Result<AgentRecord, RetellError> {
            self.check()?;
            self.agents.get(agent_id).cloned().ok_or_else(not_found)
        }

        async fn get_retell_llm(&self, llm_id: &str) -> Result<LlmRecord, RetellError> {
            self.llm_requests.lock().unwrap().push(llm_id.to_string());
            self.llms.get(llm_id).cloned().ok_or_else(not_found)
        }

        async fn get_agent_versions(&self, agent_id: &str) -> Result<Vec<AgentVersionRecord>, RetellError> {
            self.check()?;
            Ok(vec![
                AgentVersionRecord {
                    agent_id: agent_id.to_string(),
                    version: Some(Some(0)),
                    last_modification_timestamp: 1,
                    ..Default::default()
                },
                AgentVersionRecord {
                    agent_id: agent_id.to_string(),
                    version: Some(Some(1)),
                    is_published: true,
                    last_modification_timestamp: 2,
                    ..Default::default()
                },
            ])
        }
    }

    fn agent_with_llm(id: &str, llm_id: Option<&str>) -> AgentRecord {
        AgentRecord {
            agent_id: id.into(),
            agent_name: Some("Support".into()),
            response_engine: Some(ResponseEngineRecord {
                engine_type: Some("retell-llm".into()),
                llm_id: llm_id.map(String::from),
                version: None,
            }),
            ..Default::default()
        }
    }

    fn llm(id: &str, prompt: &str) -> LlmRecord {
        LlmRecord {
            llm_id: id.into(),
            general_prompt: Some(prompt.into()),
            version: Some(4),
            last_modification_timestamp: Some(1_703_001_600_000),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn lists_and_maps_agents() {
        let repo = RetellRepository::new(FakeApi::default().with_agent(agent_with_llm("a-1", None)));
        let agents = repo.list_agents().await.unwrap();

        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].id, "a-1");
        assert_eq!(agents[0].model.as_deref(), Some("retell-llm"));
    }

    #[tokio::test]
    async fn upstream_404_is_absent() {
        let repo = RetellRepository::new(FakeApi::default());
        assert_eq!(repo.find_agent("missing").await.unwrap(), None);
        assert_eq!(repo.find_agent_prompt("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn other_upstream_failures_are_classified() {
        let api = FakeApi::default().failing(RetellError::Status { status: 401, message: "bad key".into() });
        let repo = RetellRepository::new(api);

        let err = repo.find_agent("a-1").await.unwrap_err();
        assert_eq!(err.status_code(), 401);

        let err = repo.list_agents().await.unwrap_err();
        assert_eq!(err.message(), "Retell API error 401: bad key");
    }

    #[tokio::test]
    async fn prompt_is_read_from_the_agents_llm() {
        let api = FakeApi::default()
            .with_agent(agent_with_llm("a-1", Some("llm-9")))
            .with_llm(llm("llm-9", "Greet the caller."));
        let repo = RetellRepository::new(api);

        let prompt = repo.find_agent_prompt("a-1").await.unwrap().unwrap();
        assert_eq!(prompt.agent_id, "a-1");
        assert_eq!(prompt.prompt, "Greet the caller.");
        assert_eq!(prompt.version, Some(4));
        assert_eq!(prompt.updated_at.timestamp_millis(), 1_703_001_600_000);
        assert_eq!(*repo.api.llm_requests.lock().unwrap(), vec!["llm-9".to_string()]);
    }

    #[tokio::test]
    async fn prompt_without_llm_fails_before_fetching_llm() {
        let repo = RetellRepository::new(FakeApi::default().with_agent(agent_with_llm("a-1", None)));

        let err = repo.find_agent_prompt("a-1").await.unwrap_err();
        assert_eq!(err.message(), "Agent a-1 does not have an associated LLM");
        assert_eq!(err.status_code(), 500);
        assert!(repo.api.llm_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn versions_are_mapped_in_order() {
        let repo = RetellRepository::new(FakeApi::default());
        let versions = repo.list_agent_versions("a-1").await.unwrap();

        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].version, Some(Some(0)));
        assert!(!versions[0].is_published);
        assert!(versions[1].is_published);
        assert_eq!(versions[1].last_modification_timestamp.as_millis(), 2);
    }
}
