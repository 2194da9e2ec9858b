//! Dependency probes and their aggregation into one service status.
//!
//! Probes run concurrently, each raced against [`PROBE_TIMEOUT`]. A probe that
//! fails or times out counts as `down` with the timeout as its response time.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::future::join_all;
use retell_core::{AgentRepository, ApiError};
use tracing::warn;

use crate::dto::{OverallStatus, ServiceStatus};

/// Upper bound on a single probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// A probe answering slower than this reports `degraded`.
pub const SLOW_PROBE_THRESHOLD: Duration = Duration::from_secs(2);

/// Checks the health of one dependency.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self) -> Result<ServiceStatus, ApiError>;
}

/// Outcome of one probe run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub status: ServiceStatus,
    pub response_time: Duration,
}

/// Combined outcome of all probes.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub status: OverallStatus,
    pub services: BTreeMap<String, ProbeOutcome>,
}

/// Reduces individual statuses: any `down` wins, then any `degraded`.
pub fn overall_status<'a>(statuses: impl IntoIterator<Item = &'a ServiceStatus>) -> OverallStatus {
    statuses
        .into_iter()
        .fold(OverallStatus::Healthy, |acc, status| match (acc, status) {
            (OverallStatus::Unhealthy, _) | (_, ServiceStatus::Down) => OverallStatus::Unhealthy,
            (_, ServiceStatus::Degraded) => OverallStatus::Degraded,
            (acc, ServiceStatus::Up) => acc,
        })
}

/// Runs a fixed set of named probes.
pub struct HealthAggregator {
    probes: Vec<(String, Arc<dyn HealthProbe>)>,
    timeout: Duration,
}

impl HealthAggregator {
    pub fn new() -> Self {
        Self { probes: Vec::new(), timeout: PROBE_TIMEOUT }
    }

    /// Registers a probe under a service name.
    pub fn with_probe(mut self, name: impl Into<String>, probe: Arc<dyn HealthProbe>) -> Self {
        self.probes.push((name.into(), probe));
        self
    }

    /// Overrides the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs every probe concurrently and aggregates the results.
    pub async fn run(&self) -> HealthReport {
        let checks = self.probes.iter().map(|(name, probe)| async move {
            let start = Instant::now();
            let outcome = match tokio::time::timeout(self.timeout, probe.check()).await {
                Ok(Ok(status)) => ProbeOutcome { status, response_time: start.elapsed() },
                Ok(Err(e)) => {
                    warn!("Health probe '{}' failed: {}", name, e);
                    ProbeOutcome { status: ServiceStatus::Down, response_time: self.timeout }
                }
                Err(_) => {
                    warn!("Health probe '{}' timed out after {:?}", name, self.timeout);
                    ProbeOutcome { status: ServiceStatus::Down, response_time: self.timeout }
                }
            };
            (name.clone(), outcome)
        });

        let services: BTreeMap<String, ProbeOutcome> = join_all(checks).await.into_iter().collect();
        let status = overall_status(services.values().map(|o| &o.status));

        HealthReport { status, services }
    }
}

impl Default for HealthAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Probes Retell by listing agents through the repository.
pub struct RetellProbe {
    repository: Arc<dyn AgentRepository>,
}

impl RetellProbe {
    pub fn new(repository: Arc<dyn AgentRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl HealthProbe for RetellProbe {
    async fn check(&self) -> Result<ServiceStatus, ApiError> {
        let start = Instant::now();
        self.repository.list_agents().await?;
        match start.elapsed() > SLOW_PROBE_THRESHOLD {
            true => Ok(ServiceStatus::Degraded),
            false => Ok(ServiceStatus::Up),
        }
    }
}

/// A synchronous readiness or liveness check.
pub type StatusCheck = Arc<dyn Fn() -> Result<(), String> + Send + Sync>;

/// Maps a failed readiness/liveness check to an HTTP status code.
///
/// Failures naming dependencies, readiness, timeouts or connections are
/// retryable (503); anything else is a server fault (500).
pub fn check_failure_status(message: &str) -> u16 {
    const RETRYABLE: &[&str] = &["dependencies", "ready", "timeout", "connection"];
    let lower = message.to_lowercase();
    match RETRYABLE.iter().any(|k| lower.contains(k)) {
        true => 503,
        false => 500,
    }
}

/// Health, readiness and liveness for the server.
pub struct HealthService {
    aggregator: HealthAggregator,
    readiness: StatusCheck,
    liveness: StatusCheck,
    started_at: Instant,
}

impl HealthService {
    pub fn new(aggregator: HealthAggregator) -> Self {
        Self {
            aggregator,
            readiness: Arc::new(|| Ok(())),
            liveness: Arc::new(|| Ok(())),
            started_at: Instant::now(),
        }
    }

    pub fn with_readiness(mut self, check: StatusCheck) -> Self {
        self.readiness = check;
        self
    }

    pub fn with_liveness(mut self, check: StatusCheck) -> Self {
        self.liveness = check;
        self
    }

    pub async fn report(&self) -> HealthReport {
        self.aggregator.run().await
    }

    pub fn ready(&self) -> Result<(), String> {
        (self.readiness)()
    }

    pub fn alive(&self) -> Result<(), String> {
        (self.liveness)()
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct FixedProbe(Result<ServiceStatus, ApiError>);

    #[async_trait]
    impl HealthProbe for FixedProbe {
        async fn check(&self) -> Result<ServiceStatus, ApiError> {
            self.0.clone()
        }
    }

    struct HangingProbe;

    #[async_trait]
    impl HealthProbe for HangingProbe {
        async fn check(&self) -> Result<ServiceStatus, ApiError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(ServiceStatus::Up)
        }
    }

    fn fixed(status: ServiceStatus) -> Arc<dyn HealthProbe> {
        Arc::new(FixedProbe(Ok(status)))
    }

    #[rstest]
    #[case(&[], OverallStatus::Healthy)]
    #[case(&[ServiceStatus::Up, ServiceStatus::Up], OverallStatus::Healthy)]
    #[case(&[ServiceStatus::Up, ServiceStatus::Degraded], OverallStatus::Degraded)]
    #[case(&[ServiceStatus::Degraded, ServiceStatus::Down], OverallStatus::Unhealthy)]
    #[case(&[ServiceStatus::Down, ServiceStatus::Degraded, ServiceStatus::Up], OverallStatus::Unhealthy)]
    #[case(&[ServiceStatus::Down], OverallStatus::Unhealthy)]
    fn reduces_statuses(#[case] statuses: &[ServiceStatus], #[case] expected: OverallStatus) {
        assert_eq!(overall_status(statuses), expected);
    }

    #[tokio::test]
    async fn no_probes_is_healthy() {
        let report = HealthAggregator::new().run().await;
        assert_eq!(report.status, OverallStatus::Healthy);
        assert!(report.services.is_empty());
    }

    #[tokio::test]
    async fn failing_probe_is_down_with_timeout_as_response_time() {
        let aggregator = HealthAggregator::new()
            .with_probe("retell_api", fixed(ServiceStatus::Up))
            .with_probe("cache", Arc::new(FixedProbe(Err(ApiError::Gateway("refused".into())))));

        let report = aggregator.run().await;
        assert_eq!(report.status, OverallStatus::Unhealthy);
        assert_eq!(report.services["retell_api"].status, ServiceStatus::Up);
        assert_eq!(
            report.services["cache"],
            ProbeOutcome { status: ServiceStatus::Down, response_time: PROBE_TIMEOUT }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_probe_times_out_without_blocking_siblings() {
        let aggregator = HealthAggregator::new()
            .with_probe("slow", Arc::new(HangingProbe))
            .with_probe("fast", fixed(ServiceStatus::Degraded));

        let report = aggregator.run().await;
        assert_eq!(report.status, OverallStatus::Unhealthy);
        assert_eq!(report.services["slow"].status, ServiceStatus::Down);
        assert_eq!(report.services["slow"].response_time, PROBE_TIMEOUT);
        assert_eq!(report.services["fast"].status, ServiceStatus::Degraded);
    }

    #[rstest]
    #[case("Service dependencies not available", 503)]
    #[case("Service not ready", 503)]
    #[case("Database timeout", 503)]
    #[case("Connection reset", 503)]
    #[case("Out of memory", 500)]
    #[case("", 500)]
    fn check_failures_map_to_status(#[case] message: &str, #[case] expected: u16) {
        assert_eq!(check_failure_status(message), expected);
    }

    #[test]
    fn checks_default_to_passing() {
        let service = HealthService::new(HealthAggregator::new());
        assert_eq!(service.ready(), Ok(()));
        assert_eq!(service.alive(), Ok(()));
    }

    #[test]
    fn injected_check_failure_is_returned() {
        let service = HealthService::new(HealthAggregator::new())
            .with_readiness(Arc::new(|| Err("dependencies not ready".to_string())));
        assert_eq!(service.ready(), Err("dependencies not ready".to_string()));
    }
}
