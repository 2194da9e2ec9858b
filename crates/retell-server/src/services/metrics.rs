//! Request metrics: an injectable sink and the middleware that feeds it.
//!
//! [`InMemoryMetrics`] keeps Prometheus counters and a latency histogram per
//! endpoint in its own [`Registry`]. Snapshots are derived from the gathered
//! families, so percentiles are histogram bucket upper bounds.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use prometheus::proto::{Metric, MetricFamily};
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

use crate::dto::{EndpointMetrics, MetricsSnapshot};

const ENDPOINT_LABEL: &str = "endpoint";
const REQUESTS_TOTAL: &str = "retell_gateway_requests_total";
const ERRORS_TOTAL: &str = "retell_gateway_errors_total";
const REQUEST_DURATION: &str = "retell_gateway_request_duration_seconds";

/// Latency bucket upper bounds in milliseconds (1ms .. 30s).
const LATENCY_BUCKETS_MS: &[f64] = &[
    1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0, 30000.0,
];

/// Destination for per-request measurements.
pub trait MetricsSink: Send + Sync {
    /// Records one finished request.
    fn record(&self, endpoint: &str, status: u16, latency: Duration);

    /// Returns the current aggregate view.
    fn snapshot(&self) -> MetricsSnapshot;

    /// Clears all counters.
    fn reset(&self);
}

/// Prometheus-backed sink with a private registry.
pub struct InMemoryMetrics {
    registry: Registry,
    requests: IntCounterVec,
    errors: IntCounterVec,
    duration: HistogramVec,
}

impl InMemoryMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new(REQUESTS_TOTAL, "Total number of requests"),
            &[ENDPOINT_LABEL],
        )?;
        registry.register(Box::new(requests.clone()))?;

        let errors = IntCounterVec::new(
            Opts::new(ERRORS_TOTAL, "Requests answered with status >= 400"),
            &[ENDPOINT_LABEL],
        )?;
        registry.register(Box::new(errors.clone()))?;

        let buckets = LATENCY_BUCKETS_MS.iter().map(|ms| ms / 1000.0).collect();
        let duration = HistogramVec::new(
            HistogramOpts::new(REQUEST_DURATION, "Request duration in seconds").buckets(buckets),
            &[ENDPOINT_LABEL],
        )?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self { registry, requests, errors, duration })
    }

    /// Per-endpoint series read back from the registry.
    fn series(&self) -> BTreeMap<String, Series> {
        let mut series: BTreeMap<String, Series> = BTreeMap::new();

        for family in self.registry.gather() {
            for metric in family.get_metric() {
                let Some(endpoint) = endpoint_of(metric) else {
                    continue;
                };
                let entry = series.entry(endpoint.to_string()).or_default();
                absorb(entry, &family, metric);
            }
        }

        series
    }
}

/// Counts and histogram state for one endpoint, or for all of them.
#[derive(Default)]
struct Series {
    requests: u64,
    errors: u64,
    samples: u64,
    sum_ms: f64,
    /// Cumulative count per entry of [`LATENCY_BUCKETS_MS`].
    buckets: Vec<u64>,
}

impl Series {
    fn merge(&mut self, other: &Series) {
        self.requests += other.requests;
        self.errors += other.errors;
        self.samples += other.samples;
        self.sum_ms += other.sum_ms;
        self.add_buckets(&other.buckets);
    }

    fn add_buckets(&mut self, counts: &[u64]) {
        if self.buckets.len() < counts.len() {
            self.buckets.resize(counts.len(), 0);
        }
        for (total, count) in self.buckets.iter_mut().zip(counts) {
            *total += count;
        }
    }

    fn error_rate(&self) -> f64 {
        match self.requests {
            0 => 0.0,
            n => self.errors as f64 / n as f64,
        }
    }

    fn average_ms(&self) -> f64 {
        match self.samples {
            0 => 0.0,
            n => self.sum_ms / n as f64,
        }
    }

    /// Nearest-rank percentile, resolved to the bucket holding that rank.
    fn percentile_ms(&self, p: f64) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        let rank = ((p / 100.0) * self.samples as f64).ceil().max(1.0) as u64;
        LATENCY_BUCKETS_MS
            .iter()
            .zip(&self.buckets)
            .find(|(_, cumulative)| **cumulative >= rank)
            .map(|(ms, _)| *ms)
            .or_else(|| LATENCY_BUCKETS_MS.last().copied())
            .unwrap_or(0.0)
    }
}

fn endpoint_of(metric: &Metric) -> Option<&str> {
    metric
        .get_label()
        .iter()
        .find(|pair| pair.get_name() == ENDPOINT_LABEL)
        .map(|pair| pair.get_value())
}

fn absorb(series: &mut Series, family: &MetricFamily, metric: &Metric) {
    match family.get_name() {
        REQUESTS_TOTAL => series.requests = metric.get_counter().get_value() as u64,
        ERRORS_TOTAL => series.errors = metric.get_counter().get_value() as u64,
        REQUEST_DURATION => {
            let histogram = metric.get_histogram();
            series.samples = histogram.get_sample_count();
            series.sum_ms = histogram.get_sample_sum() * 1000.0;
            let counts: Vec<u64> = histogram.get_bucket().iter().map(|b| b.get_cumulative_count()).collect();
            series.add_buckets(&counts);
        }
        _ => {}
    }
}

impl MetricsSink for InMemoryMetrics {
    fn record(&self, endpoint: &str, status: u16, latency: Duration) {
        self.requests.with_label_values(&[endpoint]).inc();
        if status >= 400 {
            self.errors.with_label_values(&[endpoint]).inc();
        }
        self.duration.with_label_values(&[endpoint]).observe(latency.as_secs_f64());
    }

    fn snapshot(&self) -> MetricsSnapshot {
        let series = self.series();

        let mut overall = Series::default();
        let endpoints: BTreeMap<String, EndpointMetrics> = series
            .into_iter()
            .map(|(name, s)| {
                overall.merge(&s);
                let metrics = EndpointMetrics {
                    requests: s.requests,
                    errors: s.errors,
                    error_rate: s.error_rate(),
                    average_response_time_ms: s.average_ms(),
                    p95_response_time_ms: s.percentile_ms(95.0),
                    p99_response_time_ms: s.percentile_ms(99.0),
                };
                (name, metrics)
            })
            .collect();

        MetricsSnapshot {
            total_requests: overall.requests,
            total_errors: overall.errors,
            error_rate: overall.error_rate(),
            average_response_time_ms: overall.average_ms(),
            p95_response_time_ms: overall.percentile_ms(95.0),
            p99_response_time_ms: overall.percentile_ms(99.0),
            endpoints,
        }
    }

    fn reset(&self) {
        self.requests.reset();
        self.errors.reset();
        self.duration.reset();
    }
}

/// Records method, matched route, status and latency of every request.
///
/// Unmatched paths share one bucket so arbitrary URLs cannot grow the label set.
pub async fn track_metrics(
    State(metrics): State<Arc<dyn MetricsSink>>,
    request: Request,
    next: Next,
) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "<unmatched>".to_string());
    let endpoint = format!("{} {}", request.method(), route);

    let start = Instant::now();
    let response = next.run(request).await;
    metrics.record(&endpoint, response.status().as_u16(), start.elapsed());

    response
}
