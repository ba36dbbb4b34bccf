// src/metrics.rs
use axum::{routing::get, Router};
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::verdict::PipelineOutcome;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder.
    pub fn init() -> Self {
        // Use default buckets to avoid API differences across crate versions.
        let builder = PrometheusBuilder::new();

        let handle = builder
            .install_recorder()
            .expect("prometheus: install recorder");

        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Record one scored report.
pub fn record_outcome(outcome: &PipelineOutcome, duplicate: bool) {
    counter!("reports_scored_total").increment(1);
    counter!("reports_verdict_total", "verdict" => outcome.verdict.as_str()).increment(1);
    if outcome.is_suspicious {
        counter!("reports_suspicious_total").increment(1);
    }
    if duplicate {
        counter!("reports_duplicate_total").increment(1);
    }
}
