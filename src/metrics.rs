//! Prometheus metrics & middleware helper.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use once_cell::sync::Lazy;
use prometheus::IntCounter;

/// Global Prometheus handle reused in tests.
pub static METRICS: Lazy<PrometheusMetrics> = Lazy::new(|| {
    PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics") // exposed URL
        .build()
        .expect("metrics builder")
});

/// Completed ranking regenerations.
pub static RANKING_RUNS: Lazy<IntCounter> = Lazy::new(|| {
    let counter = IntCounter::new("ranking_runs_total", "completed ranking regenerations")
        .expect("counter");
    METRICS
        .registry
        .register(Box::new(counter.clone()))
        .expect("register ranking counter");
    counter
});
