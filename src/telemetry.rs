use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

static GLOBAL: OnceCell<Metrics> = OnceCell::new();

impl Metrics {
    /// Install the Prometheus recorder once per process and describe our series.
    /// Later calls return the same handle.
    pub fn global() -> anyhow::Result<&'static Metrics> {
        GLOBAL.get_or_try_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .context("prometheus: install recorder")?;
            describe();
            Ok(Metrics { handle })
        })
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

fn describe() {
    describe_counter!("tx_analyses_total", "Raw inputs run through the analysis pipeline.");
    describe_counter!(
        "tx_decoded_actions_total",
        "Token-interface actions decoded from call data."
    );
    describe_counter!(
        "tx_unlimited_approvals_total",
        "Approvals of the max uint256 sentinel."
    );
    describe_counter!(
        "onchain_risk_signals_total",
        "Registry lookups that produced a signal, by level."
    );
    describe_counter!(
        "explanation_failures_total",
        "Model explanation failures, by kind."
    );
    describe_histogram!(
        "explanation_duration_ms",
        "Model explanation round-trip in milliseconds."
    );
}
