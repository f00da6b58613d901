// src/lib.rs
// Public library surface for the service binary, the offline CLI and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod explain;
pub mod findings;
pub mod onchain;
pub mod report;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{analyze_raw_input, TransactionAnalysis};
pub use crate::api::router;
pub use crate::config::AppConfig;
pub use crate::engine::Analyzer;
pub use crate::error::ExplainError;
pub use crate::explain::{Explanation, ExplanationSource};
pub use crate::report::AnalysisReport;

use axum::Router;

/// Build the full router (API + `/metrics`) from process configuration.
pub fn app() -> anyhow::Result<Router> {
    let cfg = AppConfig::load()?;
    app_with_config(&cfg)
}

/// Same as [`app`] with an explicit configuration value.
pub fn app_with_config(cfg: &AppConfig) -> anyhow::Result<Router> {
    let analyzer = Analyzer::from_config(cfg)?;
    let metrics = telemetry::Metrics::global()?;
    Ok(api::create_router(api::AppState::new(analyzer)).merge(metrics.router()))
}
