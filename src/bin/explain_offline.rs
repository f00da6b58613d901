//! Offline explainer: runs the analysis pipeline with the rule-based composer
//! and prints the report as JSON. No model credential needed.
//!
//! Input comes from the first argument, or stdin when no argument is given.
//! If SEPOLIA_RPC_URL and RISK_REGISTRY_ADDRESS are set, the on-chain lookup
//! still runs.

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tx_risk_analyzer::explain::RuleBasedExplainer;
use tx_risk_analyzer::onchain::OnchainRiskOracle;
use tx_risk_analyzer::{AppConfig, Analyzer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let raw = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading input from stdin")?;
            buf
        }
    };

    let cfg = AppConfig::load()?;
    let analyzer = Analyzer::new(
        OnchainRiskOracle::from_config(&cfg.onchain),
        Arc::new(RuleBasedExplainer),
    );
    let report = analyzer.analyze_offline(&raw).await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
