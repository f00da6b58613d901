//! # Analysis Engine
//! Sequences the stages for one raw input and assembles the report.
//!
//! Decode/classify/hints run synchronously first. The on-chain lookup (keyed
//! by the envelope's `to` hint) and the explanation (keyed by the full
//! analysis) are independent and run concurrently. A lookup failure only
//! removes the on-chain facet; an explanation failure fails the whole call,
//! no partial report is returned.

use std::sync::Arc;

use metrics::counter;
use tracing::info;

use crate::analyze::{analyze_raw_input, rules::UNLIMITED_APPROVAL};
use crate::config::AppConfig;
use crate::error::ExplainError;
use crate::explain::{build_rule_based_explanation, Explainer, OpenAiExplainer};
use crate::onchain::OnchainRiskOracle;
use crate::report::AnalysisReport;

#[derive(Clone)]
pub struct Analyzer {
    oracle: OnchainRiskOracle,
    explainer: Arc<dyn Explainer>,
}

impl Analyzer {
    /// Production wiring: JSON-RPC oracle (if configured) + model explainer.
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        info!(
            model = %cfg.ai.model,
            has_key = cfg.ai.has_credential(),
            onchain = cfg.onchain.is_configured(),
            "analyzer configured"
        );
        let explainer = OpenAiExplainer::new(cfg.ai.clone())?;
        Ok(Self::new(
            OnchainRiskOracle::from_config(&cfg.onchain),
            Arc::new(explainer),
        ))
    }

    pub fn new(oracle: OnchainRiskOracle, explainer: Arc<dyn Explainer>) -> Self {
        Self { oracle, explainer }
    }

    pub fn explainer_name(&self) -> &'static str {
        self.explainer.provider_name()
    }

    /// Full analysis with the configured explainer. Explanation errors propagate.
    pub async fn analyze(&self, raw: &str) -> Result<AnalysisReport, ExplainError> {
        let analysis = analyze_raw_input(raw);
        record_analysis_metrics(&analysis);

        let (onchain_risk, explanation) = tokio::join!(
            self.oracle.lookup(analysis.target_contract.as_deref()),
            self.explainer.explain(raw, &analysis),
        );
        let explanation = explanation?;

        info!(
            source = explanation.source.as_str(),
            onchain = onchain_risk.is_some(),
            "analysis complete"
        );
        Ok(AnalysisReport::assemble(raw, analysis, onchain_risk, explanation))
    }

    /// Same pipeline, explained by the deterministic composer. Never fails.
    pub async fn analyze_offline(&self, raw: &str) -> AnalysisReport {
        let analysis = analyze_raw_input(raw);
        record_analysis_metrics(&analysis);

        let onchain_risk = self
            .oracle
            .lookup(analysis.target_contract.as_deref())
            .await;
        let explanation = build_rule_based_explanation(raw, &analysis);
        AnalysisReport::assemble(raw, analysis, onchain_risk, explanation)
    }
}

fn record_analysis_metrics(analysis: &crate::analyze::TransactionAnalysis) {
    counter!("tx_analyses_total").increment(1);
    counter!("tx_decoded_actions_total").increment(analysis.actions.len() as u64);
    let unlimited = analysis
        .risks
        .iter()
        .filter(|r| r.kind == UNLIMITED_APPROVAL)
        .count();
    if unlimited > 0 {
        counter!("tx_unlimited_approvals_total").increment(unlimited as u64);
    }
}
