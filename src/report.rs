//! report.rs — the aggregate returned for one analyzed input.

use serde::Serialize;

use crate::analyze::TransactionAnalysis;
use crate::explain::Explanation;
use crate::findings::{DecodedAction, DeveloperHint, PrivacyNote, RiskFinding};
use crate::onchain::OnchainRiskSignal;

/// Built fresh per request, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Raw input echo.
    pub input: String,
    pub actions: Vec<DecodedAction>,
    pub risks: Vec<RiskFinding>,
    pub privacy: Vec<PrivacyNote>,
    pub developer_hints: Vec<DeveloperHint>,
    /// `null` when no signal is available.
    pub onchain_risk: Option<OnchainRiskSignal>,
    pub explanation: Explanation,
}

impl AnalysisReport {
    pub fn assemble(
        raw: &str,
        analysis: TransactionAnalysis,
        onchain_risk: Option<OnchainRiskSignal>,
        explanation: Explanation,
    ) -> Self {
        Self {
            input: raw.to_string(),
            actions: analysis.actions,
            risks: analysis.risks,
            privacy: analysis.privacy,
            developer_hints: analysis.developer_hints,
            onchain_risk,
            explanation,
        }
    }
}
