// src/explain/mod.rs
//! Natural-language explanation of an analysis.
//!
//! Two strategies share one input `(raw, &TransactionAnalysis)`:
//! - [`ai_adapter::OpenAiExplainer`] (primary): strict, every failure surfaces;
//! - [`rule_based::RuleBasedExplainer`] (secondary): deterministic, never fails.
//!
//! They are never chained automatically. A caller that wants resilience calls
//! the rule-based strategy explicitly.

pub mod ai_adapter;
pub mod rule_based;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analyze::TransactionAnalysis;
use crate::error::ExplainError;

pub use ai_adapter::OpenAiExplainer;
pub use rule_based::{build_rule_based_explanation, RuleBasedExplainer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplanationSource {
    #[serde(rename = "model")]
    Model,
    #[serde(rename = "rule-based")]
    RuleBased,
}

impl ExplanationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplanationSource::Model => "model",
            ExplanationSource::RuleBased => "rule-based",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub user_headline: String,
    pub user_body: String,
    pub user_privacy_note: String,
    pub dev_notes: String,
    pub source: ExplanationSource,
}

/// Object-safe seam so the aggregator can hold either strategy.
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(
        &self,
        raw: &str,
        analysis: &TransactionAnalysis,
    ) -> Result<Explanation, ExplainError>;

    /// Provider name for diagnostics.
    fn provider_name(&self) -> &'static str;
}

/// Only the user-facing body; kept for consumers that want a single string.
pub async fn summary_for(
    explainer: &dyn Explainer,
    raw: &str,
    analysis: &TransactionAnalysis,
) -> Result<String, ExplainError> {
    Ok(explainer.explain(raw, analysis).await?.user_body)
}
