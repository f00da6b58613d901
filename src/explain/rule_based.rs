// src/explain/rule_based.rs
//! Deterministic explanation composer. Used for offline summaries and as the
//! explicit resilience path; it never fails and never returns empty fields.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Explainer, Explanation, ExplanationSource};
use crate::analyze::TransactionAnalysis;
use crate::error::ExplainError;

pub const NO_INPUT: &str = "No input was provided. To analyze a transaction, please paste calldata or a JSON object containing a `data` field.";
pub const NOTHING_DECODED: &str = "No specific ERC-20 function (transfer, approve, transferFrom) could be decoded from this input. It may be a different contract interface or malformed calldata.";
pub const FALLBACK_HEADLINE: &str = "Transaction summary";
pub const FALLBACK_PRIVACY: &str = "This transaction will be recorded on-chain. Anyone can see the addresses involved, amounts, and function called.";

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").expect("static regex"));

/// Prose summary: actions (or the "nothing decoded" sentence), then risks,
/// then privacy.
pub fn build_rule_based_summary(raw: &str, analysis: &TransactionAnalysis) -> String {
    if raw.trim().is_empty() {
        return NO_INPUT.to_string();
    }

    let mut parts: Vec<String> = Vec::new();

    if analysis.actions.is_empty() {
        parts.push(NOTHING_DECODED.to_string());
    } else {
        let actions = analysis
            .actions
            .iter()
            .map(|a| a.description.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        parts.push(format!("Detected ERC-20-related activity: {actions}"));
    }

    if !analysis.risks.is_empty() {
        let risks = analysis
            .risks
            .iter()
            .map(|r| format!("{} (level: {}) - {}", r.kind, r.level.as_str(), r.description))
            .collect::<Vec<_>>()
            .join(" ");
        parts.push(format!("Risk assessment: {risks}"));
    }

    parts.push(format!("Privacy note: {}", privacy_line(analysis)));
    parts.join(" ")
}

fn privacy_line(analysis: &TransactionAnalysis) -> String {
    analysis
        .privacy
        .iter()
        .map(|p| format!("{}: {}", p.kind, p.description))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Split at the first sentence boundary: headline + body.
fn split_headline(summary: &str) -> (String, String) {
    match SENTENCE_END.find(summary) {
        Some(m) => {
            let head = summary[..m.start() + 1].trim();
            let body = summary[m.end()..].trim();
            let head = if head.is_empty() { FALLBACK_HEADLINE } else { head };
            let body = if body.is_empty() { summary } else { body };
            (head.to_string(), body.to_string())
        }
        None => {
            let head = summary.trim();
            let head = if head.is_empty() { FALLBACK_HEADLINE } else { head };
            (head.to_string(), summary.to_string())
        }
    }
}

pub fn build_rule_based_explanation(raw: &str, analysis: &TransactionAnalysis) -> Explanation {
    let summary = build_rule_based_summary(raw, analysis);
    let (user_headline, user_body) = split_headline(&summary);

    let privacy = privacy_line(analysis);
    let user_privacy_note = if privacy.is_empty() {
        FALLBACK_PRIVACY.to_string()
    } else {
        privacy
    };

    Explanation {
        user_headline,
        user_body,
        user_privacy_note,
        dev_notes: summary,
        source: ExplanationSource::RuleBased,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedExplainer;

#[async_trait]
impl Explainer for RuleBasedExplainer {
    async fn explain(
        &self,
        raw: &str,
        analysis: &TransactionAnalysis,
    ) -> Result<Explanation, ExplainError> {
        Ok(build_rule_based_explanation(raw, analysis))
    }

    fn provider_name(&self) -> &'static str {
        "rule-based"
    }
}
