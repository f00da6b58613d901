// src/analyze/mod.rs
//! Synchronous analysis pipeline: normalize → decode → (risk rules, hints).
//!
//! Pure and CPU-only. Unparsable input never errors; it yields zero actions
//! plus the baseline privacy note and developer hint.

pub mod decode;
pub mod hints;
pub mod normalize;
pub mod rules;

use serde::Serialize;

use crate::findings::{DecodedAction, DeveloperHint, PrivacyNote, RiskFinding};

pub use crate::analyze::decode::{decode_actions, format_amount, TokenCall};
pub use crate::analyze::normalize::{normalize_payload, NormalizedPayload};
pub use crate::analyze::rules::{classify, RiskRule, RULES};

/// Decoded view of one raw input. Consumed by both explanation strategies.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAnalysis {
    pub actions: Vec<DecodedAction>,
    pub risks: Vec<RiskFinding>,
    pub privacy: Vec<PrivacyNote>,
    pub developer_hints: Vec<DeveloperHint>,
    /// `to` hint from a JSON envelope; keys the on-chain lookup.
    pub target_contract: Option<String>,
    #[serde(skip)]
    pub call_data: Option<String>,
}

/// Run the full synchronous pipeline over a raw user paste.
pub fn analyze_raw_input(raw: &str) -> TransactionAnalysis {
    let payload = normalize_payload(raw);
    let actions = decode_actions(payload.call_data.as_deref());
    let risks = classify(&actions);
    let privacy = hints::privacy_notes();
    let developer_hints = hints::developer_hints(&actions, &risks, payload.has_payload());

    tracing::debug!(
        actions = actions.len(),
        risks = risks.len(),
        hints = developer_hints.len(),
        "raw input analyzed"
    );

    TransactionAnalysis {
        actions,
        risks,
        privacy,
        developer_hints,
        target_contract: payload.target_hint,
        call_data: payload.call_data,
    }
}
