//! findings.rs — the per-request records produced by the analysis stages.
//!
//! Everything here is built fresh for one input and never mutated after the
//! stage that created it hands it on.

use serde::{Deserialize, Serialize};

use crate::analyze::decode::TokenCall;

/// One recognised function call, rendered for humans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedAction {
    /// `"transfer"` | `"approve"` | `"transferFrom"`.
    pub kind: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Typed arguments the description was rendered from. Rules match on this.
    #[serde(skip)]
    pub call: TokenCall,
}

impl DecodedAction {
    pub fn from_call(call: TokenCall) -> Self {
        Self {
            kind: call.kind().to_string(),
            description: call.describe(),
            severity: Some("info".to_string()),
            call,
        }
    }
}

/// Graded risk severity. Serialised lowercase (`"low"`, `"medium"`, `"high"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub kind: String,
    pub level: RiskLevel,
    pub description: String,
}

/// Privacy annotation (e.g. what becomes public once the transaction lands).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyNote {
    pub kind: String,
    pub description: String,
}

/// Guidance aimed at dApp / wallet developers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperHint {
    pub kind: String,
    pub description: String,
}

impl PrivacyNote {
    pub fn new(kind: &str, description: &str) -> Self {
        Self {
            kind: kind.to_string(),
            description: description.to_string(),
        }
    }
}

impl DeveloperHint {
    pub fn new(kind: &str, description: &str) -> Self {
        Self {
            kind: kind.to_string(),
            description: description.to_string(),
        }
    }
}
