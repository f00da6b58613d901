//! Risk classifier: deterministic `(action pattern) -> finding` rules.
//!
//! Each rule looks at one decoded action and may emit one finding. Rules are
//! evaluated in table order for every action, actions in decode order, so the
//! findings follow the order the actions were produced.
//!
//! Adding a rule means adding a function to [`RULES`]; nothing else changes.

use crate::findings::{DecodedAction, RiskFinding, RiskLevel};

pub const UNLIMITED_APPROVAL: &str = "unlimitedApproval";

const UNLIMITED_APPROVAL_TEXT: &str = "This approval appears to be unlimited (MaxUint256). This is often risky and should only be granted to highly trusted contracts.";

/// A single classification rule.
pub type RiskRule = fn(&DecodedAction) -> Option<RiskFinding>;

/// Active rule table.
pub const RULES: &[RiskRule] = &[unlimited_approval];

/// Classify all actions with the default rule table.
pub fn classify(actions: &[DecodedAction]) -> Vec<RiskFinding> {
    classify_with(actions, RULES)
}

/// Classify with an explicit rule table.
pub fn classify_with(actions: &[DecodedAction], rules: &[RiskRule]) -> Vec<RiskFinding> {
    let mut findings = Vec::new();
    for action in actions {
        for rule in rules {
            if let Some(f) = rule(action) {
                findings.push(f);
            }
        }
    }
    findings
}

fn unlimited_approval(action: &DecodedAction) -> Option<RiskFinding> {
    if !action.call.is_unlimited_approval() {
        return None;
    }
    Some(RiskFinding {
        kind: UNLIMITED_APPROVAL.to_string(),
        level: RiskLevel::High,
        description: UNLIMITED_APPROVAL_TEXT.to_string(),
    })
}
