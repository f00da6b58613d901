// src/analyze/hints.rs
//! Privacy notes and developer hints. Independent of risk severity; the
//! baseline visibility note and disclosure hint are always present.

use crate::analyze::rules::UNLIMITED_APPROVAL;
use crate::findings::{DecodedAction, DeveloperHint, PrivacyNote, RiskFinding};

pub const ONCHAIN_VISIBILITY: &str = "onchainVisibility";
pub const HINT_UNLIMITED_APPROVAL: &str = "unlimitedApprovalPattern";
pub const HINT_APPROVAL_UX: &str = "approvalUX";
pub const HINT_ABI_COVERAGE: &str = "abiCoverage";
pub const HINT_PRIVACY_DISCLOSURE: &str = "privacyDisclosure";

pub fn privacy_notes() -> Vec<PrivacyNote> {
    vec![PrivacyNote::new(
        ONCHAIN_VISIBILITY,
        "Transaction details such as addresses, token amounts, and called functions are publicly visible on-chain.",
    )]
}

/// Order is fixed: unlimited-approval, approval UX, ABI coverage, disclosure.
pub fn developer_hints(
    actions: &[DecodedAction],
    risks: &[RiskFinding],
    had_payload: bool,
) -> Vec<DeveloperHint> {
    let mut hints = Vec::new();

    if risks.iter().any(|r| r.kind == UNLIMITED_APPROVAL) {
        hints.push(DeveloperHint::new(
            HINT_UNLIMITED_APPROVAL,
            "Avoid relying on unlimited ERC-20 approvals. Prefer allowances scoped to realistic amounts and reset approvals to 0 before changing spenders.",
        ));
    }

    if actions.iter().any(|a| a.kind == "approve") {
        hints.push(DeveloperHint::new(
            HINT_APPROVAL_UX,
            "In your dApp and wallet UI, clearly explain to users what an approval does, highlight who the spender is, and surface the potential impact of granting it.",
        ));
    }

    if actions.is_empty() && had_payload {
        hints.push(DeveloperHint::new(
            HINT_ABI_COVERAGE,
            "This calldata could not be decoded with the standard ERC-20 ABI. Provide the contract ABI or implement custom decoding so users see a clear description.",
        ));
    }

    hints.push(DeveloperHint::new(
        HINT_PRIVACY_DISCLOSURE,
        "Consider showing users which parts of this transaction will be publicly visible on-chain (addresses, token amounts, called functions) and link to an explorer for transparency.",
    ));

    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::decode::TokenCall;
    use crate::analyze::rules::classify;
    use alloy_primitives::{Address, U256};

    fn kinds(h: &[DeveloperHint]) -> Vec<&str> {
        h.iter().map(|x| x.kind.as_str()).collect()
    }

    #[test]
    fn baseline_only_when_nothing_happened() {
        assert_eq!(kinds(&developer_hints(&[], &[], false)), vec![HINT_PRIVACY_DISCLOSURE]);
        let notes = privacy_notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, ONCHAIN_VISIBILITY);
    }

    #[test]
    fn undecodable_payload_asks_for_abi() {
        assert_eq!(
            kinds(&developer_hints(&[], &[], true)),
            vec![HINT_ABI_COVERAGE, HINT_PRIVACY_DISCLOSURE]
        );
    }

    #[test]
    fn unlimited_approve_fires_everything_in_order() {
        let actions = vec![DecodedAction::from_call(TokenCall::Approve {
            spender: Address::repeat_byte(0x55),
            value: U256::MAX,
        })];
        let risks = classify(&actions);
        assert_eq!(
            kinds(&developer_hints(&actions, &risks, true)),
            vec![HINT_UNLIMITED_APPROVAL, HINT_APPROVAL_UX, HINT_PRIVACY_DISCLOSURE]
        );
    }
}
