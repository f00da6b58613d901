// src/analyze/decode.rs
//! Interface decoder for the fixed token-interface family.
//!
//! Only `transfer`, `approve` and `transferFrom` are recognised. Anything else
//! (unknown selector, short or malformed bytes, missing `0x`) decodes to
//! nothing; no error ever leaves this module.

use alloy_primitives::utils::format_units;
use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolInterface};

use crate::findings::DecodedAction;

/// Display precision of the token family. Only used for formatting.
pub const TOKEN_DECIMALS: u8 = 18;

sol! {
    interface IERC20 {
        function transfer(address to, uint256 value) external returns (bool);
        function approve(address spender, uint256 value) external returns (bool);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
    }
}

/// One case per recognised function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCall {
    Transfer { to: Address, value: U256 },
    Approve { spender: Address, value: U256 },
    TransferFrom { from: Address, to: Address, value: U256 },
}

impl TokenCall {
    pub fn kind(&self) -> &'static str {
        match self {
            TokenCall::Transfer { .. } => "transfer",
            TokenCall::Approve { .. } => "approve",
            TokenCall::TransferFrom { .. } => "transferFrom",
        }
    }

    /// `approve` with the max uint256 sentinel.
    pub fn is_unlimited_approval(&self) -> bool {
        matches!(self, TokenCall::Approve { value, .. } if *value == U256::MAX)
    }

    pub fn describe(&self) -> String {
        match self {
            TokenCall::Transfer { to, value } => {
                format!("Transfer of {} tokens to {to}.", format_amount(*value))
            }
            TokenCall::Approve { spender, .. } if self.is_unlimited_approval() => {
                format!("Approve {spender} to spend an unlimited amount of tokens.")
            }
            TokenCall::Approve { spender, value } => format!(
                "Approve {spender} to spend up to {} tokens.",
                format_amount(*value)
            ),
            TokenCall::TransferFrom { from, to, value } => format!(
                "Transfer of {} tokens from {from} to {to}.",
                format_amount(*value)
            ),
        }
    }
}

impl From<IERC20::IERC20Calls> for TokenCall {
    fn from(call: IERC20::IERC20Calls) -> Self {
        match call {
            IERC20::IERC20Calls::transfer(c) => TokenCall::Transfer {
                to: c.to,
                value: c.value,
            },
            IERC20::IERC20Calls::approve(c) => TokenCall::Approve {
                spender: c.spender,
                value: c.value,
            },
            IERC20::IERC20Calls::transferFrom(c) => TokenCall::TransferFrom {
                from: c.from,
                to: c.to,
                value: c.value,
            },
        }
    }
}

/// Decode `0x`-prefixed call data into a typed call, if it matches.
pub fn decode_call_data(call_data: &str) -> Option<TokenCall> {
    let hex_body = call_data.strip_prefix("0x")?;
    let bytes = hex::decode(hex_body).ok()?;
    match IERC20::IERC20Calls::abi_decode(&bytes) {
        Ok(call) => Some(call.into()),
        Err(e) => {
            tracing::debug!(error = %e, len = bytes.len(), "call data did not match token interface");
            None
        }
    }
}

/// Zero or one action: the three signatures are mutually exclusive.
pub fn decode_actions(call_data: Option<&str>) -> Vec<DecodedAction> {
    call_data
        .and_then(decode_call_data)
        .map(DecodedAction::from_call)
        .into_iter()
        .collect()
}

/// Exact decimal rendering of `value / 10^18`, trailing fractional zeros
/// stripped. Falls back to the raw integer if formatting fails.
pub fn format_amount(value: U256) -> String {
    match format_units(value, TOKEN_DECIMALS) {
        Ok(s) => trim_fraction(&s),
        Err(_) => value.to_string(),
    }
}

fn trim_fraction(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolCall;

    fn alice() -> Address {
        Address::repeat_byte(0x11)
    }

    fn bob() -> Address {
        Address::repeat_byte(0x22)
    }

    fn hexify(bytes: Vec<u8>) -> String {
        format!("0x{}", hex::encode(bytes))
    }

    #[test]
    fn handwritten_transfer_vector_decodes() {
        let data = format!(
            "0xa9059cbb{:0>64}{:0>64}",
            "1111111111111111111111111111111111111111", "de0b6b3a7640000"
        );
        let actions = decode_actions(Some(&data));
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind, "transfer");
        assert_eq!(
            actions[0].description,
            "Transfer of 1 tokens to 0x1111111111111111111111111111111111111111."
        );
        assert_eq!(actions[0].severity.as_deref(), Some("info"));
    }

    #[test]
    fn fractional_amount_is_exact() {
        let value = U256::from(1_500_000_000_000_000_000u128);
        let data = hexify(IERC20::transferCall { to: bob(), value }.abi_encode());
        let call = decode_call_data(&data).expect("transfer");
        assert_eq!(call, TokenCall::Transfer { to: bob(), value });
        assert!(call.describe().contains("1.5 tokens"));
    }

    #[test]
    fn amount_formatting_has_no_float_artifacts() {
        assert_eq!(format_amount(U256::ZERO), "0");
        assert_eq!(format_amount(U256::from(1u64)), "0.000000000000000001");
        assert_eq!(
            format_amount(U256::from(10_000_000_000_000_000_000u128)),
            "10"
        );
        assert_eq!(
            format_amount(U256::from(123_456_789_000_000_000_000u128)),
            "123.456789"
        );
    }

    #[test]
    fn max_approve_reads_as_unlimited() {
        let data = hexify(
            IERC20::approveCall {
                spender: alice(),
                value: U256::MAX,
            }
            .abi_encode(),
        );
        let actions = decode_actions(Some(&data));
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind, "approve");
        assert!(actions[0].call.is_unlimited_approval());
        assert!(actions[0].description.contains("unlimited amount"));
    }

    #[test]
    fn bounded_approve_is_not_unlimited() {
        let call = TokenCall::Approve {
            spender: alice(),
            value: U256::MAX - U256::from(1u64),
        };
        assert!(!call.is_unlimited_approval());
        assert!(call.describe().contains("spend up to"));
    }

    #[test]
    fn transfer_from_mentions_both_parties() {
        let value = U256::from(2_000_000_000_000_000_000u128);
        let data = hexify(
            IERC20::transferFromCall {
                from: alice(),
                to: bob(),
                value,
            }
            .abi_encode(),
        );
        let actions = decode_actions(Some(&data));
        assert_eq!(actions[0].kind, "transferFrom");
        assert_eq!(
            actions[0].description,
            format!("Transfer of 2 tokens from {} to {}.", alice(), bob())
        );
    }

    #[test]
    fn garbage_decodes_to_nothing() {
        for data in [
            "0x",
            "0xzz",
            "0xa9059cbb",
            "0xdeadbeef0000",
            "0xa9059cb",
            "a9059cbb",
        ] {
            assert!(decode_actions(Some(data)).is_empty(), "input {data:?}");
        }
        assert!(decode_actions(None).is_empty());
    }
}
