// src/analyze/normalize.rs
//! Payload normalizer: pulls call data and a target-address hint out of
//! whatever the user pasted (a JSON transaction object or bare hex).

use serde_json::Value;

/// Result of normalization. Both fields are absent for empty/garbage input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPayload {
    pub call_data: Option<String>,
    pub target_hint: Option<String>,
}

impl NormalizedPayload {
    /// True when there is call data with at least one character past the `0x`
    /// prefix, i.e. something that was worth decoding.
    pub fn has_payload(&self) -> bool {
        match self.call_data.as_deref() {
            Some(data) => !data.strip_prefix("0x").unwrap_or(data).is_empty(),
            None => false,
        }
    }
}

/// First match wins:
/// 1) `{...}` parsed as an object, reading optional string fields `data` and `to`
///    (parse errors fall through silently);
/// 2) if no call data yet and the input starts with `0x`, the whole trimmed input.
pub fn normalize_payload(raw: &str) -> NormalizedPayload {
    let trimmed = raw.trim();
    let mut out = NormalizedPayload::default();

    if trimmed.starts_with('{') {
        if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(trimmed) {
            out.call_data = obj
                .get("data")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            out.target_hint = obj
                .get("to")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
        }
    }

    if out.call_data.is_none() && trimmed.starts_with("0x") {
        out.call_data = Some(trimmed.to_string());
    }

    tracing::debug!(
        has_call_data = out.call_data.is_some(),
        has_target = out.target_hint.is_some(),
        "payload normalized"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hex_is_call_data_without_target() {
        let n = normalize_payload("  0xa9059cbb00 \n");
        assert_eq!(n.call_data.as_deref(), Some("0xa9059cbb00"));
        assert!(n.target_hint.is_none());
    }

    #[test]
    fn json_envelope_yields_data_and_to() {
        let n = normalize_payload(r#"{"to":"0x1111111111111111111111111111111111111111","data":"0x095ea7b3"}"#);
        assert_eq!(n.call_data.as_deref(), Some("0x095ea7b3"));
        assert_eq!(
            n.target_hint.as_deref(),
            Some("0x1111111111111111111111111111111111111111")
        );
    }

    #[test]
    fn non_string_fields_are_ignored() {
        let n = normalize_payload(r#"{"to": 42, "data": ["0x00"]}"#);
        assert_eq!(n, NormalizedPayload::default());
    }

    #[test]
    fn broken_json_is_swallowed() {
        let n = normalize_payload("{not json");
        assert_eq!(n, NormalizedPayload::default());
    }

    #[test]
    fn other_inputs_yield_nothing() {
        for raw in ["", "   ", "hello", "a9059cbb", "[\"0x00\"]", "0X12"] {
            assert_eq!(normalize_payload(raw), NormalizedPayload::default(), "input {raw:?}");
        }
    }

    #[test]
    fn bare_prefix_has_no_payload() {
        let n = normalize_payload("0x");
        assert_eq!(n.call_data.as_deref(), Some("0x"));
        assert!(!n.has_payload());
        assert!(normalize_payload("0xzz").has_payload());
    }
}
