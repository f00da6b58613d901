// tests/onchain_oracle.rs
//
// The oracle is best-effort: every failure path must come back as None.

mod common;

use std::sync::Arc;

use alloy_primitives::Address;
use alloy_sol_types::{SolCall, SolValue};
use anyhow::{bail, Result};
use async_trait::async_trait;
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use tx_risk_analyzer::config::OnchainConfig;
use tx_risk_analyzer::onchain::registry::getRiskCall;
use tx_risk_analyzer::onchain::{OnchainRiskLevel, OnchainRiskOracle, RiskRecord, RiskRegistry};

struct FixedRegistry(RiskRecord);

#[async_trait]
impl RiskRegistry for FixedRegistry {
    async fn get_risk(&self, _target: Address) -> Result<RiskRecord> {
        Ok(self.0.clone())
    }
}

struct BrokenRegistry;

#[async_trait]
impl RiskRegistry for BrokenRegistry {
    async fn get_risk(&self, _target: Address) -> Result<RiskRecord> {
        bail!("connection reset by peer")
    }
}

fn record(level: u8, label: &str, uri: &str) -> RiskRecord {
    RiskRecord {
        level,
        label: label.into(),
        uri: uri.into(),
    }
}

fn fixed(level: u8, label: &str, uri: &str) -> OnchainRiskOracle {
    OnchainRiskOracle::with_registry(Arc::new(FixedRegistry(record(level, label, uri))))
}

#[tokio::test]
async fn absent_target_or_config_is_no_signal() {
    assert!(fixed(3, "x", "").lookup(None).await.is_none());

    let unconfigured = OnchainRiskOracle::from_config(&OnchainConfig::default());
    assert!(unconfigured.lookup(Some(common::TARGET)).await.is_none());
}

#[tokio::test]
async fn syntactically_bad_targets_are_rejected() {
    let oracle = fixed(3, "x", "");
    for target in [
        "0xabc",
        "1111111111111111111111111111111111111111",
        "0x111111111111111111111111111111111111111111",
        "0xzz11111111111111111111111111111111111111",
    ] {
        assert!(oracle.lookup(Some(target)).await.is_none(), "target {target}");
    }
}

#[tokio::test]
async fn registry_failure_is_masked() {
    let oracle = OnchainRiskOracle::with_registry(Arc::new(BrokenRegistry));
    assert!(oracle.lookup(Some(common::TARGET)).await.is_none());
}

#[tokio::test]
async fn levels_map_and_empty_unknown_is_dropped() {
    let s = fixed(1, "", "").lookup(Some(common::TARGET)).await.unwrap();
    assert_eq!(s.level, OnchainRiskLevel::Low);
    assert!(s.uri.is_none());

    let s = fixed(2, "Mixer", "").lookup(Some(common::TARGET)).await.unwrap();
    assert_eq!(s.level, OnchainRiskLevel::Medium);

    assert!(fixed(0, "", "").lookup(Some(common::TARGET)).await.is_none());

    let s = fixed(9, "", "https://registry.example/x").lookup(Some(common::TARGET)).await.unwrap();
    assert_eq!(s.level, OnchainRiskLevel::Unknown);
    assert_eq!(s.uri.as_deref(), Some("https://registry.example/x"));
}

/// Stand-in JSON-RPC node answering `eth_call` with an encoded record.
async fn rpc_node(reply: impl Fn(&Value) -> Value + Clone + Send + Sync + 'static) -> String {
    let app = Router::new().route(
        "/",
        post(move |Json(req): Json<Value>| {
            let reply = reply.clone();
            async move { Json(reply(&req)) }
        }),
    );
    common::spawn_server(app).await
}

fn configured(rpc_url: String) -> OnchainRiskOracle {
    OnchainRiskOracle::from_config(&OnchainConfig {
        rpc_url: Some(rpc_url),
        registry_address: Some("0x9999999999999999999999999999999999999999".into()),
        timeout_secs: 5,
    })
}

#[tokio::test]
async fn json_rpc_round_trip_reports_high() {
    let url = rpc_node(|req| {
        assert_eq!(req["method"], "eth_call");
        let data = req["params"][0]["data"].as_str().unwrap_or_default();
        let selector = format!("0x{}", hex::encode(getRiskCall::SELECTOR));
        assert!(data.starts_with(&selector), "calldata {data}");
        let encoded = record(3, "Known drainer", "https://registry.example/d").abi_encode();
        json!({ "jsonrpc": "2.0", "id": req["id"], "result": format!("0x{}", hex::encode(encoded)) })
    })
    .await;

    let oracle = configured(url);
    assert!(oracle.is_enabled());
    let s = oracle.lookup(Some(common::TARGET)).await.expect("signal");
    assert_eq!(s.level, OnchainRiskLevel::High);
    assert_eq!(s.label, "Known drainer");
    assert_eq!(s.contract, common::TARGET);
    assert_eq!(s.uri.as_deref(), Some("https://registry.example/d"));
}

#[tokio::test]
async fn json_rpc_error_and_garbage_are_no_signal() {
    let url = rpc_node(|req| {
        json!({ "jsonrpc": "2.0", "id": req["id"], "error": { "code": -32000, "message": "execution reverted" } })
    })
    .await;
    assert!(configured(url).lookup(Some(common::TARGET)).await.is_none());

    let url = rpc_node(|req| json!({ "jsonrpc": "2.0", "id": req["id"], "result": "0x" })).await;
    assert!(configured(url).lookup(Some(common::TARGET)).await.is_none());
}
