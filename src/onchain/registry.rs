// src/onchain/registry.rs
//! Transport to the reputation registry contract.
//!
//! `getRisk(address) -> (uint8 level, string label, string uri)` is issued as a
//! plain JSON-RPC `eth_call` against `latest`; calldata and return data go
//! through the `sol!`-generated codec.

use std::time::Duration;

use alloy_primitives::Address;
use alloy_sol_types::{sol, SolCall, SolValue};
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct RiskRecord {
        uint8 level;
        string label;
        string uri;
    }

    function getRisk(address target) external view returns (RiskRecord memory);
}

/// Read-only access to the registry. Implemented over JSON-RPC in production
/// and by in-process fakes in tests.
#[async_trait]
pub trait RiskRegistry: Send + Sync {
    async fn get_risk(&self, target: Address) -> Result<RiskRecord>;
}

pub struct JsonRpcRegistry {
    http: reqwest::Client,
    rpc_url: String,
    registry: Address,
}

#[derive(Deserialize)]
struct RpcResp {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<Value>,
}

impl JsonRpcRegistry {
    pub fn new(rpc_url: impl Into<String>, registry: Address, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("tx-risk-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()
            .context("building JSON-RPC client")?;
        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
            registry,
        })
    }

    pub fn registry(&self) -> Address {
        self.registry
    }
}

#[async_trait]
impl RiskRegistry for JsonRpcRegistry {
    async fn get_risk(&self, target: Address) -> Result<RiskRecord> {
        let data = getRiskCall { target }.abi_encode();
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                { "to": self.registry.to_string(), "data": format!("0x{}", hex::encode(data)) },
                "latest"
            ]
        });

        let resp: RpcResp = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = resp.error {
            bail!("eth_call rejected: {err}");
        }
        let result = resp.result.ok_or_else(|| anyhow!("eth_call returned no result"))?;
        let bytes = hex::decode(result.trim_start_matches("0x")).context("eth_call result is not hex")?;
        RiskRecord::abi_decode(&bytes).map_err(|e| anyhow!("decoding getRisk return data: {e}"))
    }
}
