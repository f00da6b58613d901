// src/onchain/mod.rs
//! On-chain reputation oracle.
//!
//! Best-effort enrichment: every failure (no target, no config, bad address,
//! network, RPC, decode) resolves to `None`, never to an error.

pub mod registry;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use metrics::counter;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::OnchainConfig;
pub use registry::{JsonRpcRegistry, RiskRecord, RiskRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OnchainRiskLevel {
    Unknown,
    Low,
    Medium,
    High,
}

impl OnchainRiskLevel {
    /// Registry severity code: 1/2/3 → low/medium/high, anything else unknown.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Low,
            2 => Self::Medium,
            3 => Self::High,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalSource {
    #[serde(rename = "onchainRegistry")]
    OnchainRegistry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnchainRiskSignal {
    pub source: SignalSource,
    pub contract: String,
    pub level: OnchainRiskLevel,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Syntactic gate: `0x` prefix and exactly 42 characters.
pub fn is_plausible_address(s: &str) -> bool {
    s.starts_with("0x") && s.len() == 42
}

#[derive(Clone, Default)]
pub struct OnchainRiskOracle {
    registry: Option<Arc<dyn RiskRegistry>>,
}

impl OnchainRiskOracle {
    /// Oracle that always answers "no signal".
    pub fn disabled() -> Self {
        Self { registry: None }
    }

    pub fn with_registry(registry: Arc<dyn RiskRegistry>) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// JSON-RPC backed oracle when both RPC URL and registry address are set;
    /// disabled otherwise.
    pub fn from_config(cfg: &OnchainConfig) -> Self {
        let (Some(rpc_url), Some(registry)) = (cfg.rpc_url.as_deref(), cfg.registry_address.as_deref())
        else {
            debug!("onchain registry not configured, lookups disabled");
            return Self::disabled();
        };

        let registry = match Address::from_str(registry) {
            Ok(a) => a,
            Err(e) => {
                warn!(error = %e, "RISK_REGISTRY_ADDRESS is not a valid address, lookups disabled");
                return Self::disabled();
            }
        };

        match JsonRpcRegistry::new(rpc_url, registry, Duration::from_secs(cfg.timeout_secs)) {
            Ok(r) => Self::with_registry(Arc::new(r)),
            Err(e) => {
                warn!(error = ?e, "onchain registry client unavailable, lookups disabled");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.registry.is_some()
    }

    /// Look up `target`. `None` means "no signal available".
    pub async fn lookup(&self, target: Option<&str>) -> Option<OnchainRiskSignal> {
        let target = target?;
        let registry = self.registry.as_ref()?;

        if !is_plausible_address(target) {
            debug!(address = %target, "target hint failed address check, skipping registry");
            return None;
        }
        let address = match Address::from_str(target) {
            Ok(a) => a,
            Err(e) => {
                debug!(address = %target, error = %e, "target hint is not hex, skipping registry");
                return None;
            }
        };

        let record = match registry.get_risk(address).await {
            Ok(r) => r,
            Err(e) => {
                warn!(address = %target, error = ?e, "onchain risk lookup failed, treating as no signal");
                return None;
            }
        };

        let level = OnchainRiskLevel::from_code(record.level);
        if level == OnchainRiskLevel::Unknown && record.label.is_empty() && record.uri.is_empty() {
            return None;
        }

        counter!("onchain_risk_signals_total", "level" => level.as_str()).increment(1);
        Some(OnchainRiskSignal {
            source: SignalSource::OnchainRegistry,
            contract: target.to_string(),
            level,
            label: record.label,
            uri: Some(record.uri).filter(|u| !u.is_empty()),
        })
    }
}
