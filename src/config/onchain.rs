// src/config/onchain.rs
use serde::{Deserialize, Serialize};

fn default_timeout_secs() -> u64 {
    8
}

/// Where the reputation registry lives. Either value unset means "no lookup".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnchainConfig {
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub registry_address: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OnchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            registry_address: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OnchainConfig {
    pub fn from_env() -> Self {
        Self {
            rpc_url: super::env_opt("SEPOLIA_RPC_URL"),
            registry_address: super::env_opt("RISK_REGISTRY_ADDRESS"),
            ..Self::default()
        }
    }

    pub(crate) fn resolve(&mut self) {
        self.rpc_url = self.rpc_url.take().filter(|s| !s.trim().is_empty());
        self.registry_address = self.registry_address.take().filter(|s| !s.trim().is_empty());
    }

    pub fn is_configured(&self) -> bool {
        self.rpc_url.is_some() && self.registry_address.is_some()
    }
}
