// src/config/mod.rs
//! Process-level configuration, loaded once by the binaries and passed into
//! component constructors. Business logic never reads the environment itself.

pub mod ai;
pub mod onchain;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use ai::AiConfig;
pub use onchain::OnchainConfig;

pub const ENV_CONFIG_PATH: &str = "ANALYZER_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/analyzer.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub onchain: OnchainConfig,
}

impl AppConfig {
    /// OPENAI_API_KEY, OPENAI_MODEL, OPENAI_API_URL, SEPOLIA_RPC_URL,
    /// RISK_REGISTRY_ADDRESS. Empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            ai: AiConfig::from_env(),
            onchain: OnchainConfig::from_env(),
        }
    }

    /// Load a TOML file with `[ai]` and `[onchain]` tables.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let mut cfg: AppConfig =
            toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
        cfg.ai.resolve();
        cfg.onchain.resolve();
        Ok(cfg)
    }

    /// Lookup order:
    /// 1) $ANALYZER_CONFIG_PATH
    /// 2) config/analyzer.toml
    /// 3) environment variables only
    pub fn load() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            return Self::load_from_file(&pb);
        }
        let default = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default.exists() {
            return Self::load_from_file(&default);
        }
        Ok(Self::from_env())
    }
}

pub(crate) fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
