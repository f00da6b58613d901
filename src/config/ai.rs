// src/config/ai.rs
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_max_tokens() -> u32 {
    500
}
fn default_timeout_secs() -> u64 {
    20
}

/// Settings for the model-backed explanation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// `None` is a hard failure for the model path. In TOML, "ENV" means:
    /// read from OPENAI_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Chat-completions URL. Overridable for self-hosted gateways and tests.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AiConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self {
            api_key: super::env_opt("OPENAI_API_KEY"),
            ..Self::default()
        };
        if let Some(m) = super::env_opt("OPENAI_MODEL") {
            cfg.model = m;
        }
        if let Some(url) = super::env_opt("OPENAI_API_URL") {
            cfg.endpoint = url;
        }
        cfg
    }

    /// Resolve the "ENV" placeholder and drop blank keys. An unset variable
    /// leaves no credential; only the model path fails on that, at request time.
    pub(crate) fn resolve(&mut self) {
        if let Some(key) = self.api_key.as_deref() {
            if key.trim().eq_ignore_ascii_case("env") {
                self.api_key = super::env_opt("OPENAI_API_KEY");
                if self.api_key.is_none() {
                    warn!("api_key = \"ENV\" but OPENAI_API_KEY is unset; model explanations will fail");
                }
            }
        }
        self.api_key = self
            .api_key
            .take()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if !(0.0..=2.0).contains(&self.temperature) {
            self.temperature = default_temperature();
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}
