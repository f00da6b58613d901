//! Structured errors for the explanation path.
//!
//! Decode and on-chain lookups never fail outward; only the model-backed
//! explanation does, and callers need to tell these cases apart.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("configuration: missing OPENAI_API_KEY for AI explanation")]
    MissingCredential,

    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream: model API returned HTTP {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("upstream: response has no message content")]
    MissingContent,

    #[error("upstream: explanation content is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("upstream: explanation JSON missing required field `{0}`")]
    MissingField(&'static str),
}

impl ExplainError {
    /// Stable short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ExplainError::MissingCredential => "config",
            ExplainError::Transport(_) => "transport",
            ExplainError::UpstreamStatus { .. } => "http_status",
            ExplainError::MissingContent => "missing_content",
            ExplainError::MalformedJson(_) => "malformed_json",
            ExplainError::MissingField(_) => "missing_field",
        }
    }

    /// True for everything except local misconfiguration.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, ExplainError::MissingCredential)
    }
}
