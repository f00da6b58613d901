//! Model-backed explanation via an OpenAI-compatible chat-completions API.
//!
//! Strict mode: a missing credential, a non-2xx status, empty content,
//! unparsable JSON or a missing field all come back as [`ExplainError`].
//! Nothing here downgrades to the rule-based composer.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use super::{Explainer, Explanation, ExplanationSource};
use crate::analyze::TransactionAnalysis;
use crate::config::AiConfig;
use crate::error::ExplainError;
use crate::findings::{DecodedAction, PrivacyNote, RiskFinding};

const SYSTEM_PROMPT: &str = "You are an assistant that explains Web3 transactions for end users and developers. \
Respond ONLY with minified JSON, no markdown, following this TypeScript type strictly: \
{ userHeadline: string; userBody: string; userPrivacyNote: string; devNotes: string }. \
userHeadline: one short sentence summary for beginners. userBody: 2-4 short sentences explaining what will happen and key risks. \
userPrivacyNote: 1 short sentence about privacy implications. devNotes: a longer paragraph for developers and advanced users.";

const USER_PREAMBLE: &str = "Explain the following transaction analysis to an end user. \
Input is a JSON object with raw calldata and a decoded analysis. \
Focus on what will happen, the main risks and privacy implications.\n\n";

const REQUIRED_FIELDS: [&str; 4] = ["userHeadline", "userBody", "userPrivacyNote", "devNotes"];

/// What the model sees about the transaction.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserPayload<'a> {
    raw_input: &'a str,
    actions: &'a [DecodedAction],
    risks: &'a [RiskFinding],
    privacy: &'a [PrivacyNote],
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct Req<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
    messages: Vec<Msg<'a>>,
}

/// `choices[0].message.content` when it is a non-blank string.
fn message_content(body: &Value) -> Option<&str> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|c| !c.trim().is_empty())
}

pub struct OpenAiExplainer {
    http: reqwest::Client,
    cfg: AiConfig,
}

impl OpenAiExplainer {
    pub fn new(cfg: AiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("tx-risk-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self { http, cfg })
    }

    async fn request(
        &self,
        api_key: &str,
        raw: &str,
        analysis: &TransactionAnalysis,
    ) -> Result<Explanation, ExplainError> {
        let payload = UserPayload {
            raw_input: raw,
            actions: &analysis.actions,
            risks: &analysis.risks,
            privacy: &analysis.privacy,
        };
        let payload_json =
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string());
        let user_content = format!("{USER_PREAMBLE}{payload_json}");

        let req = Req {
            model: &self.cfg.model,
            temperature: self.cfg.temperature,
            max_tokens: self.cfg.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
            messages: vec![
                Msg {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Msg {
                    role: "user",
                    content: &user_content,
                },
            ],
        };

        let resp = self
            .http
            .post(&self.cfg.endpoint)
            .bearer_auth(api_key)
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "model API HTTP error");
            return Err(ExplainError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        // Read as text first so an unexpected shape is a content problem,
        // not a transport one.
        let text = resp.text().await?;
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        let content = message_content(&body).ok_or_else(|| {
            error!(body = %text, "model response missing message content");
            ExplainError::MissingContent
        })?;

        parse_explanation(content)
    }
}

/// Parse the model's message content into an [`Explanation`].
pub fn parse_explanation(content: &str) -> Result<Explanation, ExplainError> {
    let parsed: Value = serde_json::from_str(content).map_err(|e| {
        error!(error = %e, content = %content, "failed to parse model explanation JSON");
        ExplainError::MalformedJson(e)
    })?;

    let mut fields: Vec<String> = Vec::with_capacity(REQUIRED_FIELDS.len());
    for name in REQUIRED_FIELDS {
        match parsed.get(name).and_then(Value::as_str) {
            Some(s) => fields.push(s.trim().to_string()),
            None => {
                error!(field = name, "model explanation JSON missing required field");
                return Err(ExplainError::MissingField(name));
            }
        }
    }

    let mut it = fields.into_iter();
    Ok(Explanation {
        user_headline: it.next().unwrap_or_default(),
        user_body: it.next().unwrap_or_default(),
        user_privacy_note: it.next().unwrap_or_default(),
        dev_notes: it.next().unwrap_or_default(),
        source: ExplanationSource::Model,
    })
}

#[async_trait]
impl Explainer for OpenAiExplainer {
    async fn explain(
        &self,
        raw: &str,
        analysis: &TransactionAnalysis,
    ) -> Result<Explanation, ExplainError> {
        let Some(api_key) = self.cfg.api_key.as_deref() else {
            error!("missing OPENAI_API_KEY, strict mode, refusing to fall back");
            counter!("explanation_failures_total", "kind" => "config").increment(1);
            return Err(ExplainError::MissingCredential);
        };

        let started = Instant::now();
        let out = self.request(api_key, raw, analysis).await;
        histogram!("explanation_duration_ms").record(started.elapsed().as_secs_f64() * 1000.0);

        match &out {
            Ok(e) => info!(headline = %e.user_headline, "generated explanation via model"),
            Err(e) => {
                error!(error = %e, kind = e.kind(), "model explanation failed");
                counter!("explanation_failures_total", "kind" => e.kind()).increment(1);
            }
        }
        out
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
