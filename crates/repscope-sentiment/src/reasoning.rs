//! Reasoning-service boundary: one prompt in, one JSON object out.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use repscope_core::AppConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ReasoningError;
use crate::prompt::ReportRequest;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z]*[ \t]*\r?\n?(.*?)```").expect("valid fenced block regex")
});

/// A text-completion backend.
///
/// Implementations perform exactly one exchange per call and report every
/// failure as a [`ReasoningError`].
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Send `request` and return the raw completion text.
    ///
    /// # Errors
    ///
    /// [`ReasoningError::ServiceUnavailable`] for transport failures and
    /// non-success statuses; [`ReasoningError::MalformedOutput`] when the
    /// response carries no completion text.
    async fn complete(&self, request: &ReportRequest) -> Result<String, ReasoningError>;
}

/// Send `request` and recover the JSON object from the completion.
///
/// # Errors
///
/// Propagates the service error, or [`ReasoningError::MalformedOutput`] when
/// no JSON object can be extracted.
pub async fn request_report(
    service: &dyn ReasoningService,
    request: &ReportRequest,
) -> Result<Map<String, Value>, ReasoningError> {
    let raw = service.complete(request).await?;
    extract_json_payload(&raw)
}

/// Recover a JSON object from a completion that may be fenced or wrapped in prose.
///
/// Tries, in order: each fenced code block until one holds an object; the
/// whole trimmed body; the span from the first `{` to the last `}`.
///
/// # Errors
///
/// Returns [`ReasoningError::MalformedOutput`] if none of those parse as a JSON
/// object.
pub fn extract_json_payload(raw: &str) -> Result<Map<String, Value>, ReasoningError> {
    let fenced = FENCED_BLOCK
        .captures_iter(raw)
        .filter_map(|c| c.get(1))
        .find_map(|block| parse_object(block.as_str()).ok());
    if let Some(map) = fenced {
        return Ok(map);
    }

    let body = raw.trim();
    match parse_object(body) {
        Ok(map) => Ok(map),
        Err(err) => match (body.find('{'), body.rfind('}')) {
            (Some(start), Some(end)) if start < end => parse_object(&body[start..=end]),
            _ => Err(err),
        },
    }
}

fn parse_object(text: &str) -> Result<Map<String, Value>, ReasoningError> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ReasoningError::MalformedOutput(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(ReasoningError::MalformedOutput(format!(
            "invalid JSON: {e}"
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Settings for [`ChatCompletionClient`].
#[derive(Clone)]
pub struct ReasoningConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ReasoningConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.llm_base_url.clone(),
            api_key: config.llm_api_key.clone(),
            model: config.llm_model.clone(),
            timeout: Duration::from_secs(config.llm_timeout_secs),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
        }
    }
}

impl std::fmt::Debug for ReasoningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReasoningConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Client for an OpenAI-compatible `chat/completions` endpoint.
pub struct ChatCompletionClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatCompletionClient {
    /// Build a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`ReasoningError::ServiceUnavailable`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(config: &ReasoningConfig) -> Result<Self, ReasoningError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent("repscope/0.1 (reputation-analysis)")
            .build()
            .map_err(|e| {
                ReasoningError::ServiceUnavailable(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl ReasoningService for ChatCompletionClient {
    async fn complete(&self, request: &ReportRequest) -> Result<String, ReasoningError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut builder = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            let kind = if e.is_timeout() { "timed out" } else { "failed" };
            ReasoningError::ServiceUnavailable(format!("request {kind}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReasoningError::ServiceUnavailable(format!(
                "service returned status {status}"
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ReasoningError::ServiceUnavailable(format!("response body timed out: {e}"))
            } else {
                ReasoningError::MalformedOutput(format!("unreadable response envelope: {e}"))
            }
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                ReasoningError::MalformedOutput("response had no message content".to_string())
            })
    }
}
