use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::conversation::Conversation;
use crate::error::ChatError;
use crate::tool_registry::ToolRegistry;
use crate::types::{CompletionResult, FunctionCallRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// How transient failures are retried. Permanent failures (bad credentials,
/// malformed requests, unexpected response shapes) are never retried.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Backoff duration before the given retry (0-based), capped.
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        let base = self.initial_backoff.as_millis() as f64;
        let backoff = base * self.multiplier.powi(attempt as i32);
        let capped = backoff.min(self.max_backoff.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }
}

/// Client configuration, passed explicitly at construction.
#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl ChatConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
            retry: RetryConfig::default(),
        }
    }

    /// Read `OPENAI_API_KEY` (required) and `OPENAI_BASE_URL` (optional).
    pub fn from_env() -> Result<Self, ChatError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| ChatError::MissingApiKey)?;
        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Chat-completion client speaking the OpenAI-compatible functions API.
#[derive(Clone)]
pub struct ChatClient {
    config: ChatConfig,
    http: reqwest::Client,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(8)
            .tcp_keepalive(Duration::from_secs(30))
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatError::Network(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Plain completion: no functions advertised.
    pub async fn complete(
        &self,
        conversation: &Conversation,
    ) -> Result<CompletionResult, ChatError> {
        self.validate(conversation)?;
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": conversation.messages(),
        });
        self.send(&body).await
    }

    /// Completion with the registry's full schema list advertised. When
    /// `target` is set the request forces that function to be called.
    pub async fn complete_with_functions(
        &self,
        conversation: &Conversation,
        tools: &ToolRegistry,
        target: Option<&str>,
    ) -> Result<CompletionResult, ChatError> {
        self.validate(conversation)?;
        let functions = tools.schemas();
        debug!(functions = functions.len(), "advertising function schemas");
        let mut body = serde_json::json!({
            "model": self.config.model,
            "messages": conversation.messages(),
            "functions": functions,
        });
        if let Some(name) = target {
            body["function_call"] = serde_json::json!({ "name": name });
        }
        self.send(&body).await
    }

    // Deterministic, before any network I/O.
    fn validate(&self, conversation: &Conversation) -> Result<(), ChatError> {
        if self.config.api_key.is_empty() {
            return Err(ChatError::MissingApiKey);
        }
        if conversation.is_empty() {
            return Err(ChatError::EmptyConversation);
        }
        Ok(())
    }

    async fn send(&self, body: &Value) -> Result<CompletionResult, ChatError> {
        with_retry(&self.config.retry, || self.send_once(body)).await
    }

    async fn send_once(&self, body: &Value) -> Result<CompletionResult, ChatError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                429 => ChatError::RateLimited,
                code => ChatError::Api {
                    status: code,
                    message,
                },
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        parse_completion(&text)
    }
}

/// Run `operation`, retrying transient failures with exponential backoff
/// until it succeeds or the attempt budget is spent.
pub(crate) async fn with_retry<F, Fut, T>(
    retry: &RetryConfig,
    mut operation: F,
) -> Result<T, ChatError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ChatError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < retry.max_attempts => {
                let backoff = retry.backoff_duration(attempt - 1);
                warn!(
                    attempt,
                    wait_ms = backoff.as_millis() as u64,
                    error = %e,
                    "retrying chat completion"
                );
                tokio::time::sleep(backoff).await;
            }
            Err(e) => return Err(e),
        }
    }
}

// Wire types for the slice of the response we consume.

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    finish_reason: Option<String>,
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    function_call: Option<RawFunctionCall>,
}

#[derive(Debug, Deserialize)]
struct RawFunctionCall {
    name: String,
    arguments: String,
}

/// First choice only: a function-call request when the finish reason says
/// so, otherwise the text content.
fn parse_completion(body: &str) -> Result<CompletionResult, ChatError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ChatError::InvalidResponse(format!("undecodable body: {e}")))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ChatError::InvalidResponse("no choices in response".to_string()))?;

    if choice.finish_reason.as_deref() == Some("function_call") {
        let call = choice.message.function_call.ok_or_else(|| {
            ChatError::InvalidResponse(
                "finish reason is function_call but no call is present".to_string(),
            )
        })?;
        debug!(function = %call.name, "model requested a function call");
        return Ok(CompletionResult::FunctionCall(FunctionCallRequest {
            name: call.name,
            arguments: call.arguments,
        }));
    }

    match choice.message.content {
        Some(content) => Ok(CompletionResult::Answer(content)),
        None => Err(ChatError::InvalidResponse(
            "response carries no content".to_string(),
        )),
    }
}
