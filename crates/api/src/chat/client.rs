//! OpenRouter chat client.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint for two jobs:
//! schema-constrained intent classification (non-streaming) and the streamed
//! conversational reply. The API key resolves per call - a key supplied in
//! the request payload overrides the configured default for that call only.

use std::sync::Arc;
use std::time::Duration;

use async_stream::stream;
use futures::Stream;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::config::ChatProviderConfig;

use super::types::{
    CompletionRequest, CompletionResponse, IntentAnalysis, JsonSchemaFormat, ProviderErrorBody,
    ProviderMessage, ResponseFormat, StreamChunk, intent_schema,
};

const INTENT_TIMEOUT_SECS: u64 = 15;
const STREAM_TIMEOUT_SECS: u64 = 30;
const INTENT_MAX_TOKENS: u32 = 300;
const REPLY_MAX_TOKENS: u32 = 600;

/// Errors that can occur when talking to the chat provider.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// No API key is available (neither configured nor supplied).
    #[error("chat provider not configured")]
    NotConfigured,

    /// HTTP request failed (includes timeouts).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned an error response.
    #[error("provider error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Stream error mid-response.
    #[error("stream error: {0}")]
    Stream(String),
}

/// OpenRouter (OpenAI-compatible) chat client.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<ChatClientInner>,
}

struct ChatClientInner {
    client: reqwest::Client,
    base_url: String,
    model: String,
    intent_model: String,
    default_key: Option<SecretString>,
    /// Sent as HTTP-Referer, which OpenRouter uses for app attribution.
    referer: String,
}

impl ChatClient {
    /// Create a new chat client.
    ///
    /// When `config` is `None` the client still exists but every call fails
    /// with [`ChatError::NotConfigured`] unless a per-request key is given.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new(config: Option<&ChatProviderConfig>, referer: &str) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client");

        let (base_url, model, intent_model, default_key) = config.map_or_else(
            || {
                (
                    "https://openrouter.ai/api/v1".to_string(),
                    String::new(),
                    String::new(),
                    None,
                )
            },
            |c| {
                (
                    c.base_url.clone(),
                    c.model.clone(),
                    c.intent_model.clone(),
                    Some(c.api_key.clone()),
                )
            },
        );

        Self {
            inner: Arc::new(ChatClientInner {
                client,
                base_url,
                model,
                intent_model,
                default_key,
                referer: referer.to_string(),
            }),
        }
    }

    /// Whether a default API key is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner.default_key.is_some()
    }

    /// Resolve the key for one call: request override first, then config.
    fn resolve_key(&self, override_key: Option<&str>) -> Result<String, ChatError> {
        if let Some(key) = override_key {
            let trimmed = key.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
        self.inner
            .default_key
            .as_ref()
            .map(|k| k.expose_secret().to_string())
            .ok_or(ChatError::NotConfigured)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.inner.base_url)
    }

    /// Classify a message's intent with a schema-constrained completion.
    ///
    /// # Errors
    ///
    /// Returns a `ChatError` on missing key, network failure, provider
    /// error, or an unparseable response. Callers fall back to keyword
    /// detection on any error.
    #[instrument(skip(self, intent_prompt, override_key))]
    pub async fn classify_intent(
        &self,
        intent_prompt: &str,
        override_key: Option<&str>,
    ) -> Result<IntentAnalysis, ChatError> {
        let key = self.resolve_key(override_key)?;

        let request = CompletionRequest {
            model: self.inner.intent_model.clone(),
            messages: vec![
                ProviderMessage::new(
                    "system",
                    "You are a precise intent classifier for a dessert shop. \
                     Analyze user messages and classify their intent accurately.",
                ),
                ProviderMessage::new("user", intent_prompt),
            ],
            stream: None,
            temperature: 0.1,
            max_tokens: INTENT_MAX_TOKENS,
            top_p: None,
            response_format: Some(ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: "intent_analysis".to_string(),
                    strict: true,
                    schema: intent_schema(),
                },
            }),
        };

        let response = self
            .inner
            .client
            .post(self.completions_url())
            .timeout(Duration::from_secs(INTENT_TIMEOUT_SECS))
            .bearer_auth(&key)
            .header("HTTP-Referer", &self.inner.referer)
            .header("X-Title", "Sweet Dessert Intent Analyzer")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Self::error_from_body(status.as_u16(), &body));
        }

        let completion: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ChatError::Parse(format!("bad completion response: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ChatError::Parse("no content in completion".to_string()))?;

        let analysis: IntentAnalysis = serde_json::from_str(&content)
            .map_err(|e| ChatError::Parse(format!("bad intent JSON: {e}")))?;

        tracing::info!(
            intent = %analysis.intent,
            confidence = ?analysis.confidence,
            reason = %analysis.reason,
            "Intent classified"
        );

        Ok(analysis)
    }

    /// Stream a conversational reply as content deltas.
    ///
    /// # Errors
    ///
    /// Returns a `ChatError` if the request cannot be started; mid-stream
    /// failures surface as `Err` items on the stream.
    #[instrument(skip_all, fields(history_len = history.len()))]
    pub async fn stream_reply(
        &self,
        system_prompt: &str,
        history: &[ProviderMessage],
        message: &str,
        override_key: Option<&str>,
    ) -> Result<impl Stream<Item = Result<String, ChatError>> + use<>, ChatError> {
        let key = self.resolve_key(override_key)?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ProviderMessage::new("system", system_prompt));
        messages.extend_from_slice(history);
        messages.push(ProviderMessage::new("user", message));

        let request = CompletionRequest {
            model: self.inner.model.clone(),
            messages,
            stream: Some(true),
            temperature: 0.7,
            max_tokens: REPLY_MAX_TOKENS,
            top_p: Some(0.9),
            response_format: None,
        };

        let response = self
            .inner
            .client
            .post(self.completions_url())
            .timeout(Duration::from_secs(STREAM_TIMEOUT_SECS))
            .bearer_auth(&key)
            .header("HTTP-Referer", &self.inner.referer)
            .header("X-Title", "Sweet Dessert Chat Assistant")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_from_body(status.as_u16(), &body));
        }

        Ok(stream! {
            use futures::StreamExt;

            let mut buffer = String::new();
            let mut byte_stream = std::pin::pin!(response.bytes_stream());

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        yield Err(ChatError::Stream(e.to_string()));
                        return;
                    }
                };

                match std::str::from_utf8(&chunk) {
                    Ok(text) => buffer.push_str(text),
                    Err(e) => {
                        yield Err(ChatError::Stream(format!("invalid UTF-8: {e}")));
                        continue;
                    }
                }

                while let Some(data) = extract_sse_data(&mut buffer) {
                    if data == "[DONE]" {
                        return;
                    }
                    match parse_stream_delta(&data) {
                        Ok(Some(content)) => yield Ok(content),
                        Ok(None) => {}
                        Err(e) => yield Err(e),
                    }
                }
            }
        })
    }

    fn error_from_body(status: u16, body: &str) -> ChatError {
        let message = serde_json::from_str::<ProviderErrorBody>(body)
            .map_or_else(|_| body.to_string(), |b| b.error.message);
        ChatError::Api { status, message }
    }
}

/// Pull the next complete `data:` payload out of the SSE buffer.
///
/// OpenRouter sends newline-delimited `data:` lines; comment lines (starting
/// with `:`) are keep-alives and are skipped.
fn extract_sse_data(buffer: &mut String) -> Option<String> {
    loop {
        let newline = buffer.find('\n')?;
        let line = buffer[..newline].trim().to_string();
        *buffer = buffer[newline + 1..].to_string();

        if line.is_empty() || line.starts_with(':') {
            continue;
        }

        if let Some(data) = line.strip_prefix("data: ") {
            return Some(data.to_string());
        }
    }
}

/// Parse one stream chunk, returning its content delta if present.
fn parse_stream_delta(data: &str) -> Result<Option<String>, ChatError> {
    // Unparseable keep-alive frames are ignored rather than failing the turn.
    let Ok(chunk) = serde_json::from_str::<StreamChunk>(data) else {
        return Ok(None);
    };

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .filter(|c| !c.is_empty()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sse_data() {
        let mut buffer =
            "data: {\"a\":1}\n: keep-alive\ndata: [DONE]\npartial".to_string();

        assert_eq!(extract_sse_data(&mut buffer).as_deref(), Some("{\"a\":1}"));
        assert_eq!(extract_sse_data(&mut buffer).as_deref(), Some("[DONE]"));
        // The trailing partial line stays buffered.
        assert_eq!(extract_sse_data(&mut buffer), None);
        assert_eq!(buffer, "partial");
    }

    #[test]
    fn test_extract_sse_data_skips_blank_lines() {
        let mut buffer = "\n\ndata: x\n".to_string();
        assert_eq!(extract_sse_data(&mut buffer).as_deref(), Some("x"));
    }

    #[test]
    fn test_parse_stream_delta_content() {
        let data = r#"{"choices":[{"delta":{"content":"Hi"}}]}"#;
        assert_eq!(parse_stream_delta(data).unwrap().as_deref(), Some("Hi"));
    }

    #[test]
    fn test_parse_stream_delta_empty_and_missing() {
        let data = r#"{"choices":[{"delta":{}}]}"#;
        assert_eq!(parse_stream_delta(data).unwrap(), None);

        let data = r#"{"choices":[]}"#;
        assert_eq!(parse_stream_delta(data).unwrap(), None);
    }

    #[test]
    fn test_parse_stream_delta_garbage_is_ignored() {
        assert_eq!(parse_stream_delta("not json").unwrap(), None);
    }

    #[test]
    fn test_unconfigured_client_has_no_key() {
        let client = ChatClient::new(None, "http://localhost:8000");
        assert!(!client.is_configured());
        assert!(matches!(
            client.resolve_key(None),
            Err(ChatError::NotConfigured)
        ));
    }

    #[test]
    fn test_request_key_overrides_default() {
        let client = ChatClient::new(None, "http://localhost:8000");
        let key = client.resolve_key(Some("  sk-or-override  ")).unwrap();
        assert_eq!(key, "sk-or-override");
    }
}
