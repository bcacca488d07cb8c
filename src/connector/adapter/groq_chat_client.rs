use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{ChatMessage, UpstreamError};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const COMPLETIONS_PATH: &str = "/chat/completions";
pub const MODEL: &str = "llama3-groq-70b-8192-tool-use-preview";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 8192;
const TOP_P: f32 = 1.0;

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

/// The subset of the chat-completions response we read. `choices` must be
/// present; below it every level is optional so an empty choice degrades to
/// "no content" instead of a parse error.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for Groq's OpenAI-compatible chat-completions endpoint.
///
/// Sends the prompt with fixed sampling parameters and bearer authentication.
/// Non-success responses keep the status text and, when the body is JSON,
/// the serialized error payload for logging.
pub struct GroqChatClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl GroqChatClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: MODEL.to_string(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn status_detail(status: reqwest::StatusCode, body: Option<&serde_json::Value>) -> String {
        let status_text = status.canonical_reason().unwrap_or(status.as_str());
        match body {
            Some(body) => format!("Groq API error: {status_text} - {body}"),
            None => format!("Groq API error: {status_text}"),
        }
    }
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, UpstreamError> {
        let request = ApiRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(format!("GroqChatClient: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            // The error body is best effort: anything that isn't JSON is dropped.
            let body = response.json::<serde_json::Value>().await.ok();
            let detail = Self::status_detail(status, body.as_ref());
            warn!("GroqChatClient: API returned {}", status);
            return Err(UpstreamError::status(status.as_u16(), detail));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::parse(format!("GroqChatClient: {e}")))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        debug!(
            "GroqChatClient: received {} chars",
            content.as_deref().map_or(0, str::len)
        );

        Ok(content)
    }
}
