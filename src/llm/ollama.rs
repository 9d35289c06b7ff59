//! Ollama chat provider implementation

use super::types::{ChatMessage, ChatRequest, ChatResponse, KeepAlive};
use super::{LlmError, LlmService};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Ollama service talking to `POST {host}/api/chat`
pub struct OllamaService {
    client: Client,
    host: String,
    chat_url: String,
}

impl OllamaService {
    pub fn new(host: &str) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            host: host.to_string(),
            chat_url: format!("{}/api/chat", host.trim_end_matches('/')),
        })
    }

    fn translate_request(request: &ChatRequest) -> OllamaChatRequest<'_> {
        let options = if request.temperature.is_some() || request.repeat_penalty.is_some() {
            Some(OllamaOptions {
                temperature: request.temperature,
                repeat_penalty: request.repeat_penalty,
            })
        } else {
            None
        };

        OllamaChatRequest {
            model: &request.model,
            messages: &request.messages,
            keep_alive: request.keep_alive.as_ref(),
            options,
            stream: false,
        }
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> LlmError {
        let message = serde_json::from_str::<OllamaErrorBody>(body)
            .map_or_else(|_| body.trim().to_string(), |parsed| parsed.error);

        if status == reqwest::StatusCode::NOT_FOUND || mentions_missing_model(&message) {
            return LlmError::model_not_found(message);
        }

        match status.as_u16() {
            400 => LlmError::invalid_request(format!("Invalid request: {message}")),
            500..=599 => LlmError::server_error(format!("Server error: {message}")),
            _ => LlmError::unknown(format!("HTTP {status}: {message}")),
        }
    }
}

/// Ollama reports a missing model as "model 'x' not found" or as a failed pull
fn mentions_missing_model(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("model") && (lower.contains("not found") || lower.contains("pull"))
}

#[async_trait]
impl LlmService for OllamaService {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let ollama_request = Self::translate_request(request);

        let response = self
            .client
            .post(&self.chat_url)
            .json(&ollama_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    LlmError::connection(format!("Connection failed: {e}"))
                } else if e.is_timeout() {
                    LlmError::timeout(format!("Request timeout: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::connection(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        let ollama_response: OllamaChatResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::unknown(format!("Failed to parse response: {e} - body: {body}")))?;

        Ok(ChatResponse {
            content: ollama_response.message.and_then(|m| m.content),
        })
    }

    fn host(&self) -> &str {
        &self.host
    }
}

// Ollama API types

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    keep_alive: Option<&'a KeepAlive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repeat_penalty: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: Option<OllamaResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorBody {
    error: String,
}
