//! Inference gateway
//!
//! Issues one chat request per turn and always hands back displayable text.
//! Backend failures become placeholder strings that stand in for the
//! agent's reply, so a failed turn never aborts the run.

use crate::config::RunConfig;
use crate::llm::{ChatMessage, ChatRequest, KeepAlive, LlmError, LlmErrorKind, LlmService};

pub const NO_CONTENT_FALLBACK: &str = "No valid content received from the Ollama model.";

/// Decoding settings passed through to every request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub keep_alive: Option<KeepAlive>,
    pub temperature: Option<f64>,
    pub repeat_penalty: Option<f64>,
}

impl From<&RunConfig> for GenerationSettings {
    fn from(config: &RunConfig) -> Self {
        Self {
            model: config.model_name.clone(),
            keep_alive: config.keep_alive.clone(),
            temperature: config.temperature,
            repeat_penalty: config.repeat_penalty,
        }
    }
}

pub struct InferenceGateway<L> {
    service: L,
}

impl<L: LlmService> InferenceGateway<L> {
    pub fn new(service: L) -> Self {
        Self { service }
    }

    /// Single attempt, no retries.
    pub async fn generate(&self, messages: Vec<ChatMessage>, settings: &GenerationSettings) -> String {
        let request = ChatRequest {
            model: settings.model.clone(),
            messages,
            keep_alive: settings.keep_alive.clone(),
            temperature: settings.temperature,
            repeat_penalty: settings.repeat_penalty,
        };

        match self.service.chat(&request).await {
            Ok(response) => response
                .content
                .map_or_else(|| NO_CONTENT_FALLBACK.to_string(), |text| text.trim().to_string()),
            Err(e) => self.describe_failure(&e, &settings.model),
        }
    }

    fn describe_failure(&self, error: &LlmError, model: &str) -> String {
        match error.kind {
            LlmErrorKind::Connection => format!(
                "(Error: Could not connect to Ollama server at {}. Is Ollama running?)",
                self.service.host()
            ),
            LlmErrorKind::ModelNotFound => format!(
                "(Error: Ollama model '{model}' not found. Did you run 'ollama run {model}'?)"
            ),
            _ => format!("(Error: Could not generate response - {})", error.message),
        }
    }
}
