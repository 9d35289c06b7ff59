//! Inference backend abstraction
//!
//! Provides a common interface for chat completion backends.

mod error;
mod ollama;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use ollama::OllamaService;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for chat completion backends
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a single chat completion request
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError>;

    /// Base URL of the backend, used in diagnostics
    fn host(&self) -> &str;
}

#[async_trait]
impl<T: LlmService + ?Sized> LlmService for Arc<T> {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        (**self).chat(request).await
    }

    fn host(&self) -> &str {
        (**self).host()
    }
}

/// Logging wrapper for LLM services
pub struct LoggingService<S> {
    inner: S,
}

impl<S: LlmService> LoggingService<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: LlmService> LlmService for LoggingService<S> {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.chat(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %request.model,
                    duration_ms = %duration.as_millis(),
                    messages = request.messages.len(),
                    has_content = response.content.is_some(),
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %request.model,
                    host = %self.inner.host(),
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = e.kind.as_str(),
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn host(&self) -> &str {
        self.inner.host()
    }
}
