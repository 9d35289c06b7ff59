//! Mock implementations for testing
//!
//! These mocks enable running whole conversations without real I/O.

use super::traits::{Pacer, Presenter};
use crate::llm::{ChatRequest, ChatResponse, LlmError, LlmService};
use crate::transcript::TranscriptEntry;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock LLM Service
// ============================================================================

/// Mock LLM service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<ChatResponse, LlmError>>>,
    host: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl MockLlmService {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            host: host.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: ChatResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::unknown("No mock response queued")))
    }

    fn host(&self) -> &str {
        &self.host
    }
}

// ============================================================================
// Recording Presenter
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    Entry(TranscriptEntry),
    Notice(String),
    Thinking(String),
    ClearThinking,
    Summary(u32),
}

/// Presenter that records every call in order
#[derive(Default)]
pub struct RecordingPresenter {
    calls: Mutex<Vec<PresenterCall>>,
}

impl RecordingPresenter {
    pub fn calls(&self) -> Vec<PresenterCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: PresenterCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Presenter for RecordingPresenter {
    fn show_entry(&self, entry: &TranscriptEntry) {
        self.record(PresenterCall::Entry(entry.clone()));
    }

    fn show_notice(&self, message: &str) {
        self.record(PresenterCall::Notice(message.to_string()));
    }

    fn show_thinking(&self, agent: &str) {
        self.record(PresenterCall::Thinking(agent.to_string()));
    }

    fn clear_thinking(&self) {
        self.record(PresenterCall::ClearThinking);
    }

    fn show_summary(&self, turns: u32) {
        self.record(PresenterCall::Summary(turns));
    }
}

// ============================================================================
// Recording Pacer
// ============================================================================

/// Pacer that returns immediately and remembers the requested delays
#[derive(Default)]
pub struct RecordingPacer {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }
}
