//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::transcript::TranscriptEntry;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Output side of a run
pub trait Presenter: Send + Sync {
    /// Render one conversation entry
    fn show_entry(&self, entry: &TranscriptEntry);

    /// Operator-facing notice that is not part of the conversation
    fn show_notice(&self, message: &str);

    /// Transient indicator while `agent`'s request is in flight
    fn show_thinking(&self, agent: &str);

    /// Remove the indicator; always called before the turn is rendered
    fn clear_thinking(&self);

    /// Closing line once the turn cap is reached
    fn show_summary(&self, turns: u32);
}

/// Inter-turn pacing
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

impl<T: Presenter + ?Sized> Presenter for Arc<T> {
    fn show_entry(&self, entry: &TranscriptEntry) {
        (**self).show_entry(entry);
    }

    fn show_notice(&self, message: &str) {
        (**self).show_notice(message);
    }

    fn show_thinking(&self, agent: &str) {
        (**self).show_thinking(agent);
    }

    fn clear_thinking(&self) {
        (**self).clear_thinking();
    }

    fn show_summary(&self, turns: u32) {
        (**self).show_summary(turns);
    }
}

#[async_trait]
impl<T: Pacer + ?Sized> Pacer for Arc<T> {
    async fn pause(&self, delay: Duration) {
        (**self).pause(delay).await;
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Pacer backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
