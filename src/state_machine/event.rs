//! Events that drive a run

use super::state::AgentSlot;
use crate::transcript::TranscriptEntry;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Initial conversation loaded from configuration
    Seed { entries: Vec<TranscriptEntry> },

    /// The acting agent's reply (or placeholder error text) is back
    TurnComplete { agent: AgentSlot, text: String },

    /// The inter-turn delay has passed
    PauseElapsed,
}
