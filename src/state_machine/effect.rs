//! Effects produced by state transitions

use super::state::AgentSlot;
use crate::transcript::TranscriptEntry;
use std::time::Duration;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Render the seeded conversation
    ShowSeed { entries: Vec<TranscriptEntry> },

    /// The last seeded speaker is neither agent, so agent 1 opens
    UnknownOpeningSpeaker { speaker: String, opening_agent: String },

    /// Build the agent's context and ask the backend for its reply
    RequestTurn { agent: AgentSlot, turn: u32 },

    /// Render a freshly appended entry
    ShowTurn { entry: TranscriptEntry },

    /// Wait before the next turn
    Pause { delay: Duration },

    /// The turn cap was reached
    Finish { turns: u32 },
}
