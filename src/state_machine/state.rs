//! Run state types

use crate::config::AgentProfile;
use crate::transcript::Transcript;

/// Which of the two configured agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentSlot {
    First,
    Second,
}

impl AgentSlot {
    /// Position in `RunConfig::agents`
    pub fn index(self) -> usize {
        match self {
            AgentSlot::First => 0,
            AgentSlot::Second => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            AgentSlot::First => AgentSlot::Second,
            AgentSlot::Second => AgentSlot::First,
        }
    }

    pub fn profile(self, agents: &[AgentProfile; 2]) -> &AgentProfile {
        &agents[self.index()]
    }

    /// Decide who speaks first from the last seeded speaker.
    ///
    /// Returns the opening slot and whether the speaker matched an agent.
    /// An unknown speaker falls back to the first agent.
    pub fn opening(last_speaker: &str, agents: &[AgentProfile; 2]) -> (Self, bool) {
        if last_speaker == agents[0].name {
            (AgentSlot::Second, true)
        } else if last_speaker == agents[1].name {
            (AgentSlot::First, true)
        } else {
            (AgentSlot::First, false)
        }
    }
}

/// Where a running turn currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStep {
    /// Backend request in flight for `RunState::next_agent`
    AwaitingReply,
    /// Between turns
    Pausing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Seeding,
    Running(TurnStep),
    Finished,
}

/// Complete state of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub phase: Phase,
    pub transcript: Transcript,
    /// Turns started so far, including one in flight
    pub turn_count: u32,
    /// Agent acting in the current turn, or the next one while pausing
    pub next_agent: AgentSlot,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Seeding,
            transcript: Transcript::new(),
            turn_count: 0,
            next_agent: AgentSlot::First,
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
