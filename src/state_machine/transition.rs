//! Pure state transition function
//!
//! Seeding -> Running -> Finished. Every turn is one `RequestTurn` effect
//! answered by exactly one `TurnComplete` event; agents strictly alternate
//! whatever text comes back.

use super::{AgentSlot, Effect, Event, Phase, RunState, TurnStep};
use crate::config::RunConfig;
use crate::transcript::TranscriptEntry;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: RunState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: RunState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Cannot start a run without at least one initial message")]
    EmptySeed,
    #[error("Reply from {actual:?} while {expected:?} is acting")]
    WrongAgent {
        expected: AgentSlot,
        actual: AgentSlot,
    },
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(
    state: &RunState,
    config: &RunConfig,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state.phase, event) {
        // ============================================================
        // Seeding
        // ============================================================
        (Phase::Seeding, Event::Seed { entries }) => {
            let Some(last) = entries.last() else {
                return Err(TransitionError::EmptySeed);
            };
            let (opening, matched) = AgentSlot::opening(&last.speaker, &config.agents);
            let fallback = (!matched).then(|| Effect::UnknownOpeningSpeaker {
                speaker: last.speaker.clone(),
                opening_agent: opening.profile(&config.agents).name.clone(),
            });

            let mut next = state.clone();
            next.next_agent = opening;
            for entry in &entries {
                next.transcript.append(entry.clone());
            }

            let mut result = begin_turn(next, config);
            let mut effects = vec![Effect::ShowSeed { entries }];
            effects.extend(fallback);
            effects.append(&mut result.effects);
            result.effects = effects;
            Ok(result)
        }

        // ============================================================
        // Running
        // ============================================================
        (Phase::Running(TurnStep::AwaitingReply), Event::TurnComplete { agent, text }) => {
            if agent != state.next_agent {
                return Err(TransitionError::WrongAgent {
                    expected: state.next_agent,
                    actual: agent,
                });
            }

            let entry = TranscriptEntry::new(agent.profile(&config.agents).name.clone(), text);
            let mut next = state.clone();
            next.transcript.append(entry.clone());
            next.next_agent = agent.other();
            next.phase = Phase::Running(TurnStep::Pausing);

            Ok(TransitionResult::new(next)
                .with_effect(Effect::ShowTurn { entry })
                .with_effect(Effect::Pause {
                    delay: config.turn_delay,
                }))
        }

        (Phase::Running(TurnStep::Pausing), Event::PauseElapsed) => {
            Ok(begin_turn(state.clone(), config))
        }

        // ============================================================
        // Everything else is a sequencing bug
        // ============================================================
        (Phase::Finished, event) => Err(TransitionError::InvalidTransition(format!(
            "run already finished, got {event:?}"
        ))),

        (phase, event) => Err(TransitionError::InvalidTransition(format!(
            "{event:?} in {phase:?}"
        ))),
    }
}

/// Start the next turn, or finish once the cap is reached
fn begin_turn(mut state: RunState, config: &RunConfig) -> TransitionResult {
    if state.turn_count >= config.max_turns {
        let turns = state.turn_count;
        state.phase = Phase::Finished;
        return TransitionResult::new(state).with_effect(Effect::Finish { turns });
    }

    state.turn_count += 1;
    state.phase = Phase::Running(TurnStep::AwaitingReply);
    let effect = Effect::RequestTurn {
        agent: state.next_agent,
        turn: state.turn_count,
    };
    TransitionResult::new(state).with_effect(effect)
}
