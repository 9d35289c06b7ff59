//! Property-based tests for the state machine
//!
//! Drives whole runs through the pure transition function, answering every
//! `RequestTurn` with arbitrary text, and checks the run-level invariants.

use super::*;
use crate::config::{AgentProfile, RunConfig};
use crate::transcript::TranscriptEntry;
use proptest::prelude::*;
use std::time::Duration;

fn test_config(max_turns: u32) -> RunConfig {
    let mut config = RunConfig::with_agents(AgentProfile::new("Ann", ""), AgentProfile::new("Bob", ""));
    config.max_turns = max_turns;
    config.turn_delay = Duration::ZERO;
    config
}

fn arb_seed() -> impl Strategy<Value = Vec<TranscriptEntry>> {
    proptest::collection::vec(
        (
            prop_oneof![Just("Ann"), Just("Bob"), Just("Carol")],
            "[a-z ]{0,20}",
        )
            .prop_map(|(speaker, text)| TranscriptEntry::new(speaker, text)),
        1..6,
    )
}

fn arb_reply() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,30}",
        Just("(Error: Could not connect to Ollama server at http://localhost:11434. Is Ollama running?)".to_string()),
    ]
}

/// Agents addressed by `RequestTurn`, in order, plus the final state
fn drive(config: &RunConfig, seed: Vec<TranscriptEntry>, replies: &[String]) -> (Vec<AgentSlot>, RunState) {
    let mut state = RunState::new();
    let mut pending = vec![Event::Seed { entries: seed }];
    let mut requested = Vec::new();
    let mut replies = replies.iter().cycle();

    while let Some(event) = pending.pop() {
        let result = transition(&state, config, event).expect("valid transition");
        state = result.new_state;
        for effect in result.effects {
            match effect {
                Effect::RequestTurn { agent, turn } => {
                    requested.push(agent);
                    assert_eq!(turn as usize, requested.len());
                    let text = replies.next().cloned().unwrap_or_default();
                    pending.push(Event::TurnComplete { agent, text });
                }
                Effect::Pause { .. } => pending.push(Event::PauseElapsed),
                Effect::ShowSeed { .. }
                | Effect::UnknownOpeningSpeaker { .. }
                | Effect::ShowTurn { .. }
                | Effect::Finish { .. } => {}
            }
        }
    }

    (requested, state)
}

proptest! {
    #[test]
    fn prop_appends_exactly_max_turns(
        max_turns in 1u32..30,
        seed in arb_seed(),
        replies in proptest::collection::vec(arb_reply(), 1..5),
    ) {
        let config = test_config(max_turns);
        let seed_len = seed.len();
        let (requested, state) = drive(&config, seed, &replies);

        prop_assert!(state.is_finished());
        prop_assert_eq!(state.turn_count, max_turns);
        prop_assert_eq!(requested.len(), max_turns as usize);
        prop_assert_eq!(state.transcript.len(), seed_len + max_turns as usize);
    }

    #[test]
    fn prop_turns_strictly_alternate(
        max_turns in 2u32..30,
        seed in arb_seed(),
        replies in proptest::collection::vec(arb_reply(), 1..5),
    ) {
        let (requested, state) = drive(&test_config(max_turns), seed.clone(), &replies);

        for pair in requested.windows(2) {
            prop_assert_eq!(pair[1], pair[0].other());
        }

        let appended = &state.transcript.all()[seed.len()..];
        for pair in appended.windows(2) {
            prop_assert_ne!(&pair[0].speaker, &pair[1].speaker);
        }
    }

    #[test]
    fn prop_opening_follows_last_seed_speaker(seed in arb_seed()) {
        let last = seed.last().map(|e| e.speaker.clone()).unwrap_or_default();
        let (requested, _) = drive(&test_config(1), seed, &[String::new()]);

        let expected = if last == "Ann" { AgentSlot::Second } else { AgentSlot::First };
        prop_assert_eq!(requested, vec![expected]);
    }

    #[test]
    fn prop_seed_is_preserved(seed in arb_seed(), max_turns in 1u32..10) {
        let (_, state) = drive(&test_config(max_turns), seed.clone(), &["ok".to_string()]);
        prop_assert_eq!(&state.transcript.all()[..seed.len()], seed.as_slice());
    }
}
