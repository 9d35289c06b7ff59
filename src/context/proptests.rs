//! Property-based tests for context window assembly

use super::*;
use crate::llm::ChatRole;
use proptest::prelude::*;

fn arb_entry() -> impl Strategy<Value = TranscriptEntry> {
    (
        prop_oneof![Just("Ann"), Just("Bob"), Just("Narrator")],
        "[a-zA-Z0-9 .!?]{0,40}",
    )
        .prop_map(|(speaker, text)| TranscriptEntry::new(speaker, text))
}

fn arb_history() -> impl Strategy<Value = Vec<TranscriptEntry>> {
    proptest::collection::vec(arb_entry(), 0..40)
}

fn arb_agent() -> impl Strategy<Value = AgentProfile> {
    (
        prop_oneof![Just("Ann"), Just("Bob")],
        prop_oneof![Just(String::new()), "[a-zA-Z ]{1,30}"],
    )
        .prop_map(|(name, prompt)| AgentProfile::new(name, prompt))
}

proptest! {
    #[test]
    fn prop_never_exceeds_window(history in arb_history(), agent in arb_agent(), window in 0usize..50) {
        let messages = build_context(&history, &agent, window);
        prop_assert!(messages.len() <= window);
    }

    #[test]
    fn prop_short_history_is_complete(history in arb_history(), agent in arb_agent(), extra in 0usize..10) {
        let system_slots = usize::from(!agent.system_prompt.is_empty());
        let window = history.len() + system_slots + extra;

        let messages = build_context(&history, &agent, window);
        let body = &messages[system_slots..];

        prop_assert_eq!(body.len(), history.len());
        for (message, entry) in body.iter().zip(&history) {
            prop_assert_eq!(&message.content, &entry.text);
        }
    }

    #[test]
    fn prop_roles_are_viewpoint_relative(history in arb_history(), agent in arb_agent(), window in 1usize..50) {
        let messages = build_context(&history, &agent, window);
        let kept = messages.iter().filter(|m| m.role != ChatRole::System).count();
        let tail = &history[history.len() - kept..];

        for (message, entry) in messages.iter().filter(|m| m.role != ChatRole::System).zip(tail) {
            let expected = if entry.speaker == agent.name { ChatRole::Assistant } else { ChatRole::User };
            prop_assert_eq!(message.role, expected);
        }
    }

    #[test]
    fn prop_system_prompt_leads(history in arb_history(), agent in arb_agent(), window in 1usize..50) {
        let messages = build_context(&history, &agent, window);
        let systems: Vec<_> = messages.iter().enumerate().filter(|(_, m)| m.role == ChatRole::System).collect();

        if agent.system_prompt.is_empty() {
            prop_assert!(systems.is_empty());
        } else {
            prop_assert_eq!(systems.len(), 1);
            prop_assert_eq!(systems[0].0, 0);
        }
    }

    #[test]
    fn prop_trim_is_idempotent(history in arb_history(), limit in 0usize..50) {
        let once = trim_history(&history, limit);
        let twice = trim_history(once, limit);
        prop_assert_eq!(once, twice);
        prop_assert!(once.len() <= limit);
    }
}
