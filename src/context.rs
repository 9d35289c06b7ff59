//! Context window assembly
//!
//! Turns the shared transcript into the message list one agent sends to the
//! backend. The chat protocol only knows "assistant" and "user", so every
//! entry is relabeled from the viewpoint of the agent about to speak.

#[cfg(test)]
mod proptests;

use crate::config::AgentProfile;
use crate::llm::ChatMessage;
use crate::transcript::TranscriptEntry;

/// Build the bounded, role-annotated context for `agent`.
///
/// A non-empty system prompt takes one slot of `window_size`; the rest is
/// filled with the most recent entries. Never returns more than
/// `window_size` messages, so a zero window drops the system prompt too.
pub fn build_context(
    history: &[TranscriptEntry],
    agent: &AgentProfile,
    window_size: usize,
) -> Vec<ChatMessage> {
    let has_system = !agent.system_prompt.is_empty() && window_size > 0;
    let budget = window_size.saturating_sub(usize::from(has_system));

    let mut messages = Vec::with_capacity(budget + usize::from(has_system));
    if has_system {
        messages.push(ChatMessage::system(agent.system_prompt.clone()));
    }

    messages.extend(trim_history(history, budget).iter().map(|entry| {
        if entry.speaker == agent.name {
            ChatMessage::assistant(entry.text.clone())
        } else {
            ChatMessage::user(entry.text.clone())
        }
    }));

    messages
}

/// Last `limit` entries, oldest dropped first
pub fn trim_history(history: &[TranscriptEntry], limit: usize) -> &[TranscriptEntry] {
    &history[history.len().saturating_sub(limit)..]
}
