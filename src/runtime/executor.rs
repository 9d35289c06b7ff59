//! Run executor

use super::traits::{Pacer, Presenter};
use crate::config::RunConfig;
use crate::context::build_context;
use crate::gateway::{GenerationSettings, InferenceGateway};
use crate::llm::LlmService;
use crate::state_machine::{transition, Effect, Event, RunState, TransitionError};
use crate::transcript::TranscriptEntry;
use std::collections::VecDeque;

/// Drives one run to completion over any backend, presenter and pacer
pub struct DuetRuntime<L, P, C>
where
    L: LlmService,
    P: Presenter,
    C: Pacer,
{
    config: RunConfig,
    settings: GenerationSettings,
    state: RunState,
    gateway: InferenceGateway<L>,
    presenter: P,
    pacer: C,
}

impl<L, P, C> DuetRuntime<L, P, C>
where
    L: LlmService,
    P: Presenter,
    C: Pacer,
{
    pub fn new(config: RunConfig, service: L, presenter: P, pacer: C) -> Self {
        Self {
            settings: GenerationSettings::from(&config),
            config,
            state: RunState::new(),
            gateway: InferenceGateway::new(service),
            presenter,
            pacer,
        }
    }

    /// Seed the transcript and run turns until the cap is reached.
    ///
    /// Turns execute strictly one at a time; the final state is returned.
    pub async fn run(mut self, seed: Vec<TranscriptEntry>) -> Result<RunState, TransitionError> {
        tracing::info!(
            agent1 = %self.config.agents[0].name,
            agent2 = %self.config.agents[1].name,
            model = %self.config.model_name,
            max_turns = self.config.max_turns,
            "Starting run"
        );

        // Process events in a loop - no recursion
        let mut pending = VecDeque::from([Event::Seed { entries: seed }]);
        while let Some(event) = pending.pop_front() {
            let result = transition(&self.state, &self.config, event).inspect_err(|e| {
                tracing::error!(error = %e, turn = self.state.turn_count, "Invalid transition");
            })?;
            self.state = result.new_state;

            for effect in result.effects {
                if let Some(next) = self.execute_effect(effect).await {
                    pending.push_back(next);
                }
            }
        }

        Ok(self.state)
    }

    async fn execute_effect(&self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::ShowSeed { entries } => {
                for entry in &entries {
                    self.presenter.show_entry(entry);
                }
                None
            }

            Effect::UnknownOpeningSpeaker {
                speaker,
                opening_agent,
            } => {
                tracing::warn!(
                    speaker = %speaker,
                    opening_agent = %opening_agent,
                    "Last initial message is from neither agent, defaulting to agent 1"
                );
                self.presenter.show_notice(&format!(
                    "Last initial speaker '{speaker}' matches neither agent; {opening_agent} starts."
                ));
                None
            }

            Effect::RequestTurn { agent, turn } => {
                let profile = agent.profile(&self.config.agents);
                let messages = build_context(
                    self.state.transcript.all(),
                    profile,
                    self.config.context_window_size,
                );
                tracing::debug!(
                    turn,
                    agent = %profile.name,
                    context_messages = messages.len(),
                    "Requesting turn"
                );

                self.presenter.show_thinking(&profile.name);
                let text = self.gateway.generate(messages, &self.settings).await;
                self.presenter.clear_thinking();

                Some(Event::TurnComplete { agent, text })
            }

            Effect::ShowTurn { entry } => {
                self.presenter.show_entry(&entry);
                None
            }

            Effect::Pause { delay } => {
                self.pacer.pause(delay).await;
                Some(Event::PauseElapsed)
            }

            Effect::Finish { turns } => {
                tracing::info!(turns, "Run finished");
                self.presenter.show_summary(turns);
                None
            }
        }
    }
}
