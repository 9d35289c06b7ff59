//! Run configuration
//!
//! Loads the JSON configuration file and validates it into an immutable
//! [`RunConfig`] plus the seed transcript entries.

use crate::llm::KeepAlive;
use crate::transcript::TranscriptEntry;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama2";
pub const DEFAULT_MAX_TURNS: u32 = 20;
pub const DEFAULT_CONTEXT_WINDOW_SIZE: usize = 20;
pub const DEFAULT_TURN_DELAY_MS: u64 = 1000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid configuration:\n  - {}", .problems.join("\n  - "))]
    Invalid { problems: Vec<String> },
}

/// One of the two conversational participants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    pub name: String,
    /// Empty when the agent has no system prompt
    pub system_prompt: String,
}

impl AgentProfile {
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
        }
    }
}

/// Immutable settings for a single run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub agents: [AgentProfile; 2],
    pub backend_host: String,
    pub model_name: String,
    pub keep_alive: Option<KeepAlive>,
    pub max_turns: u32,
    pub context_window_size: usize,
    pub temperature: Option<f64>,
    pub repeat_penalty: Option<f64>,
    pub turn_delay: Duration,
}

impl RunConfig {
    /// Config with the default backend settings, for the given pair of agents
    #[allow(dead_code)] // Used in tests
    pub fn with_agents(first: AgentProfile, second: AgentProfile) -> Self {
        Self {
            agents: [first, second],
            backend_host: DEFAULT_OLLAMA_HOST.to_string(),
            model_name: DEFAULT_OLLAMA_MODEL.to_string(),
            keep_alive: None,
            max_turns: DEFAULT_MAX_TURNS,
            context_window_size: DEFAULT_CONTEXT_WINDOW_SIZE,
            temperature: None,
            repeat_penalty: None,
            turn_delay: Duration::from_millis(DEFAULT_TURN_DELAY_MS),
        }
    }
}

/// Validated configuration: run settings plus the seed conversation
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub run: RunConfig,
    pub seed: Vec<TranscriptEntry>,
}

/// Raw configuration file contents, before validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub agent1_name: Option<String>,
    pub agent1_system_prompt: Option<String>,
    pub agent2_name: Option<String>,
    pub agent2_system_prompt: Option<String>,
    pub initial_messages: Option<Vec<InitialMessage>>,
    pub ollama_host: Option<String>,
    pub ollama_model: Option<String>,
    pub keep_alive: Option<KeepAlive>,
    pub max_turns: Option<u32>,
    pub context_window_size: Option<usize>,
    pub temperature: Option<f64>,
    pub repeat_penalty: Option<f64>,
    pub turn_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitialMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

/// Values given on the command line, which take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub ollama_host: Option<String>,
    pub ollama_model: Option<String>,
    pub max_turns: Option<u32>,
    pub turn_delay_ms: Option<u64>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if overrides.ollama_host.is_some() {
            self.ollama_host = overrides.ollama_host;
        }
        if overrides.ollama_model.is_some() {
            self.ollama_model = overrides.ollama_model;
        }
        if overrides.max_turns.is_some() {
            self.max_turns = overrides.max_turns;
        }
        if overrides.turn_delay_ms.is_some() {
            self.turn_delay_ms = overrides.turn_delay_ms;
        }
        self
    }

    /// Check required fields and apply defaults.
    ///
    /// Every problem found is reported, not only the first.
    pub fn validate(self) -> Result<Settings, ConfigError> {
        let mut problems = Vec::new();

        let agent1_name = required_name(self.agent1_name, "agent1Name", &mut problems);
        let agent2_name = required_name(self.agent2_name, "agent2Name", &mut problems);
        if let (Some(first), Some(second)) = (&agent1_name, &agent2_name) {
            if first == second {
                problems.push(format!("agent1Name and agent2Name must differ (both are '{first}')"));
            }
        }

        let seed = match self.initial_messages {
            None => {
                problems.push("initialMessages is required".to_string());
                Vec::new()
            }
            Some(messages) if messages.is_empty() => {
                problems.push("initialMessages must contain at least one message".to_string());
                Vec::new()
            }
            Some(messages) => messages
                .into_iter()
                .enumerate()
                .filter_map(|(i, m)| {
                    if m.name.trim().is_empty() {
                        problems.push(format!("initialMessages[{i}].name must not be empty"));
                        None
                    } else {
                        Some(TranscriptEntry::new(m.name, m.message))
                    }
                })
                .collect(),
        };

        let max_turns = self.max_turns.unwrap_or(DEFAULT_MAX_TURNS);
        if max_turns == 0 {
            problems.push("maxTurns must be greater than 0".to_string());
        }
        let context_window_size = self.context_window_size.unwrap_or(DEFAULT_CONTEXT_WINDOW_SIZE);
        if context_window_size == 0 {
            problems.push("contextWindowSize must be greater than 0".to_string());
        }

        let backend_host = self
            .ollama_host
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string());
        let model_name = self
            .ollama_model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string());

        match (agent1_name, agent2_name) {
            (Some(first), Some(second)) if problems.is_empty() => Ok(Settings {
                run: RunConfig {
                    agents: [
                        AgentProfile::new(first, self.agent1_system_prompt.unwrap_or_default()),
                        AgentProfile::new(second, self.agent2_system_prompt.unwrap_or_default()),
                    ],
                    backend_host,
                    model_name,
                    keep_alive: self.keep_alive,
                    max_turns,
                    context_window_size,
                    temperature: self.temperature,
                    repeat_penalty: self.repeat_penalty,
                    turn_delay: Duration::from_millis(
                        self.turn_delay_ms.unwrap_or(DEFAULT_TURN_DELAY_MS),
                    ),
                },
                seed,
            }),
            _ => Err(ConfigError::Invalid { problems }),
        }
    }
}

fn required_name(value: Option<String>, field: &str, problems: &mut Vec<String>) -> Option<String> {
    match value {
        Some(name) if !name.trim().is_empty() => Some(name),
        Some(_) => {
            problems.push(format!("{field} must not be empty"));
            None
        }
        None => {
            problems.push(format!("{field} is required"));
            None
        }
    }
}
