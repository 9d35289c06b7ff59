//! Agent Duet - two local LLM agents talking to each other
//!
//! Reads a seed conversation and settings from a JSON file, then lets two
//! Ollama-backed agents take turns until the turn cap is reached.

mod config;
mod console;
mod context;
mod gateway;
mod llm;
mod runtime;
mod state_machine;
mod transcript;

use clap::{Parser, ValueEnum};
use config::{ConfigFile, Overrides};
use console::ConsolePresenter;
use llm::{LoggingService, OllamaService};
use runtime::{DuetRuntime, TokioPacer};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "agent-duet", version, about = "Let two local LLM agents hold a conversation")]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "DUET_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Ollama server URL (overrides `ollamaHost`)
    #[arg(long, env = "OLLAMA_HOST")]
    host: Option<String>,

    /// Model name (overrides `ollamaModel`)
    #[arg(long)]
    model: Option<String>,

    /// Number of turns to run (overrides `maxTurns`)
    #[arg(long)]
    max_turns: Option<u32>,

    /// Delay between turns in milliseconds (overrides `turnDelayMs`)
    #[arg(long)]
    turn_delay_ms: Option<u64>,

    /// Log output format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "agent_duet=warn".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Configuration
    tracing::info!(path = %cli.config.display(), "Loading configuration");
    let settings = ConfigFile::load(&cli.config)?
        .with_overrides(Overrides {
            ollama_host: cli.host,
            ollama_model: cli.model,
            max_turns: cli.max_turns,
            turn_delay_ms: cli.turn_delay_ms,
        })
        .validate()?;

    let service = LoggingService::new(OllamaService::new(&settings.run.backend_host)?);
    let presenter = ConsolePresenter::new(&settings.run.agents);

    let state = DuetRuntime::new(settings.run, service, presenter, TokioPacer)
        .run(settings.seed)
        .await?;

    tracing::info!(
        turns = state.turn_count,
        entries = state.transcript.len(),
        "Conversation complete"
    );

    Ok(())
}
