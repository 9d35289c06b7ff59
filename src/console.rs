//! Terminal presentation

use crate::config::AgentProfile;
use crate::runtime::Presenter;
use crate::transcript::TranscriptEntry;
use crossterm::cursor::MoveToColumn;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use std::io::{self, IsTerminal, StdoutLock, Write};

/// Prints the conversation to stdout, one colored line per entry
pub struct ConsolePresenter {
    agent_names: [String; 2],
    /// Skip the transient indicator when stdout is not a terminal
    interactive: bool,
}

impl ConsolePresenter {
    pub fn new(agents: &[AgentProfile; 2]) -> Self {
        Self {
            agent_names: [agents[0].name.clone(), agents[1].name.clone()],
            interactive: io::stdout().is_terminal(),
        }
    }

    fn color_for(&self, speaker: &str) -> Color {
        if speaker == self.agent_names[0] {
            Color::Cyan
        } else if speaker == self.agent_names[1] {
            Color::Magenta
        } else {
            Color::Grey
        }
    }

    fn write(&self, f: impl FnOnce(&mut StdoutLock<'static>) -> io::Result<()>) {
        let mut out = io::stdout().lock();
        if let Err(e) = f(&mut out).and_then(|()| out.flush()) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl Presenter for ConsolePresenter {
    fn show_entry(&self, entry: &TranscriptEntry) {
        let color = self.color_for(&entry.speaker);
        self.write(|out| {
            queue!(
                out,
                SetForegroundColor(color),
                SetAttribute(Attribute::Bold),
                Print(&entry.speaker),
                SetAttribute(Attribute::Reset),
                ResetColor,
                Print(": "),
                Print(&entry.text),
                Print("\n\n"),
            )
        });
    }

    fn show_notice(&self, message: &str) {
        self.write(|out| {
            queue!(
                out,
                SetForegroundColor(Color::Yellow),
                Print(message),
                ResetColor,
                Print("\n\n"),
            )
        });
    }

    fn show_thinking(&self, agent: &str) {
        if !self.interactive {
            return;
        }
        let color = self.color_for(agent);
        self.write(|out| {
            queue!(
                out,
                SetForegroundColor(color),
                SetAttribute(Attribute::Italic),
                Print(format!("{agent} is thinking...")),
                SetAttribute(Attribute::Reset),
                ResetColor,
            )
        });
    }

    fn clear_thinking(&self) {
        if !self.interactive {
            return;
        }
        self.write(|out| execute!(out, Clear(ClearType::CurrentLine), MoveToColumn(0)));
    }

    fn show_summary(&self, turns: u32) {
        self.write(|out| {
            queue!(
                out,
                SetAttribute(Attribute::Dim),
                Print(format!("Conversation finished after {turns} turns.\n")),
                SetAttribute(Attribute::Reset),
            )
        });
    }
}
