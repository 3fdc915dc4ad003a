//! Terminal implementations of the operator and reporter seams.

use std::io::{self, IsTerminal};

use giup_core::{Event, Operator, RecoveryAction, Reporter};
use inquire::error::InquireResult;
use inquire::ui::{RenderConfig, Styled};
use inquire::{InquireError, Text};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::output;

/// Reads recovery answers from standard input, prompting on stderr.
///
/// A terminal gets a line editor; piped input is read line by line so
/// scripted answers keep working.
pub struct TerminalOperator {
    input: Input,
}

enum Input {
    Editor,
    Piped(Mutex<Lines<BufReader<Stdin>>>),
}

impl TerminalOperator {
    pub fn new() -> Self {
        let input = if io::stdin().is_terminal() {
            Input::Editor
        } else {
            Input::Piped(Mutex::new(BufReader::new(tokio::io::stdin()).lines()))
        };
        Self { input }
    }
}

impl Default for TerminalOperator {
    fn default() -> Self {
        Self::new()
    }
}

impl Operator for TerminalOperator {
    async fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        match &self.input {
            Input::Editor => {
                let message = prompt.trim_end().to_string();
                let answer = tokio::task::spawn_blocking(move || {
                    Text::new(&message)
                        .with_render_config(editor_style())
                        .prompt()
                })
                .await
                .map_err(io::Error::other)?;
                edited_line(answer)
            }
            Input::Piped(lines) => {
                output::prompt(prompt);
                lines.lock().await.next_line().await
            }
        }
    }
}

fn editor_style() -> RenderConfig<'static> {
    RenderConfig::default()
        .with_prompt_prefix(Styled::new(""))
        .with_answered_prompt_prefix(Styled::new(""))
}

/// Map a line editor answer onto the operator protocol.
///
/// Esc and Ctrl-C end the input, like closing a pipe.
fn edited_line(answer: InquireResult<String>) -> io::Result<Option<String>> {
    match answer {
        Ok(line) => Ok(Some(line)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(InquireError::IO(e)) => Err(e),
        Err(other) => Err(io::Error::other(other)),
    }
}

/// How an event is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Info,
    Step,
    Success,
    Warn,
    Error,
    Notice,
    Menu,
}

/// Renders core events through [`output`].
pub struct TerminalReporter;

impl TerminalReporter {
    fn render(event: &Event) -> (Style, String) {
        match event {
            Event::ProjectFileSkipped { reason } => (Style::Warn, reason.clone()),
            Event::InvalidBranch { name, reason } => (
                Style::Error,
                format!("Invalid branch name \"{name}\": {reason}"),
            ),
            Event::FollowingPath { index, path } => (
                Style::Info,
                format!("Following merge path #{index}: {path}"),
            ),
            Event::EmptyPath { index } => (
                Style::Warn,
                format!("Merge path #{index} is empty, skipping"),
            ),
            Event::UnitStarted { title } => (Style::Step, title.clone()),
            Event::UnitFailed { title, message } => (
                Style::Error,
                format!("Failed to complete \"{title}\": {message}"),
            ),
            Event::RecoveryMenu => (
                Style::Menu,
                format!("Specify action ({})", RecoveryAction::MENU),
            ),
            Event::UnresolvedAction { input, matches } if matches.is_empty() => (
                Style::Menu,
                format!(
                    "Unknown option \"{input}\"! (Available actions: {})",
                    RecoveryAction::MENU
                ),
            ),
            Event::UnresolvedAction { input, matches } => (
                Style::Menu,
                format!(
                    "Ambiguous option \"{input}\", could be: {}",
                    matches
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ),
            Event::Skipping { title } => (Style::Notice, format!("Skipping {title}")),
            Event::Rerunning { title } => (Style::Notice, format!("Rerunning: {title}")),
            Event::AdHocFailed { command, message } => (
                Style::Warn,
                format!("Command \"{command}\" failed: {message}"),
            ),
            Event::PathAborted { index } => (
                Style::Notice,
                format!("Aborting merge path #{index}!"),
            ),
            Event::RunQuit => (
                Style::Notice,
                "Quitting giup (cancelling all further paths)".to_string(),
            ),
            Event::PathFailed { index, message } => (
                Style::Error,
                format!("Failed to follow merge path #{index}: {message}"),
            ),
            Event::FailFastStop { index } => (
                Style::Error,
                format!("Stopping after merge path #{index} failed"),
            ),
            Event::ReturningToBranch { branch } => (
                Style::Success,
                format!("Returning to original branch \"{branch}\""),
            ),
            Event::OriginalBranchUnknown { reason } => (
                Style::Warn,
                format!("Won't return to the original branch: {reason}"),
            ),
        }
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, event: &Event) {
        let (style, text) = Self::render(event);
        match style {
            Style::Info => output::info(&text),
            Style::Step => output::step(&text),
            Style::Success => output::success(&text),
            Style::Warn => output::warn(&text),
            Style::Error => output::error(&text),
            Style::Notice => output::notice(&text),
            Style::Menu => output::menu(&text),
        }
    }
}
