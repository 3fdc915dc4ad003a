//! Execution of single units of work and interactive failure recovery.
//!
//! A unit is invoked; when it fails the executor either escalates (fail-fast
//! mode) or hands control to the operator until one of the recovery actions
//! resolves the failure:
//!
//! ```text
//! Running --ok--> done
//!    |
//!  failed
//!    v
//! AwaitingInput --rerun--> Retrying --> Running
//!    |  ^   |-----continue--> Skipped --> done
//!    |  |   |-----abort / quit--> signal to the runner
//!    |  +---AdHoc <--execute
//! ```

use giup_git::GitOps;
use tracing::debug;

use crate::action::{RecoveryAction, Resolution};
use crate::command::{Action, Command, ShellCommand};
use crate::error::ExecError;
use crate::event::Event;
use crate::traits::{Operator, Reporter, ShellRunner};

/// Prompt shown when waiting for a recovery action.
pub const ACTION_PROMPT: &str = "?> ";

/// Prompt shown when asking for an ad hoc command.
pub const COMMAND_PROMPT: &str = "$ ";

/// How a unit of work finished without raising a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The unit ran successfully, possibly after reruns.
    Succeeded,
    /// The unit failed and the operator chose to continue.
    Skipped,
}

/// What a line typed at the action prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Abort,
    Skip,
    /// Run an ad hoc command, inline text if it was given.
    Execute(Option<String>),
    Quit,
    Rerun,
    /// Blank input; ask again.
    Ignore,
    /// The action word didn't resolve to exactly one action.
    Unresolved {
        input: String,
        matches: Vec<RecoveryAction>,
    },
}

/// Interpret one line of operator input.
///
/// The first word selects the action; the remainder is only used by
/// `execute`, as the command to run.
#[must_use]
pub fn interpret(line: &str) -> Transition {
    let line = line.trim();
    if line.is_empty() {
        return Transition::Ignore;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, Some(rest.trim())),
        None => (line, None),
    };

    match RecoveryAction::resolve(word) {
        Resolution::Resolved(RecoveryAction::Abort) => Transition::Abort,
        Resolution::Resolved(RecoveryAction::Continue) => Transition::Skip,
        Resolution::Resolved(RecoveryAction::Execute) => Transition::Execute(
            rest.filter(|r| !r.is_empty()).map(String::from),
        ),
        Resolution::Resolved(RecoveryAction::Quit) => Transition::Quit,
        Resolution::Resolved(RecoveryAction::Rerun) => Transition::Rerun,
        Resolution::Unknown => Transition::Unresolved {
            input: word.to_string(),
            matches: Vec::new(),
        },
        Resolution::Ambiguous(matches) => Transition::Unresolved {
            input: word.to_string(),
            matches,
        },
    }
}

enum State {
    Running,
    AwaitingInput,
    Retrying,
    Skipped,
    AdHoc(Option<String>),
}

/// Runs units of work against the git, shell, operator and reporter seams.
pub struct CommandExecutor<'a, G, S, O, R> {
    git: &'a G,
    shell: &'a S,
    operator: &'a O,
    reporter: &'a R,
}

#[allow(clippy::future_not_send)]
impl<'a, G, S, O, R> CommandExecutor<'a, G, S, O, R>
where
    G: GitOps,
    S: ShellRunner,
    O: Operator,
    R: Reporter,
{
    #[must_use]
    pub const fn new(git: &'a G, shell: &'a S, operator: &'a O, reporter: &'a R) -> Self {
        Self {
            git,
            shell,
            operator,
            reporter,
        }
    }

    pub(crate) const fn git(&self) -> &'a G {
        self.git
    }

    pub(crate) const fn reporter(&self) -> &'a R {
        self.reporter
    }

    /// Run one unit of work.
    ///
    /// # Errors
    /// Returns [`ExecError::Fatal`] when the unit fails in fail-fast mode,
    /// [`ExecError::PathAbort`] / [`ExecError::RunQuit`] when the operator
    /// asks for them (end of input counts as quit), and
    /// [`ExecError::Prompt`] when operator input can't be read.
    pub async fn run(&self, command: &Command, fail_on_error: bool) -> Result<Outcome, ExecError> {
        let title = command.to_string();
        if command.title().is_some() {
            self.reporter.report(&Event::UnitStarted {
                title: title.clone(),
            });
        }

        let mut state = State::Running;
        loop {
            state = match state {
                State::Running => match self.invoke(command.action()).await {
                    Ok(()) => return Ok(Outcome::Succeeded),
                    Err(message) => {
                        self.reporter.report(&Event::UnitFailed {
                            title: title.clone(),
                            message: message.clone(),
                        });
                        if fail_on_error {
                            return Err(ExecError::Fatal { title, message });
                        }
                        self.reporter.report(&Event::RecoveryMenu);
                        State::AwaitingInput
                    }
                },
                State::AwaitingInput => {
                    let Some(line) = self.operator.read_line(ACTION_PROMPT).await? else {
                        debug!("operator input closed, quitting");
                        return Err(ExecError::RunQuit);
                    };
                    match interpret(&line) {
                        Transition::Abort => return Err(ExecError::PathAbort),
                        Transition::Quit => return Err(ExecError::RunQuit),
                        Transition::Skip => State::Skipped,
                        Transition::Rerun => State::Retrying,
                        Transition::Execute(inline) => State::AdHoc(inline),
                        Transition::Ignore => State::AwaitingInput,
                        Transition::Unresolved { input, matches } => {
                            self.reporter
                                .report(&Event::UnresolvedAction { input, matches });
                            State::AwaitingInput
                        }
                    }
                }
                State::Retrying => {
                    self.reporter.report(&Event::Rerunning {
                        title: title.clone(),
                    });
                    State::Running
                }
                State::Skipped => {
                    self.reporter.report(&Event::Skipping { title });
                    return Ok(Outcome::Skipped);
                }
                State::AdHoc(inline) => {
                    let text = match inline {
                        Some(text) => text,
                        None => match self.operator.read_line(COMMAND_PROMPT).await? {
                            Some(text) => text,
                            None => return Err(ExecError::RunQuit),
                        },
                    };
                    if !text.trim().is_empty() {
                        self.run_ad_hoc(text.trim()).await;
                        self.reporter.report(&Event::RecoveryMenu);
                    }
                    State::AwaitingInput
                }
            };
        }
    }

    async fn invoke(&self, action: &Action) -> Result<(), String> {
        match action {
            Action::Shell(shell) => match self.shell.run(shell).await {
                Ok(status) if status.success() || shell.ignore_errors => Ok(()),
                Ok(status) => Err(format!("`{}` failed with {status}", shell.text)),
                Err(e) => Err(format!("failed to run `{}`: {e}", shell.text)),
            },
            Action::GitSwitch { branch } => self.git.switch(branch).await.map_err(|e| e.to_string()),
            Action::GitMerge {
                branch,
                edit_message,
            } => self
                .git
                .merge(branch, *edit_message)
                .await
                .map_err(|e| e.to_string()),
        }
    }

    async fn run_ad_hoc(&self, text: &str) {
        let failure = match self.shell.run(&ShellCommand::new(text)).await {
            Ok(status) if status.success() => None,
            Ok(status) => Some(status.to_string()),
            Err(e) => Some(e.to_string()),
        };
        if let Some(message) = failure {
            self.reporter.report(&Event::AdHocFailed {
                command: text.to_string(),
                message,
            });
        }
    }
}
