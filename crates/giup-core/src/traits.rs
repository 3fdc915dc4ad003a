//! Trait abstractions for the core's collaborators.
//!
//! The executor and runner only talk to the outside world through these
//! traits (plus [`giup_git::GitOps`]), enabling dependency injection and
//! testability.

use std::future::Future;
use std::io;

use crate::command::ShellCommand;
use crate::event::Event;
use crate::shell::ShellStatus;

/// Runs shell command lines.
pub trait ShellRunner {
    /// Run `command` to completion.
    ///
    /// Only spawning failures are errors; a non-zero exit is reported
    /// through the returned status.
    fn run(&self, command: &ShellCommand) -> impl Future<Output = io::Result<ShellStatus>>;
}

/// The person answering recovery prompts.
pub trait Operator {
    /// Show `prompt` and read one line, without the line terminator.
    ///
    /// Returns `None` once input is exhausted.
    fn read_line(&self, prompt: &str) -> impl Future<Output = io::Result<Option<String>>>;
}

/// Receives progress and diagnostic events.
pub trait Reporter {
    fn report(&self, event: &Event);
}

