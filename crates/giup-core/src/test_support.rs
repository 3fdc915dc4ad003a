//! Mock implementations for testing the executor, validator and runner.
//!
//! These mocks implement the traits from giup-git and giup-core to enable
//! unit testing without real repositories, shells or terminals.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;

use giup_git::{GitOps, Result as GitResult};

use crate::command::ShellCommand;
use crate::event::Event;
use crate::shell::ShellStatus;
use crate::traits::{Operator, Reporter, ShellRunner};

/// One invocation recorded by [`MockRepo`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Call {
    Switch(String),
    Merge(String, bool),
    Shell(String),
}

impl Call {
    pub fn switch(branch: &str) -> Self {
        Self::Switch(branch.to_string())
    }

    pub fn merge(branch: &str, edit_message: bool) -> Self {
        Self::Merge(branch.to_string(), edit_message)
    }

    pub fn shell(text: &str) -> Self {
        Self::Shell(text.to_string())
    }
}

/// Mock git repository and shell sharing one call journal, so the
/// interleaving of switches, merges and commands can be asserted.
pub struct MockRepo {
    calls: RefCell<Vec<Call>>,
    failures: RefCell<HashMap<Call, u32>>,
    current_branch: RefCell<Option<String>>,
    invalid_names: HashSet<String>,
    broken_names: HashSet<String>,
    ref_checks: RefCell<Vec<String>>,
}

impl Default for MockRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRepo {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(HashMap::new()),
            current_branch: RefCell::new(Some("main".to_string())),
            invalid_names: HashSet::new(),
            broken_names: HashSet::new(),
            ref_checks: RefCell::new(Vec::new()),
        }
    }

    /// Make `call` fail the next `times` times.
    pub fn failing(self, call: Call, times: u32) -> Self {
        self.failures.borrow_mut().insert(call, times);
        self
    }

    pub fn detached(self) -> Self {
        *self.current_branch.borrow_mut() = None;
        self
    }

    /// `check_ref_format` answers `false` for this name.
    pub fn with_invalid_name(mut self, name: &str) -> Self {
        self.invalid_names.insert(name.to_string());
        self
    }

    /// `check_ref_format` itself errors for this name.
    pub fn with_broken_name(mut self, name: &str) -> Self {
        self.broken_names.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn ref_checks(&self) -> Vec<String> {
        self.ref_checks.borrow().clone()
    }

    pub fn current(&self) -> Option<String> {
        self.current_branch.borrow().clone()
    }

    fn record(&self, call: Call) -> bool {
        self.calls.borrow_mut().push(call.clone());
        let mut failures = self.failures.borrow_mut();
        match failures.get_mut(&call) {
            Some(remaining) if *remaining > 0 => {
                *remaining = remaining.saturating_sub(1);
                false
            }
            _ => true,
        }
    }
}

impl GitOps for MockRepo {
    async fn switch(&self, branch: &str) -> GitResult<()> {
        if self.record(Call::switch(branch)) {
            *self.current_branch.borrow_mut() = Some(branch.to_string());
            Ok(())
        } else {
            Err(giup_git::Error::SwitchFailed(branch.to_string()))
        }
    }

    async fn merge(&self, branch: &str, edit_message: bool) -> GitResult<()> {
        if self.record(Call::merge(branch, edit_message)) {
            Ok(())
        } else {
            Err(giup_git::Error::MergeFailed(branch.to_string()))
        }
    }

    async fn current_branch(&self) -> GitResult<String> {
        self.current_branch
            .borrow()
            .clone()
            .ok_or(giup_git::Error::DetachedHead)
    }

    async fn check_ref_format(&self, name: &str) -> GitResult<bool> {
        // Yield once so fanned-out checks genuinely interleave
        tokio::task::yield_now().await;
        self.ref_checks.borrow_mut().push(name.to_string());
        if self.broken_names.contains(name) {
            return Err(giup_git::Error::Io(io::Error::other(format!(
                "git check-ref-format --branch {name} was killed"
            ))));
        }
        Ok(!self.invalid_names.contains(name))
    }
}

impl ShellRunner for MockRepo {
    async fn run(&self, command: &ShellCommand) -> io::Result<ShellStatus> {
        if self.record(Call::shell(&command.text)) {
            Ok(ShellStatus::SUCCESS)
        } else {
            Ok(ShellStatus::from_code(1))
        }
    }
}

/// Operator answering prompts from a fixed script.
///
/// Once the script runs out, input is reported as closed.
pub struct ScriptedOperator {
    answers: RefCell<VecDeque<String>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedOperator {
    pub fn new<const N: usize>(answers: [&str; N]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(ToString::to_string).collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Operator for ScriptedOperator {
    async fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.answers.borrow_mut().pop_front())
    }
}

/// Reporter collecting every event.
#[derive(Default)]
pub struct RecordingReporter {
    events: RefCell<Vec<Event>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
    }
}
