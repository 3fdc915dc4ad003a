//! # giup-core
//!
//! Core library for giup: the project model, the recovery state machine
//! that wraps every unit of work, concurrent branch name validation and the
//! merge path runner.

pub mod action;
pub mod branch_name;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod executor;
pub mod merge_path;
pub mod project;
pub mod runner;
pub mod shell;
pub mod traits;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use action::{RecoveryAction, Resolution};
pub use command::{Action, Command, ShellCommand};
pub use config::{DEFAULT_PROJECT_FILE, ProjectFile};
pub use error::{Error, ExecError, Result};
pub use event::Event;
pub use executor::{CommandExecutor, Outcome};
pub use merge_path::MergePath;
pub use project::{Project, ProjectOverrides};
pub use runner::{MergePathRunner, RunOptions, RunSummary};
pub use shell::{ShellStatus, SystemShell};
pub use traits::{Operator, Reporter, ShellRunner};
pub use validate::{BranchCheck, validate_project};
