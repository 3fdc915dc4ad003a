//! Command line definition and command implementations.

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;
use giup_core::DEFAULT_PROJECT_FILE;

pub mod completions;
pub mod run;
pub mod utils;

/// giup - Git Interactive Update and Publish.
///
/// Interactively merge branches along merge paths and run your project's
/// commands after every step.
#[derive(Debug, Parser)]
#[command(name = "giup", version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// The project configuration to use.
    #[arg(default_value = DEFAULT_PROJECT_FILE)]
    pub project: PathBuf,

    /// Quit the run on the first error.
    #[arg(short, long)]
    pub fail: bool,

    /// Run these commands instead of the configured ones.
    #[arg(short = 'R', long = "run-command", value_name = "COMMAND")]
    pub run_commands: Vec<String>,

    /// Follow these merge paths (`a->b->c`) instead of the configured ones.
    #[arg(short = 'P', long = "merge-path", value_name = "PATH")]
    pub merge_paths: Vec<String>,

    /// Don't run any commands.
    #[arg(long)]
    pub no_commands: bool,

    /// Don't return to the original branch after running.
    #[arg(long)]
    pub no_return: bool,

    /// Edit the merge commit messages.
    #[arg(short, long)]
    pub edit_commit_message: bool,

    /// Run even if some branch names are invalid.
    #[arg(long)]
    pub allow_invalid_branches: bool,

    /// Show what would be run without running anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Only print errors and recovery prompts.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print debug logs (overridden by `GIUP_LOG`).
    #[arg(short, long)]
    pub verbose: bool,

    /// Print shell completions and exit.
    #[arg(long, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,
}
