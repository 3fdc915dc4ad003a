//! Error types for giup-core.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or validating a project.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The project file could not be read.
    #[error("couldn't load project file {}: {source}", path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The project file is structurally invalid.
    #[error("failed to parse {}: {message}", file.display())]
    ConfigParse { file: PathBuf, message: String },

    /// No merge path was configured or given on the command line.
    #[error("no valid merge paths found")]
    NoMergePaths,

    /// A merge path without any branch.
    #[error("merge path must not be empty: {0:?}")]
    EmptyMergePath(String),

    /// A merge path entry has the wrong shape.
    #[error("invalid merge path: {0}")]
    InvalidMergePath(String),

    /// A command entry could not be understood.
    #[error("invalid command definition: {0}")]
    InvalidCommand(String),

    /// Branch names rejected by git while `abort-on-invalid-branch` is set.
    #[error("invalid branch name(s): {}", .0.join(", "))]
    InvalidBranchNames(Vec<String>),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Git operation error.
    #[error("git error: {0}")]
    Git(#[from] giup_git::Error),
}

/// Signals raised while executing a single unit of work.
///
/// `PathAbort` and `RunQuit` are operator requests and are consumed by the
/// merge path runner. `Fatal` is a failure escalated by fail-fast mode.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The operator asked to abandon the current merge path.
    #[error("merge path aborted by operator")]
    PathAbort,

    /// The operator asked to stop the whole run.
    #[error("run quit by operator")]
    RunQuit,

    /// The unit failed and recovery was not attempted.
    #[error("command failed: {title}: {message}")]
    Fatal { title: String, message: String },

    /// Reading operator input failed.
    #[error("failed to read operator input: {0}")]
    Prompt(#[from] std::io::Error),
}
