//! Error types for giup-git.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during git operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Not inside a git repository.
    #[error("not a git repository")]
    NotARepository,

    /// Branch not found.
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// HEAD is detached (not on a branch).
    #[error("HEAD is detached - checkout a branch first")]
    DetachedHead,

    /// `git switch` exited unsuccessfully.
    #[error("failed to switch to branch '{0}'")]
    SwitchFailed(String),

    /// `git merge` exited unsuccessfully (conflict, unrelated histories, ...).
    #[error("failed to merge branch '{0}'")]
    MergeFailed(String),

    /// Spawning or waiting on a git subprocess failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}
