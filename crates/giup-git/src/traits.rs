//! Trait abstractions for git operations.
//!
//! This module defines the `GitOps` trait which abstracts the git primitives
//! a merge run needs, enabling dependency injection and testability.

use std::future::Future;

use crate::Result;

/// Trait for the git operations used while following merge paths.
///
/// This trait abstracts git operations, allowing for:
/// - Dependency injection in the runner and executor
/// - Mock implementations for testing
/// - Alternative implementations (e.g., dry-run mode)
///
/// Switching and merging touch the working tree, so callers must never have
/// two of those futures in flight at once. `check_ref_format` is side-effect
/// free and may be awaited concurrently.
#[allow(clippy::missing_errors_doc)]
pub trait GitOps {
    /// Switch the working tree to `branch`.
    ///
    /// Fails if the branch does not exist or the checkout fails.
    fn switch(&self, branch: &str) -> impl Future<Output = Result<()>>;

    /// Merge `branch` into the currently checked out branch.
    ///
    /// With `edit_message` the merge commit message editor is opened,
    /// otherwise the default message is used.
    fn merge(&self, branch: &str, edit_message: bool) -> impl Future<Output = Result<()>>;

    /// Get the current branch name.
    ///
    /// Returns an error if HEAD is detached or not on a branch.
    fn current_branch(&self) -> impl Future<Output = Result<String>>;

    /// Check whether `name` is a syntactically valid branch name.
    fn check_ref_format(&self, name: &str) -> impl Future<Output = Result<bool>>;
}
