//! Progress and diagnostic events emitted by the core.
//!
//! The core never writes to the terminal itself; every message goes
//! through a [`Reporter`](crate::Reporter) as one of these events.

use crate::action::RecoveryAction;

/// Something worth telling the operator about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The project file couldn't be read but the overrides cover it.
    ProjectFileSkipped { reason: String },

    /// A branch name failed validation.
    InvalidBranch { name: String, reason: String },

    /// A merge path is about to be followed.
    FollowingPath { index: usize, path: String },

    /// A merge path without branches was skipped.
    EmptyPath { index: usize },

    /// A unit of work is starting.
    UnitStarted { title: String },

    /// A unit of work failed.
    UnitFailed { title: String, message: String },

    /// The recovery menu should be shown.
    RecoveryMenu,

    /// Operator input didn't resolve to exactly one action.
    ///
    /// `matches` is empty for unknown input.
    UnresolvedAction {
        input: String,
        matches: Vec<RecoveryAction>,
    },

    /// The failed unit is being skipped.
    Skipping { title: String },

    /// The failed unit is being run again.
    Rerunning { title: String },

    /// An ad hoc recovery command failed. Never escalated.
    AdHocFailed { command: String, message: String },

    /// The operator aborted the current merge path.
    PathAborted { index: usize },

    /// The operator quit the run.
    RunQuit,

    /// A merge path stopped on a failure.
    PathFailed { index: usize, message: String },

    /// The run stopped because fail-fast mode is on.
    FailFastStop { index: usize },

    /// Switching back to the branch checked out before the run.
    ReturningToBranch { branch: String },

    /// The branch checked out before the run couldn't be determined.
    OriginalBranchUnknown { reason: String },
}
