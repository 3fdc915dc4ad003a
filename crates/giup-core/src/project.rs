//! The project: merge paths, commands and run policy.

use std::path::Path;

use crate::command::Command;
use crate::config::ProjectFile;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::merge_path::MergePath;
use crate::traits::Reporter;

/// Command line overrides applied while loading a project.
#[derive(Debug, Clone, Default)]
pub struct ProjectOverrides {
    /// Run these commands instead of the configured ones.
    pub commands: Vec<Command>,
    /// Follow these merge paths instead of the configured ones.
    pub merge_paths: Vec<MergePath>,
    /// Don't run any commands.
    pub disable_commands: bool,
    /// Stop the run on the first failing unit.
    pub fail_on_error: bool,
    /// Report invalid branch names as warnings instead of refusing to run.
    pub allow_invalid_branches: bool,
}

impl ProjectOverrides {
    /// Whether the overrides alone describe a runnable project.
    #[must_use]
    pub fn are_complete(&self) -> bool {
        !self.merge_paths.is_empty() && (self.disable_commands || !self.commands.is_empty())
    }
}

/// A validated project, immutable once built.
#[derive(Debug, Clone)]
pub struct Project {
    merge_paths: Vec<MergePath>,
    commands: Vec<Command>,
    fail_on_error: bool,
    abort_on_invalid_branch: bool,
}

impl Project {
    /// Build a project from merge paths and commands.
    ///
    /// # Errors
    /// Returns [`Error::NoMergePaths`] unless at least one path has a branch.
    pub fn new(merge_paths: Vec<MergePath>, commands: Vec<Command>) -> Result<Self> {
        if !merge_paths.iter().any(|p| !p.is_empty()) {
            return Err(Error::NoMergePaths);
        }
        Ok(Self {
            merge_paths,
            commands,
            fail_on_error: false,
            abort_on_invalid_branch: true,
        })
    }

    /// Load a project file and apply command line overrides.
    ///
    /// A missing file is tolerated when the overrides supply both merge
    /// paths and commands (or disable commands); the reporter is told.
    ///
    /// # Errors
    /// Returns error if the file can't be loaded and the overrides are
    /// incomplete, or if the result has no merge path.
    pub fn load<R: Reporter>(
        path: impl AsRef<Path>,
        overrides: ProjectOverrides,
        reporter: &R,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = match ProjectFile::load(path) {
            Ok(file) => file,
            Err(err @ Error::ConfigNotFound { .. }) if overrides.are_complete() => {
                reporter.report(&Event::ProjectFileSkipped {
                    reason: err.to_string(),
                });
                ProjectFile {
                    abort_on_invalid_branch: true,
                    ..ProjectFile::default()
                }
            }
            Err(err) => return Err(err),
        };

        Self::from_file(file, overrides)
    }

    /// Combine parsed project contents with overrides.
    ///
    /// # Errors
    /// Returns [`Error::NoMergePaths`] if neither source has a merge path.
    pub fn from_file(file: ProjectFile, overrides: ProjectOverrides) -> Result<Self> {
        let merge_paths = if overrides.merge_paths.is_empty() {
            file.merge_paths.map(|p| p.0).unwrap_or_default()
        } else {
            overrides.merge_paths
        };

        let commands = if overrides.disable_commands {
            Vec::new()
        } else if !overrides.commands.is_empty() {
            overrides.commands
        } else {
            file.commands.map(|c| c.0).unwrap_or_default()
        };

        let project = Self::new(merge_paths, commands)?
            .with_fail_on_error(overrides.fail_on_error)
            .with_abort_on_invalid_branch(
                file.abort_on_invalid_branch && !overrides.allow_invalid_branches,
            );
        Ok(project)
    }

    /// Set the fail-fast policy. Consumes the project so it can only
    /// happen before a run borrows it.
    #[must_use]
    pub const fn with_fail_on_error(mut self, fail_on_error: bool) -> Self {
        self.fail_on_error = fail_on_error;
        self
    }

    #[must_use]
    pub const fn with_abort_on_invalid_branch(mut self, abort: bool) -> Self {
        self.abort_on_invalid_branch = abort;
        self
    }

    #[must_use]
    pub fn merge_paths(&self) -> &[MergePath] {
        &self.merge_paths
    }

    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    #[must_use]
    pub const fn fail_on_error(&self) -> bool {
        self.fail_on_error
    }

    #[must_use]
    pub const fn abort_on_invalid_branch(&self) -> bool {
        self.abort_on_invalid_branch
    }
}
