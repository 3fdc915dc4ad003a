//! Repository wrapper providing the git operations a merge run needs.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::GitOps;

/// High-level wrapper around a git repository.
///
/// Read-only queries go through git2. Operations that mutate the working
/// tree run the `git` binary so hooks, the merge message editor and the
/// user's git configuration behave exactly as on the command line.
pub struct Repository {
    inner: git2::Repository,
    workdir: PathBuf,
}

impl Repository {
    /// Open a repository at the given path.
    ///
    /// # Errors
    /// Returns error if no repository found at path or any parent, or if
    /// the repository is bare.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                Error::NotARepository
            } else {
                Error::Git2(e)
            }
        })?;
        let workdir = inner
            .workdir()
            .map(Path::to_path_buf)
            .ok_or(Error::NotARepository)?;
        Ok(Self { inner, workdir })
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if not inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(".")
    }

    /// Get the path to the repository root.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Get the path to the .git directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Check if a local branch exists.
    #[must_use]
    pub fn branch_exists(&self, name: &str) -> bool {
        self.inner
            .find_branch(name, git2::BranchType::Local)
            .is_ok()
    }

    /// Check if any remote has a branch called `name`.
    #[must_use]
    pub fn remote_branch_exists(&self, name: &str) -> bool {
        let Ok(branches) = self.inner.branches(Some(git2::BranchType::Remote)) else {
            return false;
        };
        branches.flatten().any(|(branch, _)| {
            branch
                .name()
                .ok()
                .flatten()
                .and_then(|full| full.split_once('/'))
                .is_some_and(|(_, short)| short == name)
        })
    }

    /// Get the name of the current branch.
    ///
    /// # Errors
    /// Returns error if HEAD is detached.
    pub fn head_branch(&self) -> Result<String> {
        let head = self.inner.head()?;
        if !head.is_branch() {
            return Err(Error::DetachedHead);
        }

        head.shorthand()
            .map(String::from)
            .ok_or(Error::DetachedHead)
    }

    async fn git(&self, args: &[&str], quiet: bool) -> Result<ExitStatus> {
        debug!(?args, workdir = %self.workdir.display(), "running git");
        let mut command = Command::new("git");
        command.args(args).current_dir(&self.workdir);
        if quiet {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }
        let status = command.status().await?;
        debug!(?args, %status, "git finished");
        Ok(status)
    }
}

impl GitOps for Repository {
    async fn switch(&self, branch: &str) -> Result<()> {
        // git creates a local tracking branch for remote-only names
        let status = self.git(&["switch", "--quiet", branch], false).await?;
        if status.success() {
            Ok(())
        } else if self.branch_exists(branch) || self.remote_branch_exists(branch) {
            Err(Error::SwitchFailed(branch.to_string()))
        } else {
            Err(Error::BranchNotFound(branch.to_string()))
        }
    }

    async fn merge(&self, branch: &str, edit_message: bool) -> Result<()> {
        let edit = if edit_message { "--edit" } else { "--no-edit" };
        let status = self.git(&["merge", edit, "--", branch], false).await?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::MergeFailed(branch.to_string()))
        }
    }

    async fn current_branch(&self) -> Result<String> {
        self.head_branch()
    }

    async fn check_ref_format(&self, name: &str) -> Result<bool> {
        let status = self
            .git(&["check-ref-format", "--branch", name], true)
            .await?;
        Ok(status.success())
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.git_dir())
            .finish()
    }
}
