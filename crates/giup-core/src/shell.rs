//! Shell command execution through the platform shell.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::command::ShellCommand;
use crate::traits::ShellRunner;

/// How a shell command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellStatus {
    code: Option<i32>,
}

impl ShellStatus {
    /// A successful exit.
    pub const SUCCESS: Self = Self { code: Some(0) };

    /// An exit with the given code.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// A process killed before exiting.
    #[must_use]
    pub const fn terminated() -> Self {
        Self { code: None }
    }

    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self.code, Some(0))
    }

    #[must_use]
    pub const fn code(self) -> Option<i32> {
        self.code
    }
}

impl From<std::process::ExitStatus> for ShellStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ShellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Runs commands with `sh -c` (or `cmd /C` on Windows).
///
/// Standard input is always inherited so commands may prompt. Output
/// streams are inherited or discarded according to the command's flags.
#[derive(Debug, Clone, Default)]
pub struct SystemShell {
    workdir: Option<PathBuf>,
}

impl SystemShell {
    /// Run commands in the current directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { workdir: None }
    }

    /// Run commands in `workdir`.
    #[must_use]
    pub fn in_dir(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(workdir.into()),
        }
    }

    fn command(text: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(text);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(text);
            cmd
        }
    }
}

fn stream(show: bool) -> Stdio {
    if show { Stdio::inherit() } else { Stdio::null() }
}

impl ShellRunner for SystemShell {
    async fn run(&self, command: &ShellCommand) -> io::Result<ShellStatus> {
        let mut cmd = Self::command(&command.text);
        cmd.stdin(Stdio::inherit())
            .stdout(stream(command.show_stdout))
            .stderr(stream(command.show_stderr));
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }

        debug!(command = %command.text, "spawning shell command");
        let status = ShellStatus::from(cmd.status().await?);
        debug!(command = %command.text, %status, "shell command finished");
        Ok(status)
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_exit_codes() {
        let shell = SystemShell::new();

        let ok = shell.run(&ShellCommand::new("true")).await.unwrap();
        assert!(ok.success());

        let failed = shell.run(&ShellCommand::new("exit 3")).await.unwrap();
        assert!(!failed.success());
        assert_eq!(failed.code(), Some(3));
        assert_eq!(failed.to_string(), "exit code 3");
    }

    #[tokio::test]
    async fn test_runs_in_workdir() {
        let temp = TempDir::new().unwrap();
        let shell = SystemShell::in_dir(temp.path());

        let mut command = ShellCommand::new("touch marker");
        command.show_stdout = false;
        command.show_stderr = false;
        assert!(shell.run(&command).await.unwrap().success());
        assert!(temp.path().join("marker").exists());
    }

    #[test]
    fn test_status_constructors() {
        assert!(ShellStatus::SUCCESS.success());
        assert!(!ShellStatus::from_code(1).success());
        assert!(!ShellStatus::terminated().success());
        assert_eq!(ShellStatus::terminated().to_string(), "terminated by signal");
    }
}
