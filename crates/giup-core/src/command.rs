//! Units of work: project commands and the git steps of a merge path.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// A shell command line together with its error and output policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    /// Command text handed to the platform shell.
    pub text: String,
    /// Treat a non-zero exit status as success.
    pub ignore_errors: bool,
    /// Forward the command's standard output.
    pub show_stdout: bool,
    /// Forward the command's standard error.
    pub show_stderr: bool,
}

impl ShellCommand {
    /// A command with default policy: errors propagate, both streams shown.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ignore_errors: false,
            show_stdout: true,
            show_stderr: true,
        }
    }
}

/// What a unit of work does when invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run a shell command.
    Shell(ShellCommand),
    /// Switch the working tree to a branch.
    GitSwitch { branch: String },
    /// Merge a branch into the current one.
    GitMerge { branch: String, edit_message: bool },
}

/// A titled unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    action: Action,
    title: Option<String>,
}

impl Command {
    /// Wrap an action without a title.
    #[must_use]
    pub const fn new(action: Action) -> Self {
        Self {
            action,
            title: None,
        }
    }

    /// A shell command titled after its text.
    #[must_use]
    pub fn shell(text: impl Into<String>) -> Self {
        Self::from_shell(ShellCommand::new(text), None)
    }

    fn from_shell(shell: ShellCommand, title: Option<String>) -> Self {
        let title = title.unwrap_or_else(|| format!("Running command \"{}\"", shell.text));
        Self::new(Action::Shell(shell)).with_title(title)
    }

    /// Switch to `branch`.
    #[must_use]
    pub fn switch(branch: impl Into<String>) -> Self {
        let branch = branch.into();
        let title = format!("Switching to branch \"{branch}\"");
        Self::new(Action::GitSwitch { branch }).with_title(title)
    }

    /// Merge `parent` into the current branch.
    #[must_use]
    pub fn merge(parent: impl Into<String>, edit_message: bool) -> Self {
        let branch = parent.into();
        let title = format!("Merging parent branch \"{branch}\"");
        Self::new(Action::GitMerge {
            branch,
            edit_message,
        })
        .with_title(title)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub const fn action(&self) -> &Action {
        &self.action
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            return f.write_str(title);
        }
        match &self.action {
            Action::Shell(shell) => write!(f, "$ {}", shell.text),
            Action::GitSwitch { branch } => write!(f, "git switch {branch}"),
            Action::GitMerge { branch, .. } => write!(f, "git merge {branch}"),
        }
    }
}

/// `run` may be a plain command line or one line per platform.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RunSpec {
    Text(String),
    PerPlatform(BTreeMap<String, String>),
}

impl RunSpec {
    fn resolve(self) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::PerPlatform(mut variants) => platform_keys()
                .into_iter()
                .find_map(|key| variants.remove(key))
                .ok_or_else(|| {
                    Error::InvalidCommand(format!(
                        "no run command for this platform (have: {})",
                        variants.keys().cloned().collect::<Vec<_>>().join(", ")
                    ))
                }),
        }
    }
}

/// Platform keys in lookup order.
fn platform_keys() -> [&'static str; 4] {
    let legacy = if cfg!(windows) { "nt" } else { "posix" };
    [
        std::env::consts::OS,
        std::env::consts::FAMILY,
        legacy,
        "default",
    ]
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct DetailedCommand {
    #[serde(default)]
    run: Option<RunSpec>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    ignore_errors: bool,
    #[serde(default = "default_true")]
    stdout: bool,
    #[serde(default = "default_true")]
    stderr: bool,
    /// Remaining keys; platform names here win over `run`.
    #[serde(flatten)]
    platforms: BTreeMap<String, Value>,
}

const fn default_true() -> bool {
    true
}

impl DetailedCommand {
    fn text(&mut self) -> Result<String> {
        let platforms = &mut self.platforms;
        if let Some(value) = platform_keys()
            .into_iter()
            .find_map(|key| platforms.remove(key))
        {
            return match value {
                Value::String(text) => Ok(text),
                other => Err(Error::InvalidCommand(format!(
                    "platform command must be a string, got {other}"
                ))),
            };
        }

        self.run
            .take()
            .ok_or_else(|| Error::InvalidCommand("no run command found".to_string()))?
            .resolve()
    }
}

impl Command {
    /// Build a command from one parsed `commands` entry.
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Self::shell(text)),
            Value::Object(_) => {
                let mut detailed = DetailedCommand::deserialize(value)
                    .map_err(|e| Error::InvalidCommand(e.to_string()))?;
                let shell = ShellCommand {
                    text: detailed.text()?,
                    ignore_errors: detailed.ignore_errors,
                    show_stdout: detailed.stdout,
                    show_stderr: detailed.stderr,
                };
                Ok(Self::from_shell(shell, detailed.title))
            }
            other => Err(Error::InvalidCommand(format!(
                "expected a command line or a command object, got {other}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::from_value(Value::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}

/// The `commands` value: a single command or a list of commands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commands(pub Vec<Command>);

impl<'de> Deserialize<'de> for Commands {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Each entry is converted on its own so its error reaches the caller
        let commands = match Value::deserialize(deserializer)? {
            Value::Array(entries) => entries
                .into_iter()
                .map(Command::from_value)
                .collect::<Result<Vec<_>>>(),
            single => Command::from_value(single).map(|command| vec![command]),
        };
        commands.map(Self).map_err(serde::de::Error::custom)
    }
}
