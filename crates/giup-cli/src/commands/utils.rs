use anyhow::{Context, Result};
use giup_core::{Command, MergePath, ProjectOverrides};
use giup_git::Repository;

use super::Cli;

/// Helper to open the repository containing the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current().context("Not inside a git repository")
}

/// Collect the project overrides given on the command line.
pub fn overrides(cli: &Cli) -> Result<ProjectOverrides> {
    let merge_paths = cli
        .merge_paths
        .iter()
        .map(|path| {
            MergePath::parse(path).with_context(|| format!("Invalid merge path \"{path}\""))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ProjectOverrides {
        commands: cli.run_commands.iter().map(Command::shell).collect(),
        merge_paths,
        disable_commands: cli.no_commands,
        fail_on_error: cli.fail,
        allow_invalid_branches: cli.allow_invalid_branches,
    })
}
