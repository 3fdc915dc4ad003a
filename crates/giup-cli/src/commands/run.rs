//! `giup` default command - follow the merge paths of a project.

use anyhow::{Context, Result, bail};
use giup_core::runner::plan;
use giup_core::{
    CommandExecutor, MergePathRunner, Project, RunOptions, RunSummary, SystemShell,
    validate_project,
};
use tracing::debug;

use super::Cli;
use super::utils::{open_repo, overrides};
use crate::console::{TerminalOperator, TerminalReporter};
use crate::output;

/// Run the merge paths described by the command line.
pub fn run(cli: &Cli) -> Result<()> {
    let repo = open_repo()?;
    let reporter = TerminalReporter;

    let project = Project::load(&cli.project, overrides(cli)?, &reporter)
        .context("Failed to load project configuration")?;
    debug!(
        paths = project.merge_paths().len(),
        commands = project.commands().len(),
        fail_on_error = project.fail_on_error(),
        "project loaded"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(validate_project(&repo, &reporter, &project))?;

    if cli.dry_run {
        print_plan(&project, cli.edit_commit_message);
        return Ok(());
    }

    let shell = SystemShell::in_dir(repo.workdir());
    let operator = TerminalOperator::new();
    let executor = CommandExecutor::new(&repo, &shell, &operator, &reporter);
    let runner = MergePathRunner::new(
        executor,
        RunOptions {
            return_to_original_branch: !cli.no_return,
            edit_merge_message: cli.edit_commit_message,
        },
    );

    let summary = rt.block_on(runner.run(&project))?;
    print_summary(&summary);

    if !summary.is_success() {
        bail!("{} merge path(s) failed", summary.failed);
    }
    Ok(())
}

fn print_plan(project: &Project, edit_merge_message: bool) {
    for (index, path) in project.merge_paths().iter().enumerate() {
        output::info(&format!("Merge path #{index}: {path}"));
        for unit in plan(path, project.commands(), edit_merge_message) {
            output::detail(&format!("  {unit}"));
        }
    }
}

fn print_summary(summary: &RunSummary) {
    output::hr();
    if summary.quit {
        output::warn("Run quit before all merge paths were followed");
    }
    if summary.stopped {
        output::warn("Run stopped on the first failure");
    }
    if summary.aborted > 0 {
        output::info(&format!("{} merge path(s) aborted", summary.aborted));
    }
    if summary.empty > 0 {
        output::info(&format!("{} empty merge path(s) skipped", summary.empty));
    }
    if summary.completed > 0 {
        output::success(&format!("{} merge path(s) completed", summary.completed));
    }
}
