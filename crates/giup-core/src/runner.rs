//! Merge path traversal.
//!
//! Paths run strictly in order, and so do the units inside them: for every
//! step the child branch is checked out, its parent merged in and then the
//! project commands run. Nothing here runs concurrently since every unit
//! mutates the one working tree.

use giup_git::GitOps;
use tracing::{debug, info};

use crate::command::Command;
use crate::error::{ExecError, Result};
use crate::event::Event;
use crate::executor::CommandExecutor;
use crate::merge_path::MergePath;
use crate::project::Project;
use crate::traits::{Operator, Reporter, ShellRunner};

/// Caller supplied options for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Switch back to the branch checked out before the run.
    pub return_to_original_branch: bool,
    /// Open the editor for merge commit messages.
    pub edit_merge_message: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            return_to_original_branch: true,
            edit_merge_message: false,
        }
    }
}

/// What happened to the merge paths of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Paths that ran to the end (units skipped by the operator included).
    pub completed: usize,
    /// Paths abandoned by the operator.
    pub aborted: usize,
    /// Paths that stopped on a failure.
    pub failed: usize,
    /// Paths without branches.
    pub empty: usize,
    /// The operator quit the run.
    pub quit: bool,
    /// Fail-fast mode stopped the run.
    pub stopped: bool,
}

impl RunSummary {
    /// No path failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// The units of work for one merge path, in execution order.
///
/// A singleton path is a switch followed by the commands. Longer paths
/// produce switch, merge and commands for every step.
#[must_use]
pub fn plan(path: &MergePath, commands: &[Command], edit_merge_message: bool) -> Vec<Command> {
    match path.branches() {
        [] => Vec::new(),
        [branch] => std::iter::once(Command::switch(branch.clone()))
            .chain(commands.iter().cloned())
            .collect(),
        _ => path
            .steps()
            .flat_map(move |(parent, branch)| {
                [
                    Command::switch(branch),
                    Command::merge(parent, edit_merge_message),
                ]
                .into_iter()
                .chain(commands.iter().cloned())
            })
            .collect(),
    }
}

/// Follows a project's merge paths.
pub struct MergePathRunner<'a, G, S, O, R> {
    executor: CommandExecutor<'a, G, S, O, R>,
    options: RunOptions,
}

#[allow(clippy::future_not_send)]
impl<'a, G, S, O, R> MergePathRunner<'a, G, S, O, R>
where
    G: GitOps,
    S: ShellRunner,
    O: Operator,
    R: Reporter,
{
    #[must_use]
    pub const fn new(executor: CommandExecutor<'a, G, S, O, R>, options: RunOptions) -> Self {
        Self { executor, options }
    }

    /// Follow every merge path of `project`.
    ///
    /// Operator aborts end only the current path, a quit ends the run, and
    /// other failures end the current path, or the run in fail-fast mode.
    /// The original branch is restored afterwards in every case when
    /// requested.
    ///
    /// # Errors
    /// Returns error only if switching back to the original branch fails.
    pub async fn run(&self, project: &Project) -> Result<RunSummary> {
        let git = self.executor.git();
        let reporter = self.executor.reporter();

        let original = match git.current_branch().await {
            Ok(branch) => Some(branch),
            Err(e) => {
                if self.options.return_to_original_branch {
                    reporter.report(&Event::OriginalBranchUnknown {
                        reason: e.to_string(),
                    });
                }
                None
            }
        };

        let mut summary = RunSummary::default();
        for (index, path) in project.merge_paths().iter().enumerate() {
            if path.is_empty() {
                reporter.report(&Event::EmptyPath { index });
                summary.empty += 1;
                continue;
            }

            reporter.report(&Event::FollowingPath {
                index,
                path: path.to_string(),
            });

            match self.run_path(project, path).await {
                Ok(()) => summary.completed += 1,
                Err(ExecError::PathAbort) => {
                    reporter.report(&Event::PathAborted { index });
                    summary.aborted += 1;
                }
                Err(ExecError::RunQuit) => {
                    reporter.report(&Event::RunQuit);
                    summary.quit = true;
                    break;
                }
                Err(e) => {
                    reporter.report(&Event::PathFailed {
                        index,
                        message: e.to_string(),
                    });
                    summary.failed += 1;
                    if project.fail_on_error() {
                        reporter.report(&Event::FailFastStop { index });
                        summary.stopped = true;
                        break;
                    }
                }
            }
        }
        info!(?summary, "merge paths finished");

        if self.options.return_to_original_branch {
            if let Some(branch) = original {
                reporter.report(&Event::ReturningToBranch {
                    branch: branch.clone(),
                });
                git.switch(&branch).await?;
            }
        }

        Ok(summary)
    }

    async fn run_path(&self, project: &Project, path: &MergePath) -> std::result::Result<(), ExecError> {
        let units = plan(path, project.commands(), self.options.edit_merge_message);
        debug!(%path, units = units.len(), "following merge path");
        for unit in &units {
            self.executor.run(unit, project.fail_on_error()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_support::{Call, MockRepo, RecordingReporter, ScriptedOperator};

    const NO_RETURN: RunOptions = RunOptions {
        return_to_original_branch: false,
        edit_merge_message: false,
    };

    fn project(paths: &[&[&str]], commands: &[&str]) -> Project {
        Project::new(
            paths.iter().map(|p| MergePath::new(p.iter().copied())).collect(),
            commands.iter().map(|c| Command::shell(*c)).collect(),
        )
        .unwrap()
    }

    async fn run(
        repo: &MockRepo,
        operator: &ScriptedOperator,
        reporter: &RecordingReporter,
        project: &Project,
        options: RunOptions,
    ) -> Result<RunSummary> {
        let executor = CommandExecutor::new(repo, repo, operator, reporter);
        MergePathRunner::new(executor, options).run(project).await
    }

    #[tokio::test]
    async fn test_singleton_path() {
        let repo = MockRepo::new();
        let reporter = RecordingReporter::default();
        let project = project(&[&["dev"]], &["make", "make test"]);

        let summary = run(&repo, &ScriptedOperator::new([]), &reporter, &project, NO_RETURN)
            .await
            .unwrap();

        assert_eq!(summary.completed, 1);
        assert_eq!(
            repo.calls(),
            vec![
                Call::switch("dev"),
                Call::shell("make"),
                Call::shell("make test")
            ]
        );
    }

    #[tokio::test]
    async fn test_chain_interleaves_switch_merge_commands() {
        let repo = MockRepo::new();
        let reporter = RecordingReporter::default();
        let project = project(&[&["a", "b", "c", "d"]], &["make"]);

        run(&repo, &ScriptedOperator::new([]), &reporter, &project, NO_RETURN)
            .await
            .unwrap();

        let mut expected = Vec::new();
        for (parent, child) in [("a", "b"), ("b", "c"), ("c", "d")] {
            expected.push(Call::switch(child));
            expected.push(Call::merge(parent, false));
            expected.push(Call::shell("make"));
        }
        assert_eq!(repo.calls(), expected);
    }

    #[tokio::test]
    async fn test_edit_merge_message_option() {
        let repo = MockRepo::new();
        let options = RunOptions {
            edit_merge_message: true,
            ..NO_RETURN
        };

        run(
            &repo,
            &ScriptedOperator::new([]),
            &RecordingReporter::default(),
            &project(&[&["a", "b"]], &[]),
            options,
        )
        .await
        .unwrap();

        assert_eq!(repo.calls(), vec![Call::switch("b"), Call::merge("a", true)]);
    }

    #[tokio::test]
    async fn test_abort_skips_rest_of_path_only() {
        let repo = MockRepo::new().failing(Call::merge("a", false), 1);
        let operator = ScriptedOperator::new(["a"]);
        let reporter = RecordingReporter::default();
        let project = project(&[&["a", "b", "c"], &["x"]], &["make"]);

        let summary = run(&repo, &operator, &reporter, &project, NO_RETURN)
            .await
            .unwrap();

        assert_eq!(
            repo.calls(),
            vec![
                Call::switch("b"),
                Call::merge("a", false),
                Call::switch("x"),
                Call::shell("make")
            ]
        );
        assert_eq!(summary.aborted, 1);
        assert_eq!(summary.completed, 1);
        assert!(reporter.events().contains(&Event::PathAborted { index: 0 }));
    }

    #[tokio::test]
    async fn test_quit_halts_remaining_paths() {
        let repo = MockRepo::new().failing(Call::shell("make"), 2);
        let operator = ScriptedOperator::new(["c", "quit"]);
        let reporter = RecordingReporter::default();
        let project = project(&[&["a"], &["b"], &["c"]], &["make"]);

        let summary = run(&repo, &operator, &reporter, &project, RunOptions::default())
            .await
            .unwrap();

        assert!(summary.quit);
        assert_eq!(summary.completed, 1);
        assert_eq!(
            repo.calls(),
            vec![
                Call::switch("a"),
                Call::shell("make"),
                Call::switch("b"),
                Call::shell("make"),
                Call::switch("main"),
            ]
        );
        assert!(reporter.events().contains(&Event::RunQuit));
    }

    #[tokio::test]
    async fn test_fail_fast_stops_run_without_prompting() {
        let repo = MockRepo::new().failing(Call::switch("b"), 1);
        let operator = ScriptedOperator::new(["c"]);
        let reporter = RecordingReporter::default();
        let project = project(&[&["a", "b"], &["x"]], &["make"]).with_fail_on_error(true);

        let summary = run(&repo, &operator, &reporter, &project, RunOptions::default())
            .await
            .unwrap();

        assert!(operator.prompts().is_empty());
        assert_eq!(summary.failed, 1);
        assert!(summary.stopped);
        assert!(!summary.is_success());
        assert_eq!(repo.calls(), vec![Call::switch("b"), Call::switch("main")]);
        assert!(reporter.events().contains(&Event::FailFastStop { index: 0 }));
    }

    #[tokio::test]
    async fn test_skipped_failure_continues_path() {
        let repo = MockRepo::new().failing(Call::shell("make"), 1);
        let operator = ScriptedOperator::new(["c"]);
        let reporter = RecordingReporter::default();
        let project = project(&[&["a"], &["b"]], &["make"]);

        let summary = run(&repo, &operator, &reporter, &project, NO_RETURN)
            .await
            .unwrap();

        assert_eq!(summary.completed, 2);
        assert!(summary.is_success());
        assert_eq!(repo.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_closed_input_quits_run() {
        let repo = MockRepo::new().failing(Call::shell("make"), 1);
        let reporter = RecordingReporter::default();
        let project = project(&[&["a"], &["b"]], &["make"]);

        let summary = run(&repo, &ScriptedOperator::new([]), &reporter, &project, NO_RETURN)
            .await
            .unwrap();

        assert!(summary.quit);
        assert_eq!(repo.calls(), vec![Call::switch("a"), Call::shell("make")]);
    }

    #[tokio::test]
    async fn test_empty_path_is_skipped() {
        let repo = MockRepo::new();
        let reporter = RecordingReporter::default();
        let project = project(&[&[], &["a"]], &[]);

        let summary = run(&repo, &ScriptedOperator::new([]), &reporter, &project, NO_RETURN)
            .await
            .unwrap();

        assert_eq!(summary.empty, 1);
        assert_eq!(summary.completed, 1);
        assert_eq!(reporter.events()[0], Event::EmptyPath { index: 0 });
    }

    #[tokio::test]
    async fn test_returns_to_original_branch() {
        let repo = MockRepo::new();
        let reporter = RecordingReporter::default();
        let project = project(&[&["a", "b"]], &[]);

        run(&repo, &ScriptedOperator::new([]), &reporter, &project, RunOptions::default())
            .await
            .unwrap();

        assert_eq!(repo.calls().last(), Some(&Call::switch("main")));
        assert_eq!(repo.current().as_deref(), Some("main"));
        assert!(reporter.events().contains(&Event::ReturningToBranch {
            branch: "main".into()
        }));
    }

    #[tokio::test]
    async fn test_detached_head_skips_restoration() {
        let repo = MockRepo::new().detached();
        let reporter = RecordingReporter::default();
        let project = project(&[&["a"]], &[]);

        run(&repo, &ScriptedOperator::new([]), &reporter, &project, RunOptions::default())
            .await
            .unwrap();

        assert_eq!(repo.calls(), vec![Call::switch("a")]);
        assert!(matches!(
            reporter.events()[0],
            Event::OriginalBranchUnknown { .. }
        ));
    }

    #[tokio::test]
    async fn test_failed_restoration_is_an_error() {
        let repo = MockRepo::new().failing(Call::switch("main"), 1);
        let project = project(&[&["a"]], &[]);

        let err = run(
            &repo,
            &ScriptedOperator::new([]),
            &RecordingReporter::default(),
            &project,
            RunOptions::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Git(giup_git::Error::SwitchFailed(_))));
    }

    #[test]
    fn test_plan_shapes() {
        let commands = [Command::shell("make")];

        assert!(plan(&MergePath::default(), &commands, false).is_empty());

        let single = plan(&MergePath::new(["a"]), &commands, false);
        assert_eq!(single, vec![Command::switch("a"), Command::shell("make")]);

        for n in 2..6 {
            let branches: Vec<String> = (0..n).map(|i| format!("b{i}")).collect();
            let units = plan(&MergePath::new(branches), &commands, false);
            assert_eq!(units.len(), 3 * (n - 1));
            for (step, chunk) in units.chunks(3).enumerate() {
                assert_eq!(chunk[0], Command::switch(format!("b{}", step + 1)));
                assert_eq!(chunk[1], Command::merge(format!("b{step}"), false));
                assert_eq!(chunk[2], Command::shell("make"));
            }
        }
    }
}
