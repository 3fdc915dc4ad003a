//! Concurrent validation of every branch named by the merge paths.

use futures::future::join_all;
use giup_git::GitOps;
use tracing::debug;

use crate::branch_name::invalid_reason;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::merge_path::MergePath;
use crate::project::Project;
use crate::traits::Reporter;

/// Outcome of validating one branch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCheck {
    pub name: String,
    /// Why the name was rejected, `None` if it is valid.
    pub problem: Option<String>,
}

impl BranchCheck {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.problem.is_none()
    }
}

/// Every distinct branch name across `paths`, in first-seen order.
#[must_use]
pub fn branch_names(paths: &[MergePath]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for branch in paths.iter().flat_map(MergePath::branches) {
        if !names.contains(&branch.as_str()) {
            names.push(branch);
        }
    }
    names
}

/// Check every branch name concurrently.
///
/// All checks run to completion; one failure never cancels the others.
/// Results are returned in the order of [`branch_names`].
#[allow(clippy::future_not_send)]
pub async fn check_branches<G: GitOps>(git: &G, paths: &[MergePath]) -> Vec<BranchCheck> {
    let checks = branch_names(paths).into_iter().map(|name| async move {
        let problem = match git.check_ref_format(name).await {
            Ok(true) => None,
            Ok(false) => Some(
                invalid_reason(name)
                    .unwrap_or_else(|| "rejected by git check-ref-format".to_string()),
            ),
            Err(e) => Some(format!("could not be checked: {e}")),
        };
        BranchCheck {
            name: name.to_string(),
            problem,
        }
    });

    let results = join_all(checks).await;
    debug!(
        checked = results.len(),
        invalid = results.iter().filter(|c| !c.is_valid()).count(),
        "branch names checked"
    );
    results
}

/// Validate a project's branch names and apply its invalid-name policy.
///
/// Every invalid name is reported. When the project aborts on invalid
/// branches the names are returned as an error, otherwise the run may go
/// ahead with them.
///
/// # Errors
/// Returns [`Error::InvalidBranchNames`] if any name is invalid and the
/// project's `abort_on_invalid_branch` policy is set.
#[allow(clippy::future_not_send)]
pub async fn validate_project<G: GitOps, R: Reporter>(
    git: &G,
    reporter: &R,
    project: &Project,
) -> Result<Vec<BranchCheck>> {
    let checks = check_branches(git, project.merge_paths()).await;

    let invalid: Vec<String> = checks
        .iter()
        .filter_map(|check| {
            check.problem.as_ref().map(|reason| {
                reporter.report(&Event::InvalidBranch {
                    name: check.name.clone(),
                    reason: reason.clone(),
                });
                check.name.clone()
            })
        })
        .collect();

    if !invalid.is_empty() && project.abort_on_invalid_branch() {
        return Err(Error::InvalidBranchNames(invalid));
    }
    Ok(checks)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{MockRepo, RecordingReporter};

    fn paths() -> Vec<MergePath> {
        vec![
            MergePath::new(["main", "bad..one", "dev"]),
            MergePath::new(["main", "weird", "also~bad"]),
        ]
    }

    #[test]
    fn test_branch_names_are_deduplicated() {
        assert_eq!(
            branch_names(&paths()),
            vec!["main", "bad..one", "dev", "weird", "also~bad"]
        );
    }

    #[tokio::test]
    async fn test_all_failures_reported_without_short_circuit() {
        let repo = MockRepo::new()
            .with_invalid_name("bad..one")
            .with_invalid_name("also~bad")
            .with_broken_name("weird");

        let checks = check_branches(&repo, &paths()).await;

        assert_eq!(checks.len(), 5);
        let mut checked = repo.ref_checks();
        checked.sort();
        assert_eq!(checked, vec!["also~bad", "bad..one", "dev", "main", "weird"]);

        let invalid: Vec<_> = checks
            .iter()
            .filter(|c| !c.is_valid())
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(invalid, vec!["bad..one", "weird", "also~bad"]);

        assert_eq!(
            checks[1].problem.as_deref(),
            Some("branch name cannot contain '..'")
        );
        assert!(checks[3].problem.as_deref().unwrap().starts_with("could not be checked"));
        assert!(checks[0].is_valid());
        assert!(checks[2].is_valid());
    }

    #[tokio::test]
    async fn test_git_only_rejection_has_fallback_reason() {
        let repo = MockRepo::new().with_invalid_name("HEAD");
        let checks = check_branches(&repo, &[MergePath::new(["HEAD"])]).await;
        assert_eq!(
            checks[0].problem.as_deref(),
            Some("rejected by git check-ref-format")
        );
    }

    #[tokio::test]
    async fn test_policy_aborts_on_invalid_names() {
        let repo = MockRepo::new().with_invalid_name("bad..one");
        let reporter = RecordingReporter::default();
        let project = Project::new(paths(), vec![]).unwrap();

        let err = validate_project(&repo, &reporter, &project)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidBranchNames(names) if names == ["bad..one"]));
        assert_eq!(reporter.events().len(), 1);
    }

    #[tokio::test]
    async fn test_policy_can_allow_invalid_names() {
        let repo = MockRepo::new().with_invalid_name("bad..one");
        let reporter = RecordingReporter::default();
        let project = Project::new(paths(), vec![])
            .unwrap()
            .with_abort_on_invalid_branch(false);

        let checks = validate_project(&repo, &reporter, &project).await.unwrap();

        assert_eq!(checks.len(), 5);
        assert_eq!(
            reporter.events(),
            vec![Event::InvalidBranch {
                name: "bad..one".into(),
                reason: "branch name cannot contain '..'".into()
            }]
        );
    }
}
