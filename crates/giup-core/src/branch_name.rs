//! Local explanation of git's branch naming rules.
//!
//! git itself is the authority on whether a name is valid (see
//! [`GitOps::check_ref_format`](giup_git::GitOps::check_ref_format)), but it
//! only answers yes or no. [`invalid_reason`] mirrors the rules of
//! `git check-ref-format --branch` closely enough to tell the operator what
//! is wrong with a rejected name.

/// Describe why `name` is not a valid branch name.
///
/// Returns `None` when no local rule is violated.
#[must_use]
pub fn invalid_reason(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("branch name cannot be empty".to_string());
    }

    if name == "@" {
        return Some("branch name cannot be '@'".to_string());
    }

    if name.starts_with('-') {
        return Some("branch name cannot start with '-'".to_string());
    }

    if name.starts_with('.') {
        return Some("branch name cannot start with '.'".to_string());
    }

    if name.ends_with('.') {
        return Some("branch name cannot end with '.'".to_string());
    }

    // git's rule is case-sensitive
    #[allow(clippy::case_sensitive_file_extension_comparisons)]
    if name.ends_with(".lock") {
        return Some("branch name cannot end with '.lock'".to_string());
    }

    if name.starts_with('/') || name.ends_with('/') {
        return Some("branch name cannot start or end with '/'".to_string());
    }

    for pattern in ["..", "//", "@{", "/."] {
        if name.contains(pattern) {
            return Some(format!("branch name cannot contain '{pattern}'"));
        }
    }

    if name.split('/').any(|component| component.ends_with(".lock")) {
        return Some("branch name component cannot end with '.lock'".to_string());
    }

    if name.chars().any(|c| c.is_ascii_control()) {
        return Some("branch name cannot contain control characters".to_string());
    }

    // Forbidden by git: space ~ ^ : ? * [ \
    name.chars()
        .find(|c| matches!(c, ' ' | '~' | '^' | ':' | '?' | '*' | '[' | '\\'))
        .map(|c| format!("branch name cannot contain '{c}'"))
}
