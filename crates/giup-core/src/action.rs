//! Recovery actions and the fuzzy resolver for operator input.

use std::fmt;

/// An operator response to a failed unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoveryAction {
    /// Abandon the current merge path.
    Abort,
    /// Skip the failed unit and carry on.
    Continue,
    /// Run an ad hoc shell command, then ask again.
    Execute,
    /// Stop the whole run.
    Quit,
    /// Invoke the failed unit again.
    Rerun,
}

/// Result of resolving an action word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one action matched.
    Resolved(RecoveryAction),
    /// Nothing matched.
    Unknown,
    /// More than one action shares the given prefix.
    Ambiguous(Vec<RecoveryAction>),
}

impl RecoveryAction {
    /// All actions in menu order.
    pub const ALL: [Self; 5] = [
        Self::Abort,
        Self::Continue,
        Self::Execute,
        Self::Quit,
        Self::Rerun,
    ];

    /// One-line menu shown whenever the operator has to pick an action.
    pub const MENU: &'static str =
        "a = abort path, c = continue, e = execute command, q = quit, r = rerun";

    /// The canonical word for this action.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Continue => "continue",
            Self::Execute => "execute",
            Self::Quit => "quit",
            Self::Rerun => "rerun",
        }
    }

    /// Resolve an operator word against the canonical action names.
    #[must_use]
    pub fn resolve(word: &str) -> Resolution {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Resolution::Unknown;
        }

        let names = Self::ALL.map(Self::name);
        let matches: Vec<Self> = resolve(&word, &names)
            .into_iter()
            .filter_map(|name| Self::ALL.into_iter().find(|a| a.name() == name))
            .collect();

        match matches.as_slice() {
            [] => Resolution::Unknown,
            [single] => Resolution::Resolved(*single),
            _ => Resolution::Ambiguous(matches),
        }
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Match `input` against `candidates`.
///
/// An exact match wins outright, even when `input` is also a prefix of
/// other candidates. Otherwise every candidate starting with `input` is
/// returned, in candidate order. Callers treat anything other than a single
/// result as unresolved.
#[must_use]
pub fn resolve<'a>(input: &str, candidates: &[&'a str]) -> Vec<&'a str> {
    if let Some(exact) = candidates.iter().find(|c| **c == input) {
        return vec![*exact];
    }

    candidates
        .iter()
        .filter(|c| c.starts_with(input))
        .copied()
        .collect()
}
