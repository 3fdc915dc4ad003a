//! Merge paths: linear chains of branches merged one into the next.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Delimiter used by the compact `"a->b->c"` notation.
pub const PATH_DELIMITER: &str = "->";

/// An ordered chain of branch names.
///
/// The first branch is the root. Each following branch gets its
/// predecessor merged into it. Paths built through [`MergePath::parse`] or
/// deserialization are never empty; [`MergePath::new`] accepts any list so
/// overrides can be represented verbatim and skipped by the runner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergePath(Vec<String>);

impl MergePath {
    /// Create a path from already split branch names.
    #[must_use]
    pub fn new<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(branches.into_iter().map(Into::into).collect())
    }

    /// Parse the `"a->b->c"` notation.
    ///
    /// Segments are trimmed. An empty input or an empty segment is an error.
    ///
    /// # Errors
    /// Returns [`Error::EmptyMergePath`] if any segment is blank.
    pub fn parse(src: &str) -> Result<Self> {
        let branches: Vec<String> = src
            .split(PATH_DELIMITER)
            .map(|s| s.trim().to_string())
            .collect();

        if branches.iter().any(String::is_empty) {
            return Err(Error::EmptyMergePath(src.to_string()));
        }
        Ok(Self(branches))
    }

    /// Branch names in order.
    #[must_use]
    pub fn branches(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consecutive `(parent, branch)` pairs.
    ///
    /// A path of `n` branches yields `n - 1` steps; a singleton yields none.
    pub fn steps(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

impl fmt::Display for MergePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" -> "))
    }
}

impl MergePath {
    /// Build a path from one parsed `merge-paths` entry.
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(joined) => Self::parse(&joined),
            Value::Array(items) => {
                let branches = items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(branch) => Ok(branch),
                        other => Err(Error::InvalidMergePath(format!(
                            "branch names must be strings, got {other}"
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                if branches.is_empty() {
                    return Err(Error::EmptyMergePath("[]".to_string()));
                }
                Ok(Self(branches))
            }
            other => Err(Error::InvalidMergePath(format!(
                "expected \"a->b\" or a list of branch names, got {other}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for MergePath {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::from_value(Value::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}

/// The `merge-paths` value: a single path or a list of paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePaths(pub Vec<MergePath>);

impl<'de> Deserialize<'de> for MergePaths {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A bare list is a list of paths, never the branches of one path
        let paths = match Value::deserialize(deserializer)? {
            Value::Array(entries) => entries
                .into_iter()
                .map(MergePath::from_value)
                .collect::<Result<Vec<_>>>(),
            single => MergePath::from_value(single).map(|path| vec![path]),
        };
        paths.map(Self).map_err(serde::de::Error::custom)
    }
}
