//! Project file loading.
//!
//! Project files are JSON by default (`.giup`); a `.toml` extension selects
//! TOML with the same keys.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::command::Commands;
use crate::error::{Error, Result};
use crate::merge_path::MergePaths;

/// Default project file name, looked up in the current directory.
pub const DEFAULT_PROJECT_FILE: &str = ".giup";

/// Raw contents of a project file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectFile {
    /// Merge paths to follow, in order.
    #[serde(default)]
    pub merge_paths: Option<MergePaths>,

    /// Commands run after every merge step.
    #[serde(default)]
    pub commands: Option<Commands>,

    /// Refuse to run when a branch name fails validation.
    #[serde(default = "default_abort_on_invalid_branch")]
    pub abort_on_invalid_branch: bool,
}

const fn default_abort_on_invalid_branch() -> bool {
    true
}

impl ProjectFile {
    /// Load a project file.
    ///
    /// # Errors
    /// Returns [`Error::ConfigNotFound`] if the file can't be read and
    /// [`Error::ConfigParse`] if its contents don't describe a project.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let parsed = if is_toml {
            Self::from_toml(&content)
        } else {
            Self::from_json(&content)
        };

        parsed.map_err(|e| Error::ConfigParse {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse JSON project contents.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or doesn't match the schema.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse TOML project contents.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or doesn't match the schema.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
