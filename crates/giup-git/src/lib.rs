//! # giup-git
//!
//! Git operations abstraction layer for giup, built on git2-rs and the
//! `git` binary. Provides the branch switch, merge and ref-name checks
//! that a merge run is made of.

mod error;
mod repository;
mod traits;

pub use error::{Error, Result};
pub use repository::Repository;
pub use traits::GitOps;
