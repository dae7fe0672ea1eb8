//! commit-per-file - A CLI tool that commits each changed file as its own commit.
//!
//! # Overview
//!
//! commit-per-file reads `git status --porcelain=v1 -z`, turns every changed
//! path (or rename/copy pair) into a [`Change`], and creates one commit per
//! change with a simple message such as `Add src/lib.rs` or
//! `Rename old.txt to new.txt`. All repository work is delegated to the
//! `git` executable through the [`GitExecutor`] trait.

pub mod error;
pub mod git;
pub mod split;
pub mod status;

// Re-export commonly used types
pub use error::{GitError, SplitError, StatusError};
pub use git::{GitExecutor, SystemGit};
pub use split::{Operation, SplitConfig, SplitSummary, run_split};
pub use status::{Action, Change, detect_changes, parse_status};
