//! The narrow interface between commit-per-file and the git executable.

use std::ffi::{OsStr, OsString};

use crate::error::GitError;

/// Trait for the git operations a run depends on.
///
/// This abstraction allows mocking git in tests. Every path is exchanged as
/// an `OsString` so bytes git reports are handed back to it unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait GitExecutor {
    /// Whether the current directory belongs to a git work tree.
    fn is_inside_work_tree(&self) -> Result<bool, GitError>;

    /// Paths that currently have staged changes in the index.
    fn staged_paths(&self) -> Result<Vec<OsString>, GitError>;

    /// Raw output of `git status --porcelain=v1 -z`.
    fn status(&self) -> Result<Vec<u8>, GitError>;

    /// Untracked, non-ignored files under `dir`, relative to the repository root.
    fn untracked_files_under(&self, dir: &OsStr) -> Result<Vec<OsString>, GitError>;

    /// Stage exactly `paths`, including deletions (`git add -A -- <paths>`).
    fn stage(&self, paths: &[OsString]) -> Result<(), GitError>;

    /// Commit the staged content with `message`.
    fn commit(&self, message: &OsStr, no_verify: bool) -> Result<(), GitError>;
}
