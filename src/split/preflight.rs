//! Preflight checks run once before any change is staged.
//!
//! Validates the repository context and that the index holds nothing that
//! would be swept into the first generated commit.

use tracing::debug;

use crate::error::SplitError;
use crate::git::GitExecutor;

/// Run all preflight checks.
///
/// Checks (in order):
/// 1. Inside a git work tree
/// 2. Nothing staged in the index
pub fn run_checks<G: GitExecutor>(git: &G) -> Result<(), SplitError> {
    check_work_tree(git)?;
    check_index_empty(git)?;
    Ok(())
}

/// Check that git sees a work tree.
fn check_work_tree<G: GitExecutor>(git: &G) -> Result<(), SplitError> {
    if !git.is_inside_work_tree()? {
        return Err(SplitError::NotARepository);
    }
    Ok(())
}

/// Check that no changes are already staged.
///
/// Pre-existing staged content is rejected outright; it is never stashed
/// or unstaged on the user's behalf.
fn check_index_empty<G: GitExecutor>(git: &G) -> Result<(), SplitError> {
    let staged = git.staged_paths()?;
    if !staged.is_empty() {
        for path in &staged {
            debug!("Already staged: {}", path.to_string_lossy());
        }
        return Err(SplitError::StagedChanges {
            count: staged.len(),
        });
    }
    Ok(())
}
