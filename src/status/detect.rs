//! Change detection: parse the status report and expand untracked directories.

use tracing::debug;

use crate::error::SplitError;
use crate::git::GitExecutor;

use super::change::{Action, Change};
use super::parser::{parse_status, sort_changes};

/// Detect every change in the working tree, one entry per file (or rename/copy pair).
///
/// git collapses a fully untracked directory into a single `?? dir/` entry;
/// each such entry is replaced by one add per untracked file beneath it, as
/// listed by [`GitExecutor::untracked_files_under`]. That listing is already
/// recursive, so nested untracked directories come back flattened.
pub fn detect_changes<G: GitExecutor>(git: &G) -> Result<Vec<Change>, SplitError> {
    let raw = git.status()?;
    let parsed = parse_status(&raw)?;

    let mut changes = Vec::with_capacity(parsed.len());
    for change in parsed {
        if !change.is_untracked_directory() {
            changes.push(change);
            continue;
        }

        let files = git.untracked_files_under(change.first_path())?;
        debug!(
            "Expanded untracked directory {} into {} file(s)",
            change.first_path().to_string_lossy(),
            files.len()
        );
        changes.extend(
            files
                .into_iter()
                .map(|path| Change::single(Action::Add, path, change.status_code())),
        );
    }

    sort_changes(&mut changes);
    Ok(changes)
}
