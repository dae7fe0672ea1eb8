//! Parser for `git status --porcelain=v1 -z` output.
//!
//! Each record is `XY<space><path>`. Renames and copies are followed by an
//! extra record holding the source path: with `-z`, git writes
//! `XY <destination>\0<source>\0`.

use tracing::trace;

use crate::error::StatusError;
use crate::git::records::{os_string_from_bytes, split_nul};

use super::change::{Action, Change};

/// Width of the `XY ` header that precedes the path in every record.
pub const HEADER_WIDTH: usize = 3;

/// Status code git uses for ignored paths.
const IGNORED: &str = "!!";

/// Status code git uses for untracked paths.
const UNTRACKED: &str = "??";

/// Lazy sequence of [`Change`]s read from a porcelain status report.
///
/// Each step consumes one record, or two for a rename/copy. The sequence is
/// cloneable, so it can be restarted from any point. It stops after the
/// first error.
#[derive(Clone)]
pub struct StatusRecords<I> {
    records: I,
    failed: bool,
}

impl<'a, I> StatusRecords<I>
where
    I: Iterator<Item = &'a [u8]>,
{
    /// Wrap an iterator over already-split records.
    pub fn from_records(records: I) -> Self {
        Self {
            records,
            failed: false,
        }
    }

    /// Turn one record (plus its partner, for rename/copy) into a change.
    ///
    /// Returns `None` for records that carry no change (too short, ignored).
    fn read_change(&mut self, record: &'a [u8]) -> Option<Result<Change, StatusError>> {
        if record.len() < HEADER_WIDTH {
            trace!("Skipping short status record {:?}", String::from_utf8_lossy(record));
            return None;
        }

        let code = String::from_utf8_lossy(&record[..2]).into_owned();
        let path = &record[HEADER_WIDTH..];

        if code == IGNORED {
            return None;
        }

        if is_unmerged(&code) {
            return Some(Err(StatusError::Conflict {
                path: String::from_utf8_lossy(path).into_owned(),
                code,
            }));
        }

        if code.contains(['R', 'C']) {
            let Some(source) = self.records.next() else {
                return Some(Err(StatusError::MissingPairedPath {
                    path: String::from_utf8_lossy(path).into_owned(),
                    code,
                }));
            };
            let action = if code.contains('R') {
                Action::Rename
            } else {
                Action::Copy
            };
            return Some(Ok(Change::paired(
                action,
                os_string_from_bytes(source),
                os_string_from_bytes(path),
                code,
            )));
        }

        let action = if code == UNTRACKED || code.contains('A') {
            Action::Add
        } else if code.contains('D') {
            Action::Delete
        } else {
            Action::Update
        };
        Some(Ok(Change::single(action, os_string_from_bytes(path), code)))
    }
}

impl<'a, I> Iterator for StatusRecords<I>
where
    I: Iterator<Item = &'a [u8]>,
{
    type Item = Result<Change, StatusError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let record = self.records.next()?;
            if let Some(item) = self.read_change(record) {
                self.failed = item.is_err();
                return Some(item);
            }
        }
    }
}

/// Iterate the changes in raw `git status --porcelain=v1 -z` output.
pub fn status_records(raw: &[u8]) -> StatusRecords<impl Iterator<Item = &[u8]> + Clone> {
    StatusRecords::from_records(split_nul(raw))
}

/// Parse a full status report into changes sorted by first path.
///
/// Fails on the first unmerged entry or truncated rename/copy pair; no
/// partial result is returned.
pub fn parse_status(raw: &[u8]) -> Result<Vec<Change>, StatusError> {
    let mut changes = status_records(raw).collect::<Result<Vec<_>, _>>()?;
    sort_changes(&mut changes);
    Ok(changes)
}

/// Sort changes by first path, ascending, for a reproducible commit order.
pub fn sort_changes(changes: &mut [Change]) {
    changes.sort_by(|a, b| a.first_path().cmp(b.first_path()));
}

/// Whether a status code marks an unmerged (conflicted) path.
///
/// Any `U` is unmerged, as are both-added (`AA`) and both-deleted (`DD`).
fn is_unmerged(code: &str) -> bool {
    code.contains('U') || code == "AA" || code == "DD"
}
