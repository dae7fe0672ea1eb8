//! Working-tree change detection from git's porcelain status report.

pub mod change;
pub mod detect;
pub mod parser;

pub use change::{Action, Change};
pub use detect::detect_changes;
pub use parser::{StatusRecords, parse_status, sort_changes, status_records};
