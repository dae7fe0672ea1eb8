//! The `Change` record: one atomic working-tree modification.

use std::ffi::{OsStr, OsString};
use std::fmt;

/// What happened to the path(s) of a [`Change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Add,
    Update,
    Delete,
    Rename,
    Copy,
}

impl Action {
    /// Whether this action names a source and a destination path.
    pub fn is_paired(self) -> bool {
        matches!(self, Action::Rename | Action::Copy)
    }

    /// Capitalized verb used to open a commit message.
    pub fn verb(self) -> &'static str {
        match self {
            Action::Add => "Add",
            Action::Update => "Update",
            Action::Delete => "Delete",
            Action::Rename => "Rename",
            Action::Copy => "Copy",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add => write!(f, "add"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
            Action::Rename => write!(f, "rename"),
            Action::Copy => write!(f, "copy"),
        }
    }
}

/// A single change detected in the working tree.
///
/// Holds one path for add/update/delete and two (source, destination) for
/// rename/copy. The constructors keep that pairing consistent with the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    action: Action,
    paths: Vec<OsString>,
    status_code: String,
}

impl Change {
    /// A change that touches exactly one path.
    ///
    /// # Panics
    ///
    /// Panics if `action` is rename or copy.
    pub fn single(
        action: Action,
        path: impl Into<OsString>,
        status_code: impl Into<String>,
    ) -> Self {
        assert!(!action.is_paired(), "{action} needs a source and a destination");
        Self {
            action,
            paths: vec![path.into()],
            status_code: status_code.into(),
        }
    }

    /// A rename or copy from `source` to `destination`.
    ///
    /// # Panics
    ///
    /// Panics if `action` is not rename or copy.
    pub fn paired(
        action: Action,
        source: impl Into<OsString>,
        destination: impl Into<OsString>,
        status_code: impl Into<String>,
    ) -> Self {
        assert!(action.is_paired(), "{action} takes a single path");
        Self {
            action,
            paths: vec![source.into(), destination.into()],
            status_code: status_code.into(),
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn paths(&self) -> &[OsString] {
        &self.paths
    }

    /// The raw two-character porcelain status code, kept for diagnostics.
    pub fn status_code(&self) -> &str {
        &self.status_code
    }

    /// The path commits are ordered by (the source, for rename/copy).
    pub fn first_path(&self) -> &OsStr {
        &self.paths[0]
    }

    /// Whether this is an untracked directory entry (`?? dir/`) rather than a file.
    pub fn is_untracked_directory(&self) -> bool {
        self.action == Action::Add && self.first_path().as_encoded_bytes().ends_with(b"/")
    }

    /// Build the commit message for this change, prepending `prefix` verbatim.
    ///
    /// Built as an `OsString` so path bytes reach git unchanged.
    pub fn commit_message(&self, prefix: &str) -> OsString {
        let mut message = OsString::from(prefix);
        message.push(self.action.verb());
        message.push(" ");
        message.push(&self.paths[0]);
        if let [_, destination] = self.paths.as_slice() {
            message.push(" to ");
            message.push(destination);
        }
        message
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.commit_message("").to_string_lossy())
    }
}
