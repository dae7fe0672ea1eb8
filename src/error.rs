//! Error types for commit-per-file modules using thiserror.

use thiserror::Error;

/// Errors from invoking the external git executable.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable '{0}' not found. Install git or set COMMIT_PER_FILE_GIT to its path")]
    NotInstalled(String),

    #[error("Failed to spawn git {operation}: {source}")]
    SpawnFailed {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with {}",
             code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit {
        operation: &'static str,
        code: Option<i32>,
        /// Diagnostic text reported by git (stderr, or stdout when stderr is empty).
        diagnostic: String,
    },
}

impl GitError {
    /// Process exit status to terminate with when this error aborts a run.
    ///
    /// Mirrors git's own status for failed invocations; a signal-terminated
    /// or otherwise unknown status maps to 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            GitError::NonZeroExit {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }

    /// Diagnostic output from git that should be relayed verbatim, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            GitError::NonZeroExit { diagnostic, .. } if !diagnostic.is_empty() => {
                Some(diagnostic)
            }
            _ => None,
        }
    }
}

/// Errors from parsing a `git status --porcelain=v1 -z` report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("Unmerged/conflict state detected for '{path}' (status {code}). Resolve conflicts first.")]
    Conflict { path: String, code: String },

    #[error("Malformed rename/copy entry for '{path}' (status {code}): paired path record is missing")]
    MissingPairedPath { path: String, code: String },
}

/// Errors that abort a commit-per-file run.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Not inside a git work tree. Run commit-per-file from within a git repository.")]
    NotARepository,

    #[error(
        "Staged changes detected ({count} path(s) in the index). Unstage or commit them first to avoid mixing commits."
    )]
    StagedChanges { count: usize },

    #[error(transparent)]
    Status(#[from] StatusError),

    #[error(transparent)]
    Git(#[from] GitError),
}

impl SplitError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            SplitError::Git(e) => e.exit_code(),
            _ => 1,
        }
    }

    /// Diagnostic output from git that should be relayed verbatim, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            SplitError::Git(e) => e.diagnostic(),
            _ => None,
        }
    }
}
