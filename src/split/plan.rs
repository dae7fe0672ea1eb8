//! The git operations a run performs, in order.
//!
//! Each change becomes a stage operation followed by a commit operation.
//! The same plan is either executed or, for a dry run, only printed.

use std::ffi::OsString;
use std::fmt;

use crate::error::GitError;
use crate::git::GitExecutor;
use crate::status::Change;

use super::SplitConfig;

/// One git write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `git add -A -- <paths>`
    Stage { paths: Vec<OsString> },
    /// `git commit [--no-verify] -m <message>`
    Commit { message: OsString, no_verify: bool },
}

impl Operation {
    /// Run this operation against `git`.
    pub fn execute<G: GitExecutor>(&self, git: &G) -> Result<(), GitError> {
        match self {
            Operation::Stage { paths } => git.stage(paths),
            Operation::Commit { message, no_verify } => git.commit(message, *no_verify),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Stage { paths } => {
                write!(f, "git add -A --")?;
                for path in paths {
                    write!(f, " {}", path.to_string_lossy())?;
                }
                Ok(())
            }
            Operation::Commit { message, no_verify } => {
                write!(f, "git commit")?;
                if *no_verify {
                    write!(f, " --no-verify")?;
                }
                write!(f, " -m {}", message.to_string_lossy())
            }
        }
    }
}

/// The stage-then-commit pair for a single change.
pub fn plan_change(change: &Change, config: &SplitConfig) -> [Operation; 2] {
    [
        Operation::Stage {
            paths: change.paths().to_vec(),
        },
        Operation::Commit {
            message: change.commit_message(&config.message_prefix),
            no_verify: config.no_verify,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Action;

    fn config(prefix: &str, no_verify: bool) -> SplitConfig {
        SplitConfig {
            dry_run: true,
            message_prefix: prefix.to_string(),
            no_verify,
        }
    }

    #[test]
    fn test_single_change_is_stage_then_commit() {
        let change = Change::single(Action::Add, "a.txt", "??");
        assert_eq!(
            plan_change(&change, &config("", false)),
            [
                Operation::Stage {
                    paths: vec!["a.txt".into()]
                },
                Operation::Commit {
                    message: "Add a.txt".into(),
                    no_verify: false
                },
            ]
        );
    }

    #[test]
    fn test_rename_stages_source_and_destination_together() {
        let change = Change::paired(Action::Rename, "old.txt", "new.txt", "R ");
        let [stage, commit] = plan_change(&change, &config("", false));
        assert_eq!(
            stage,
            Operation::Stage {
                paths: vec!["old.txt".into(), "new.txt".into()]
            }
        );
        assert_eq!(
            commit,
            Operation::Commit {
                message: "Rename old.txt to new.txt".into(),
                no_verify: false
            }
        );
    }

    #[test]
    fn test_prefix_and_no_verify_reach_commit() {
        let change = Change::single(Action::Delete, "old.md", " D");
        let [_, commit] = plan_change(&change, &config("docs: ", true));
        assert_eq!(
            commit,
            Operation::Commit {
                message: "docs: Delete old.md".into(),
                no_verify: true
            }
        );
    }

    #[test]
    fn test_operation_display() {
        let stage = Operation::Stage {
            paths: vec!["old.txt".into(), "new.txt".into()],
        };
        assert_eq!(stage.to_string(), "git add -A -- old.txt new.txt");

        let commit = Operation::Commit {
            message: "Update a.txt".into(),
            no_verify: false,
        };
        assert_eq!(commit.to_string(), "git commit -m Update a.txt");

        let commit = Operation::Commit {
            message: "Update a.txt".into(),
            no_verify: true,
        };
        assert_eq!(commit.to_string(), "git commit --no-verify -m Update a.txt");
    }
}
