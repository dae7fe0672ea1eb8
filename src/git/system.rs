//! Process-backed [`GitExecutor`] that shells out to the system `git` binary.
//!
//! Running the real executable inherits the user's git config, hooks, and
//! identity, exactly as if the commands had been typed by hand.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, warn};

use crate::error::GitError;
use crate::git::executor::GitExecutor;
use crate::git::records::{os_string_from_bytes, parse_path_list};

/// Default git executable name.
const DEFAULT_GIT_PROGRAM: &str = "git";

/// Environment variable to override the git executable (name or path).
pub const GIT_PROGRAM_ENV_VAR: &str = "COMMIT_PER_FILE_GIT";

/// Get the configured git program.
///
/// Reads from COMMIT_PER_FILE_GIT if set, otherwise uses `git`.
///
/// Logs a warning if the environment variable is set but empty or not
/// valid Unicode.
fn get_program() -> String {
    match env::var(GIT_PROGRAM_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => v,
        Ok(_) => {
            warn!(
                "Empty {} value, using default '{}'",
                GIT_PROGRAM_ENV_VAR, DEFAULT_GIT_PROGRAM
            );
            DEFAULT_GIT_PROGRAM.to_string()
        }
        Err(env::VarError::NotUnicode(v)) => {
            warn!(
                "Invalid {} value {:?}, using default '{}'",
                GIT_PROGRAM_ENV_VAR, v, DEFAULT_GIT_PROGRAM
            );
            DEFAULT_GIT_PROGRAM.to_string()
        }
        Err(env::VarError::NotPresent) => DEFAULT_GIT_PROGRAM.to_string(),
    }
}

/// Runs git as a child process, one blocking invocation per operation.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: PathBuf,
    work_dir: Option<PathBuf>,
}

impl SystemGit {
    /// Create an executor for the given git program, run in the current directory.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            work_dir: None,
        }
    }

    /// Locate the configured git program on `PATH`.
    ///
    /// Uses the `which` crate for cross-platform executable detection.
    pub fn from_env() -> Result<Self, GitError> {
        let program = get_program();
        let resolved = which::which(&program).map_err(|_| GitError::NotInstalled(program))?;
        debug!("Using git executable {}", resolved.display());
        Ok(Self::new(resolved))
    }

    /// Run every invocation from `dir` instead of the process's current directory.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// The directory invocations run from, if pinned.
    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    /// Pin invocations to the top level of the enclosing work tree.
    ///
    /// Porcelain status paths are always relative to the repository root, so
    /// staging and listing must run from there too. Outside a work tree the
    /// executor is returned unchanged and [`GitExecutor::is_inside_work_tree`]
    /// reports the problem.
    pub fn anchored_at_toplevel(self) -> Result<Self, GitError> {
        let output = self.output("rev-parse", ["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            debug!(
                "git rev-parse --show-toplevel failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(self);
        }

        let toplevel = os_string_from_bytes(output.stdout.trim_ascii_end());
        debug!("Repository top level: {}", Path::new(&toplevel).display());
        Ok(self.with_work_dir(toplevel))
    }

    /// Spawn git with `args` and collect its output regardless of exit status.
    fn output<I, S>(&self, operation: &'static str, args: I) -> Result<Output, GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.args(args).env("GIT_LITERAL_PATHSPECS", "1");
        if let Some(dir) = &self.work_dir {
            command.current_dir(dir);
        }

        debug!("Running {:?}", command);
        command
            .output()
            .map_err(|source| GitError::SpawnFailed { operation, source })
    }

    /// Run git and return stdout, turning a non-zero exit into an error.
    fn run<I, S>(&self, operation: &'static str, args: I) -> Result<Vec<u8>, GitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.output(operation, args)?;

        if !output.status.success() {
            // git reports some failures (e.g. "nothing to commit") on stdout.
            let stream = if output.stderr.trim_ascii().is_empty() {
                &output.stdout
            } else {
                &output.stderr
            };
            return Err(GitError::NonZeroExit {
                operation,
                code: output.status.code(),
                diagnostic: String::from_utf8_lossy(stream).into_owned(),
            });
        }

        Ok(output.stdout)
    }
}

impl GitExecutor for SystemGit {
    fn is_inside_work_tree(&self) -> Result<bool, GitError> {
        let output = self.output("rev-parse", ["rev-parse", "--is-inside-work-tree"])?;
        if !output.status.success() {
            debug!(
                "git rev-parse --is-inside-work-tree failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(false);
        }
        Ok(output.stdout.trim_ascii() == b"true")
    }

    fn staged_paths(&self) -> Result<Vec<OsString>, GitError> {
        let stdout = self.run("diff", ["diff", "--cached", "--name-only", "-z"])?;
        Ok(parse_path_list(&stdout))
    }

    fn status(&self) -> Result<Vec<u8>, GitError> {
        self.run("status", ["status", "--porcelain=v1", "-z"])
    }

    fn untracked_files_under(&self, dir: &OsStr) -> Result<Vec<OsString>, GitError> {
        let mut args: Vec<&OsStr> = ["ls-files", "--others", "--exclude-standard", "-z", "--"]
            .into_iter()
            .map(OsStr::new)
            .collect();
        args.push(dir);
        let stdout = self.run("ls-files", args)?;
        Ok(parse_path_list(&stdout))
    }

    fn stage(&self, paths: &[OsString]) -> Result<(), GitError> {
        let mut args: Vec<&OsStr> = ["add", "-A", "--"].into_iter().map(OsStr::new).collect();
        args.extend(paths.iter().map(OsString::as_os_str));
        self.run("add", args)?;
        Ok(())
    }

    fn commit(&self, message: &OsStr, no_verify: bool) -> Result<(), GitError> {
        let mut args: Vec<&OsStr> = vec![OsStr::new("commit")];
        if no_verify {
            args.push(OsStr::new("--no-verify"));
        }
        args.extend([OsStr::new("-m"), message]);
        self.run("commit", args)?;
        Ok(())
    }
}
