//! commit-per-file - CLI entry point.

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commit_per_file::{GitError, SplitConfig, SplitError, SystemGit, run_split};

/// Commit each changed file separately (one commit per file) with simple messages.
#[derive(Parser, Debug)]
#[command(name = "commit-per-file")]
#[command(about = "Commit each changed file separately (one commit per file) with simple messages")]
#[command(version)]
struct Cli {
    /// Print the git commands that would run without modifying git state
    #[arg(long)]
    dry_run: bool,

    /// Prefix prepended verbatim to every commit message (e.g. "docs: ")
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    message_prefix: String,

    /// Pass --no-verify to git commit
    #[arg(long)]
    no_verify: bool,

    /// Log every git invocation
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let git = SystemGit::from_env()
        .context("git is required")?
        .anchored_at_toplevel()
        .context("Failed to locate the repository top level")?;

    let config = SplitConfig {
        dry_run: cli.dry_run,
        message_prefix: cli.message_prefix,
        no_verify: cli.no_verify,
    };

    let summary = run_split(&git, &config)?;

    if summary.changes > 0 {
        if summary.dry_run {
            println!("Dry run: {} commit(s) planned.", summary.commits());
        } else {
            println!("✓ Created {} commit(s).", summary.commits());
        }
    }

    Ok(())
}

/// Install the fmt subscriber, honouring RUST_LOG when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Relay git's own diagnostic verbatim, then describe the failure.
fn report(err: &anyhow::Error) {
    let diagnostic = err
        .downcast_ref::<SplitError>()
        .and_then(SplitError::diagnostic)
        .or_else(|| err.downcast_ref::<GitError>().and_then(GitError::diagnostic));

    let mut stderr = std::io::stderr().lock();
    if let Some(text) = diagnostic {
        let _ = stderr.write_all(text.as_bytes());
        if !text.ends_with('\n') {
            let _ = writeln!(stderr);
        }
    }
    let _ = writeln!(stderr, "Error: {:#}", err);
}

/// Exit with git's own status when a git invocation failed, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<SplitError>() {
        return e.exit_code();
    }
    if let Some(e) = err.downcast_ref::<GitError>() {
        return e.exit_code();
    }
    1
}
