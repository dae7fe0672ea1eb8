//! Split pipeline: turn the working tree's changes into one commit each.
//!
//! Orchestrates preflight checks, change detection, and the per-change
//! stage/commit sequence.

pub mod plan;
pub mod preflight;

use tracing::{debug, info};

use crate::error::SplitError;
use crate::git::GitExecutor;
use crate::status::detect_changes;

pub use self::plan::{Operation, plan_change};
pub use self::preflight::run_checks;

/// Configuration for a run, derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct SplitConfig {
    /// Print operations instead of executing them.
    pub dry_run: bool,
    /// Prepended verbatim to every commit message.
    pub message_prefix: String,
    /// Pass `--no-verify` to `git commit`.
    pub no_verify: bool,
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    /// Number of changes detected (one commit each).
    pub changes: usize,
    /// Operations executed, or only printed on a dry run, in order.
    pub operations: Vec<Operation>,
    pub dry_run: bool,
}

impl SplitSummary {
    /// Number of commits created (or planned, on a dry run).
    pub fn commits(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Commit { .. }))
            .count()
    }
}

/// Run the full split pipeline.
///
/// Stops at the first failing git operation; commits created before the
/// failure are kept.
pub fn run_split<G: GitExecutor>(
    git: &G,
    config: &SplitConfig,
) -> Result<SplitSummary, SplitError> {
    // ── Stage 1: Preflight checks ──
    run_checks(git)?;

    // ── Stage 2: Change detection ──
    let changes = detect_changes(git)?;
    debug!("Detected {} change(s)", changes.len());

    if changes.is_empty() {
        println!("No changes to commit.");
        return Ok(SplitSummary {
            changes: 0,
            operations: Vec::new(),
            dry_run: config.dry_run,
        });
    }

    // ── Stage 3: One commit per change ──
    let total = changes.len();
    let mut operations = Vec::with_capacity(total * 2);

    for (index, change) in changes.iter().enumerate() {
        for op in plan_change(change, config) {
            if config.dry_run {
                println!("+ {}", op);
            } else {
                debug!("{}", op);
                op.execute(git)?;
            }
            operations.push(op);
        }

        if !config.dry_run {
            info!(action = %change.action(), code = change.status_code(), "Committed change");
            println!(
                "[{}/{}] {}",
                index + 1,
                total,
                change.commit_message(&config.message_prefix).to_string_lossy()
            );
        }
    }

    Ok(SplitSummary {
        changes: total,
        operations,
        dry_run: config.dry_run,
    })
}
