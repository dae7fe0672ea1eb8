//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Repository, Signature, Sort};

use commit_per_file::SystemGit;

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    ///
    /// The repository gets its own identity so `git commit` works regardless
    /// of the machine's global config.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");
        config
            .set_bool("commit.gpgsign", false)
            .expect("Failed to disable commit signing");

        Self { dir, repo }
    }

    /// Executor pinned to this repository's work tree.
    pub fn git(&self) -> SystemGit {
        SystemGit::new("git").with_work_dir(self.dir.path())
    }

    /// Write `contents` to `path` (relative to the work tree), creating parent dirs.
    pub fn write(&self, path: &str, contents: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&full, contents).expect("Failed to write test file");
    }

    /// Delete `path` from the work tree.
    pub fn remove(&self, path: &str) {
        std::fs::remove_file(self.dir.path().join(path)).expect("Failed to remove test file");
    }

    /// Stage `path` directly in the index, bypassing commit-per-file.
    pub fn stage(&self, path: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(path)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Commit every file currently in the work tree. Returns the commit OID.
    pub fn commit_all(&self, message: &str) -> git2::Oid {
        let sig =
            Signature::now("Test User", "test@example.com").expect("Failed to create signature");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to add files");
        index
            .update_all(["*"].iter(), None)
            .expect("Failed to update index");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Commit messages from oldest to newest.
    pub fn messages(&self) -> Vec<String> {
        self.commits()
            .iter()
            .map(|c| c.message().unwrap_or_default().trim_end().to_string())
            .collect()
    }

    /// Number of commits reachable from HEAD (0 for an unborn branch).
    pub fn commit_count(&self) -> usize {
        self.commits().len()
    }

    /// Paths touched by each commit, oldest first.
    pub fn files_per_commit(&self) -> Vec<Vec<String>> {
        self.commits()
            .iter()
            .map(|commit| {
                let tree = commit.tree().expect("Failed to read tree");
                let parent_tree = commit
                    .parent(0)
                    .ok()
                    .map(|p| p.tree().expect("Failed to read parent tree"));
                let diff = self
                    .repo
                    .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
                    .expect("Failed to diff commit");
                diff.deltas()
                    .filter_map(|d| d.new_file().path().or(d.old_file().path()))
                    .map(|p| p.to_string_lossy().to_string())
                    .collect()
            })
            .collect()
    }

    /// Whether the index differs from HEAD.
    pub fn has_staged_changes(&self) -> bool {
        let head_tree = self.repo.head().ok().and_then(|h| h.peel_to_tree().ok());
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), None, None)
            .expect("Failed to diff index");
        diff.deltas().len() > 0
    }

    fn commits(&self) -> Vec<git2::Commit<'_>> {
        let Ok(head) = self.repo.head() else {
            return Vec::new();
        };
        let head = head.peel_to_commit().expect("HEAD is not a commit");

        let mut walk = self.repo.revwalk().expect("Failed to create revwalk");
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)
            .expect("Failed to set sorting");
        walk.push(head.id()).expect("Failed to push HEAD");
        walk.map(|oid| {
            self.repo
                .find_commit(oid.expect("Failed to walk history"))
                .expect("Failed to find commit")
        })
        .collect()
    }
}
