// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};

use super::Matcher;
use crate::resources::Resource;

/// Requested status class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Added,
    Modified,
    Unmodified,
    Untracked,
}

/// One dimension of a file's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unmodified,
    Modified,
    Untracked,
}

/// Staged and working-tree status of one file, relative to the repository
/// root.
#[derive(Debug, Clone, Copy)]
struct FileState {
    staging: State,
    worktree: State,
}

/// Matches resources based on the current git status of the underlying
/// manifest file.
///
/// The repository is discovered from the working directory and its status
/// snapshotted once at construction; resources decoded from files that are
/// `added`/`a`/`A`, `modified`/`m`/`M`, `unmodified`/`u`/`U` or
/// `untracked`/`?` (per the snapshot) match. A resource that was not
/// decoded from a file never matches, and a file absent from the snapshot
/// counts as untracked.
pub struct GitMatcher {
    /// Working directory relative to the repository root; resource
    /// filenames are relative to the working directory while the snapshot
    /// is keyed by repository-relative paths.
    rel_root: PathBuf,
    status: HashMap<String, FileState>,
    class: Class,
}

impl GitMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to determine working directory")?;

        let repository = git2::Repository::discover(&current_dir)
            .context("Failed to discover a git repository")?;
        let workdir = repository
            .workdir()
            .context("Bare repository has no working tree")?
            .to_path_buf();

        let mut options = git2::StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_unmodified(false);

        let statuses = repository
            .statuses(Some(&mut options))
            .context("Failed to read git status")?;

        let rel_root = current_dir
            .strip_prefix(&workdir)
            .unwrap_or(Path::new(""))
            .to_path_buf();

        Self::with_status(&rel_root, snapshot(&statuses), pattern)
    }

    /// Constructor over a prebuilt snapshot, also used by tests.
    fn with_status(
        rel_root: &Path,
        status: HashMap<String, FileState>,
        pattern: &str,
    ) -> Result<Self> {
        let class = match pattern {
            "added" | "a" | "A" => Class::Added,
            "modified" | "m" | "M" => Class::Modified,
            "unmodified" | "u" | "U" | " " => Class::Unmodified,
            "untracked" | "?" => Class::Untracked,
            _ => bail!("unsupported git status pattern: {:?}", pattern),
        };

        Ok(Self {
            rel_root: rel_root.to_path_buf(),
            status,
            class,
        })
    }
}

impl Matcher for GitMatcher {
    fn matches(&self, item: &Resource) -> bool {
        let Some(filename) = item.filename() else {
            return false;
        };

        let full = normalize(&self.rel_root.join(filename));

        // Files the status snapshot does not mention are untracked in both
        // dimensions.
        let state = self.status.get(&full).copied().unwrap_or(FileState {
            staging: State::Untracked,
            worktree: State::Untracked,
        });

        match self.class {
            Class::Added => state.staging == State::Modified,
            Class::Modified => {
                state.staging == State::Modified || state.worktree == State::Modified
            }
            Class::Unmodified => {
                state.staging == State::Unmodified && state.worktree == State::Unmodified
            }
            Class::Untracked => {
                state.staging == State::Untracked && state.worktree == State::Untracked
            }
        }
    }
}

fn snapshot(statuses: &git2::Statuses<'_>) -> HashMap<String, FileState> {
    let mut snapshot = HashMap::new();

    for entry in statuses.iter() {
        let Some(path) = entry.path() else {
            continue;
        };
        let status = entry.status();

        // A file unknown to the index is untracked in both dimensions.
        if status.contains(git2::Status::WT_NEW) {
            snapshot.insert(
                path.to_string(),
                FileState {
                    staging: State::Untracked,
                    worktree: State::Untracked,
                },
            );
            continue;
        }

        let staging = if status.intersects(
            git2::Status::INDEX_NEW
                | git2::Status::INDEX_MODIFIED
                | git2::Status::INDEX_DELETED
                | git2::Status::INDEX_RENAMED
                | git2::Status::INDEX_TYPECHANGE,
        ) {
            State::Modified
        } else {
            State::Unmodified
        };

        let worktree = if status.intersects(
            git2::Status::WT_MODIFIED
                | git2::Status::WT_DELETED
                | git2::Status::WT_RENAMED
                | git2::Status::WT_TYPECHANGE,
        ) {
            State::Modified
        } else {
            State::Unmodified
        };

        snapshot.insert(path.to_string(), FileState { staging, worktree });
    }

    snapshot
}

/// Joins and cleans a path into the `/`-separated form git status uses.
fn normalize(path: &Path) -> String {
    let parts: Vec<_> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::testutil::assert_matches;

    fn state(staging: State, worktree: State) -> FileState {
        FileState { staging, worktree }
    }

    fn status_at_root() -> HashMap<String, FileState> {
        HashMap::from([
            (
                "testdata/service.yaml".to_string(),
                state(State::Unmodified, State::Modified),
            ),
            (
                "testdata/subdir/deployment.yaml".to_string(),
                state(State::Unmodified, State::Modified),
            ),
        ])
    }

    fn status_at_subdir() -> HashMap<String, FileState> {
        HashMap::from([
            (
                "subdir/testdata/service.yaml".to_string(),
                state(State::Modified, State::Unmodified),
            ),
            (
                "subdir/testdata/subdir/deployment.yaml".to_string(),
                state(State::Unmodified, State::Modified),
            ),
            (
                "subdir/testdata/subdir/subsubdir/configmap.yaml".to_string(),
                state(State::Unmodified, State::Unmodified),
            ),
        ])
    }

    #[test]
    fn test_modified_at_repo_root() {
        let matcher = GitMatcher::with_status(Path::new(""), status_at_root(), "m").unwrap();
        assert_matches(
            &matcher,
            &["Service/my-service", "Deployment/nginx-deployment"],
        );
    }

    #[test]
    fn test_modified_at_repo_subdir() {
        let matcher =
            GitMatcher::with_status(Path::new("subdir"), status_at_subdir(), "M").unwrap();
        assert_matches(
            &matcher,
            &["Service/my-service", "Deployment/nginx-deployment"],
        );
    }

    #[test]
    fn test_added() {
        let matcher =
            GitMatcher::with_status(Path::new("subdir"), status_at_subdir(), "added").unwrap();
        assert_matches(&matcher, &["Service/my-service"]);
    }

    #[test]
    fn test_unmodified() {
        let matcher =
            GitMatcher::with_status(Path::new("subdir"), status_at_subdir(), "unmodified")
                .unwrap();
        assert_matches(&matcher, &["ConfigMap/my-configmap"]);
    }

    #[test]
    fn test_untracked() {
        // The pod and clusterrolebinding fixtures are absent from the
        // snapshot and therefore untracked.
        let matcher =
            GitMatcher::with_status(Path::new("subdir"), status_at_subdir(), "?").unwrap();
        assert_matches(
            &matcher,
            &["Pod/test-pod", "ClusterRoleBinding/read-secrets-global"],
        );
    }

    #[test]
    fn test_no_filename_never_matches() {
        let matcher =
            GitMatcher::with_status(Path::new(""), HashMap::new(), "untracked").unwrap();
        let item = Resource::new(serde_json::json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"name": "test-pod"},
        }));

        assert!(!matcher.matches(&item));
    }

    #[test]
    fn test_unsupported_pattern_rejected() {
        assert!(GitMatcher::with_status(Path::new(""), HashMap::new(), "bogus").is_err());
    }
}
