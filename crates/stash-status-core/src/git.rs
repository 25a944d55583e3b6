//! Resolve the commit a working copy is checked out at.

use std::path::{Component, Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::domain::{CommitId, GitError};

/// Locate `repository` inside `base_dir`.
///
/// The path is always taken relative to `base_dir`: a leading `/` is dropped
/// and an empty path names `base_dir` itself. `..` components are rejected.
pub fn repository_dir(base_dir: &Path, repository: &str) -> Result<PathBuf, GitError> {
    let mut dir = base_dir.to_path_buf();
    for component in Path::new(repository).components() {
        match component {
            Component::Normal(part) => dir.push(part),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
            Component::ParentDir => return Err(GitError::OutsideBase(repository.to_string())),
        }
    }
    Ok(dir)
}

/// Resolve the full HEAD commit of the working copy at `repo_dir`.
///
/// Runs `git rev-parse --short=40 HEAD`. This is a read-only inspection of
/// local state; any failure is final and must not be retried. The child is
/// killed if the returned future is dropped before it exits.
pub async fn resolve_head(repo_dir: &Path) -> Result<CommitId, GitError> {
    if !repo_dir.is_dir() {
        return Err(GitError::RepositoryNotFound(repo_dir.to_path_buf()));
    }

    let output = Command::new("git")
        .args(["rev-parse", "--short=40", "HEAD"])
        .current_dir(repo_dir)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(GitError::Spawn)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(GitError::CommandFailed { stderr });
    }

    let sha = String::from_utf8_lossy(&output.stdout)
        .trim_end_matches(['\r', '\n'])
        .to_string();
    CommitId::try_from(sha)
}
