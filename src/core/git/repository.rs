use crate::utils::error::{BranchHealthError, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::process::Command;

pub const LOCAL_REF_PREFIX: &str = "refs/heads/";
pub const REMOTE_REF_PREFIX: &str = "refs/remotes/";

#[derive(Debug, Clone)]
pub struct GitRepository {
    pub root: PathBuf,
}

impl GitRepository {
    pub fn discover() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            BranchHealthError::git_operation(format!("Failed to get current directory: {}", e))
        })?;

        Self::discover_from(&current_dir)
    }

    pub fn discover_from(path: &Path) -> Result<Self> {
        let output = Command::new("git")
            .current_dir(path)
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .map_err(|e| {
                BranchHealthError::git_operation(format!("Failed to execute git: {}", e))
            })?;

        if !output.status.success() {
            return Err(BranchHealthError::repository_not_found(
                path.display().to_string(),
            ));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self {
            root: PathBuf::from(root),
        })
    }

    /// Full ref paths of all local branch heads, in git's own ref order.
    pub fn list_local_refs(&self) -> Result<Vec<String>> {
        let output = execute_git_command(
            self,
            &["for-each-ref", "--format=%(refname)", LOCAL_REF_PREFIX],
        )?;
        Ok(split_lines(&output))
    }

    pub fn list_remotes(&self) -> Result<Vec<String>> {
        let output = execute_git_command(self, &["remote"])?;
        Ok(split_lines(&output))
    }

    /// Full ref paths of the remote-tracking branches under one named remote.
    pub fn list_refs_for_remote(&self, remote: &str) -> Result<Vec<String>> {
        if !self.list_remotes()?.iter().any(|r| r == remote) {
            return Err(BranchHealthError::remote_not_found(remote));
        }

        let prefix = format!("{}{}/", REMOTE_REF_PREFIX, remote);
        let output = execute_git_command(self, &["for-each-ref", "--format=%(refname)", &prefix])?;
        Ok(split_lines(&output))
    }

    /// Committer timestamp of the most recent commit reachable from a ref,
    /// normalized to UTC.
    pub fn last_commit_timestamp(&self, ref_path: &str) -> Result<DateTime<Utc>> {
        let output = execute_git_command(self, &["log", "-1", "--format=%cI", ref_path, "--"])
            .map_err(|_| BranchHealthError::no_activity_found(ref_path))?;

        if output.is_empty() {
            return Err(BranchHealthError::no_activity_found(ref_path));
        }

        let timestamp = DateTime::parse_from_rfc3339(&output).map_err(|e| {
            BranchHealthError::git_operation(format!(
                "Unparseable commit timestamp '{}' for '{}': {}",
                output, ref_path, e
            ))
        })?;

        Ok(timestamp.with_timezone(&Utc))
    }

    pub fn local_branch_exists(&self, name: &str) -> Result<bool> {
        let result = execute_git_command(
            self,
            &[
                "show-ref",
                "--verify",
                "--quiet",
                &format!("{}{}", LOCAL_REF_PREFIX, name),
            ],
        );
        Ok(result.is_ok())
    }

    pub fn delete_local_ref(&self, name: &str) -> Result<()> {
        execute_git_command(self, &["branch", "-D", name]).map(|_| ())
    }

    /// Deletes the remote-tracking ref only; the branch on the remote itself
    /// is never touched.
    pub fn delete_remote_ref(&self, remote: &str, name: &str) -> Result<()> {
        execute_git_command(
            self,
            &["branch", "-r", "-D", &format!("{}/{}", remote, name)],
        )
        .map(|_| ())
    }
}

pub fn execute_git_command(repo: &GitRepository, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .current_dir(&repo.root)
        .args(args)
        .output()
        .map_err(|e| BranchHealthError::git_operation(format!("Failed to execute git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BranchHealthError::git_operation(format!(
            "Git command failed ({}): {}",
            args.join(" "),
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.trim().to_string())
}

fn split_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
