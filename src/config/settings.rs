use crate::core::git::GitRepository;
use crate::utils::error::{BranchHealthError, Result};
use std::process::Command;

const CONFIG_SECTION: &str = "branchhealth";

/// Persisted repository-level settings, read from the `branchhealth` section
/// of git config. A missing key or section is a "use default" signal, never
/// an error.
#[derive(Debug, Clone, Default)]
pub struct RepoSettings {
    pub nocolor: bool,
    pub noignore: bool,
    pub ignored_branches: Option<String>,
    pub trunk: Option<String>,
}

impl RepoSettings {
    pub fn load(repo: &GitRepository) -> Result<Self> {
        Ok(Self {
            nocolor: read_bool(repo, "nocolor")?,
            noignore: read_bool(repo, "noignore")?,
            ignored_branches: read_value(repo, "ignoredbranches", false)?,
            trunk: read_value(repo, "trunk", false)?,
        })
    }
}

fn read_bool(repo: &GitRepository, key: &str) -> Result<bool> {
    Ok(read_value(repo, key, true)?
        .map(|v| v == "true")
        .unwrap_or(false))
}

fn read_value(repo: &GitRepository, key: &str, as_bool: bool) -> Result<Option<String>> {
    let full_key = format!("{}.{}", CONFIG_SECTION, key);
    let mut args = vec!["config"];
    if as_bool {
        args.push("--bool");
    }
    args.push("--get");
    args.push(&full_key);

    let output = Command::new("git")
        .current_dir(&repo.root)
        .args(&args)
        .output()
        .map_err(|e| BranchHealthError::git_operation(format!("Failed to execute git: {}", e)))?;

    // git config --get exits non-zero for an unset key.
    if !output.status.success() {
        return Ok(None);
    }

    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(Some(value))
}
