use log::{debug, warn};
use std::collections::HashSet;
use std::path::PathBuf;

pub mod settings;

pub use settings::RepoSettings;

use crate::core::git::GitRepository;
use crate::utils::error::Result;

pub const DEFAULT_HEALTHY_DAYS: u32 = 14;
pub const DEFAULT_TRUNK_BRANCH: &str = "master";

/// Chooses which refs a run enumerates: local heads only, one named remote,
/// or every remote plus local heads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteSelector {
    Local,
    All,
    Remote(String),
}

/// Command-line values feeding config resolution. `None` fields mean the
/// flag was not given, so lower-precedence sources may fill them in.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub remote_selector: Option<RemoteSelector>,
    pub healthy_days: Option<u32>,
    pub bad_only: bool,
    pub no_color: bool,
    pub delete_old: bool,
    pub no_ignore: bool,
    pub trunk_branch: Option<String>,
    pub ignored_branches: Option<String>,
}

/// The single authoritative configuration for one run, resolved from the
/// command line, repository-level settings, and hard-coded defaults, in that
/// precedence order. Immutable once resolved.
#[derive(Debug, Clone)]
pub struct BranchHealthConfig {
    repository_path: PathBuf,
    remote_selector: RemoteSelector,
    healthy_days: u32,
    bad_only: bool,
    use_color: bool,
    delete_old: bool,
    trunk_branch: String,
    ignored_branches: HashSet<String>,
}

impl BranchHealthConfig {
    pub fn resolve(repo: &GitRepository, cli: CliOptions) -> Result<Self> {
        let settings = RepoSettings::load(repo)?;
        Ok(Self::resolve_from_parts(repo.root.clone(), cli, settings))
    }

    /// Pure three-tier merge; separated from `resolve` so it can be driven
    /// without a live repository.
    pub fn resolve_from_parts(
        repository_path: PathBuf,
        cli: CliOptions,
        settings: RepoSettings,
    ) -> Self {
        // Command-line "force off" wins over a repository setting that would
        // otherwise enable the feature.
        let use_color = !(cli.no_color || settings.nocolor);
        let ignore_enabled = !(cli.no_ignore || settings.noignore);

        let ignored_branches = if ignore_enabled {
            resolve_ignored_branches(
                cli.ignored_branches.as_deref(),
                settings.ignored_branches.as_deref(),
            )
        } else {
            debug!("branch ignore list disabled");
            forced_ignore_set(HashSet::new())
        };

        let trunk_branch = match (cli.trunk_branch, settings.trunk) {
            (Some(trunk), _) => {
                debug!("trunk branch '{}' taken from command line", trunk);
                trunk
            }
            (None, Some(trunk)) => {
                debug!("trunk branch '{}' taken from repository settings", trunk);
                trunk
            }
            (None, None) => DEFAULT_TRUNK_BRANCH.to_string(),
        };

        Self {
            repository_path,
            remote_selector: cli.remote_selector.unwrap_or(RemoteSelector::Local),
            healthy_days: cli.healthy_days.unwrap_or(DEFAULT_HEALTHY_DAYS),
            bad_only: cli.bad_only,
            use_color,
            delete_old: cli.delete_old,
            trunk_branch,
            ignored_branches,
        }
    }

    pub fn repository_path(&self) -> &PathBuf {
        &self.repository_path
    }

    pub fn remote_selector(&self) -> &RemoteSelector {
        &self.remote_selector
    }

    pub fn healthy_days(&self) -> u32 {
        self.healthy_days
    }

    pub fn bad_only(&self) -> bool {
        self.bad_only
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    pub fn should_delete_old_branches(&self) -> bool {
        self.delete_old
    }

    pub fn trunk_branch(&self) -> &str {
        &self.trunk_branch
    }

    pub fn ignored_branches(&self) -> &HashSet<String> {
        &self.ignored_branches
    }
}

/// Merges the command-line and repository ignore lists. When both sources
/// specify one, neither silently wins: the union is used and the divergence
/// is reported.
fn resolve_ignored_branches(cli: Option<&str>, repo: Option<&str>) -> HashSet<String> {
    let resolved = match (cli, repo) {
        (Some(from_cli), Some(from_repo)) => {
            let mut merged = parse_branch_list(from_cli);
            let repo_set = parse_branch_list(from_repo);
            if merged != repo_set {
                warn!(
                    "ignored-branch lists from the command line ({}) and repository settings ({}) differ; using the union",
                    from_cli.trim(),
                    from_repo.trim()
                );
            }
            merged.extend(repo_set);
            merged
        }
        (Some(from_cli), None) => {
            debug!("ignored branches taken from command line");
            parse_branch_list(from_cli)
        }
        (None, Some(from_repo)) => {
            debug!("ignored branches taken from repository settings");
            parse_branch_list(from_repo)
        }
        (None, None) => {
            let mut defaults = HashSet::new();
            defaults.insert(DEFAULT_TRUNK_BRANCH.to_string());
            defaults
        }
    };

    forced_ignore_set(resolved)
}

// HEAD is a detached-HEAD pseudo-branch and never meaningful to report.
fn forced_ignore_set(mut set: HashSet<String>) -> HashSet<String> {
    set.insert("HEAD".to_string());
    set
}

/// Comma-separated branch names; tokens are trimmed and duplicates collapse.
pub fn parse_branch_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}
