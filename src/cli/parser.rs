use clap::Parser;
use std::path::PathBuf;

use crate::config::{CliOptions, RemoteSelector};

#[derive(Parser, Debug)]
#[command(name = "git-branchhealth")]
#[command(about = "Show health (time since last activity) of git branches, in order")]
#[command(version)]
pub struct Cli {
    /// Increase output verbosity (repeat for more: -v, -vv, -vvv, -vvvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only show branches that are ready for pruning (older than days * 2)
    #[arg(short = 'b', long = "bad-only")]
    pub bad_only: bool,

    /// Number of days after which a branch is no longer considered healthy
    #[arg(short = 'd', long = "days", value_name = "DAYS", default_value_t = 14)]
    pub days: u32,

    /// Don't use ANSI colors to display branch health
    #[arg(short = 'n', long = "no-color")]
    pub no_color: bool,

    /// Path to the git repository where branches should be listed
    /// [default: current directory]
    #[arg(
        short = 'R',
        long = "repository",
        value_name = "PATH",
        num_args = 0..=1
    )]
    pub repository: Option<Option<PathBuf>>,

    /// Delete old branches that are considered unhealthy
    #[arg(short = 'D', long = "delete")]
    pub delete_old: bool,

    /// Comma-separated list of branch names to ignore [default: master]
    #[arg(short = 'i', long = "ignore-branches", value_name = "BRANCHES")]
    pub ignored_branches: Option<String>,

    /// Trunk branch name for the repository [default: master]
    #[arg(short = 't', long = "trunk", value_name = "BRANCH")]
    pub trunk_branch: Option<String>,

    /// Do not ignore any branches
    #[arg(long = "no-ignore")]
    pub no_ignore: bool,

    /// Operate on the specified remote only
    #[arg(
        short = 'r',
        long = "remote",
        value_name = "REMOTE",
        conflicts_with = "all_remotes"
    )]
    pub remote: Option<String>,

    /// Check branch health for all remotes, plus local branches
    #[arg(long = "all-remotes")]
    pub all_remotes: bool,
}

impl Cli {
    pub fn remote_selector(&self) -> Option<RemoteSelector> {
        if self.all_remotes {
            Some(RemoteSelector::All)
        } else {
            self.remote
                .as_ref()
                .map(|name| RemoteSelector::Remote(name.clone()))
        }
    }

    pub fn to_options(&self) -> CliOptions {
        CliOptions {
            remote_selector: self.remote_selector(),
            healthy_days: Some(self.days),
            bad_only: self.bad_only,
            no_color: self.no_color,
            delete_old: self.delete_old,
            no_ignore: self.no_ignore,
            trunk_branch: self.trunk_branch.clone(),
            ignored_branches: self.ignored_branches.clone(),
        }
    }
}
