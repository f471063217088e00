pub mod parser;
pub mod report;

pub use parser::Cli;

use clap::CommandFactory;
use std::path::PathBuf;

use crate::config::BranchHealthConfig;
use crate::core::git::GitRepository;
use crate::utils::error::Result;

pub fn execute_command(cli: Cli) -> Result<()> {
    let repo_path = match cli.repository {
        // -R given with no value: no repository path resolves, so show usage.
        Some(None) => {
            Cli::command().print_help()?;
            return Ok(());
        }
        Some(Some(ref path)) => path.clone(),
        None => PathBuf::from("."),
    };

    let repo = GitRepository::discover_from(&repo_path)?;
    let config = BranchHealthConfig::resolve(&repo, cli.to_options())?;

    report::execute(&repo, &config)
}
