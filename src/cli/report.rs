use console::style;
use log::debug;

use crate::config::BranchHealthConfig;
use crate::core::branch::{Branch, HealthTier};
use crate::core::git::GitRepository;
use crate::core::manager::BranchManager;
use crate::utils::error::Result;

const PATH_COLUMN_WIDTH: usize = 40;

/// Runs the branch health report: enumerates and classifies branches, prints
/// the chart, and deletes the old ones when configured to.
pub fn execute(repo: &GitRepository, config: &BranchHealthConfig) -> Result<()> {
    debug!("operating on repository in {}", repo.root.display());
    debug!("remote selector: {:?}", config.remote_selector());

    let mut manager = BranchManager::new(repo, config);
    let branches = manager.branch_map()?.to_vec();

    let delete_bucket = print_branch_health_chart(&branches, config);

    if config.should_delete_old_branches() {
        manager.delete_all_old_branches(&delete_bucket);
    }

    Ok(())
}

/// Prints one line per surfaced branch and returns the branches that
/// classified as old. The input is assumed pre-sorted.
fn print_branch_health_chart(branches: &[Branch], config: &BranchHealthConfig) -> Vec<Branch> {
    let mut delete_bucket = Vec::new();

    for branch in branches {
        // The manager marks every branch before returning the map.
        let Some(health) = branch.health() else {
            continue;
        };

        if health == HealthTier::Old {
            delete_bucket.push(branch.clone());
        }

        if config.bad_only() && health != HealthTier::Old {
            continue;
        }

        println!(
            "{:<width$} {}",
            format!("{}:", branch.path()),
            render_activity(branch.last_activity_relative(), health, config.use_color()),
            width = PATH_COLUMN_WIDTH
        );
    }

    delete_bucket
}

fn render_activity(relative: &str, health: HealthTier, use_color: bool) -> String {
    if !use_color {
        return relative.to_string();
    }

    let styled = match health {
        HealthTier::Healthy => style(relative).green(),
        HealthTier::Aged => style(relative).yellow(),
        HealthTier::Old => style(relative).red(),
    };
    styled.to_string()
}
