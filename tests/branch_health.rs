use branchhealth::{
    BranchHealthConfig, BranchManager, CliOptions, GitRepository, HealthTier, RemoteSelector,
};
use chrono::{Duration, Utc};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git(repo_path: &Path, args: &[&str]) {
    let status = Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

fn commit_file(repo_path: &Path, file: &str, days_ago: i64) {
    fs::write(repo_path.join(file), file).expect("Failed to write file");
    git(repo_path, &["add", file]);

    let when = (Utc::now() - Duration::days(days_ago)).to_rfc3339();
    let status = Command::new("git")
        .current_dir(repo_path)
        .env("GIT_AUTHOR_DATE", &when)
        .env("GIT_COMMITTER_DATE", &when)
        .args(["commit", "-m", &format!("add {}", file)])
        .status()
        .expect("Failed to run git commit");
    assert!(status.success());
}

fn branch_with_commit(repo_path: &Path, name: &str, days_ago: i64) {
    git(repo_path, &["checkout", "-b", name, "master"]);
    commit_file(repo_path, &format!("{}.txt", name), days_ago);
    git(repo_path, &["checkout", "master"]);
}

/// Local branches bug-14 (oldest) through bug-143 (newest), plus master,
/// each with a distinct last-commit age.
fn setup_test_repo() -> (TempDir, GitRepository) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let repo_path = temp_dir.path();

    git(repo_path, &["init", "--initial-branch=master"]);
    git(repo_path, &["config", "user.name", "Test User"]);
    git(repo_path, &["config", "user.email", "test@example.com"]);
    commit_file(repo_path, "README.md", 50);

    branch_with_commit(repo_path, "bug-14", 40);
    branch_with_commit(repo_path, "bug-44", 30);
    branch_with_commit(repo_path, "bug-27", 20);
    branch_with_commit(repo_path, "bug-143", 10);

    let repo = GitRepository::discover_from(repo_path).expect("Failed to discover repo");
    (temp_dir, repo)
}

fn names(branches: &[branchhealth::Branch]) -> Vec<&str> {
    branches.iter().map(|b| b.name()).collect()
}

#[test]
fn test_report_orders_oldest_first_and_marks_everything_old() {
    let (_temp_dir, repo) = setup_test_repo();

    let cli = CliOptions {
        healthy_days: Some(1),
        ..Default::default()
    };
    let config = BranchHealthConfig::resolve(&repo, cli).expect("Failed to resolve config");
    let mut manager = BranchManager::new(&repo, &config);

    let branches = manager.branch_map().expect("Failed to build branch map");
    assert_eq!(names(branches), vec!["bug-14", "bug-44", "bug-27", "bug-143"]);
    for branch in branches {
        assert_eq!(branch.health(), Some(HealthTier::Old));
    }
}

#[test]
fn test_brand_new_branch_is_healthy() {
    let (_temp_dir, repo) = setup_test_repo();
    branch_with_commit(&repo.root, "a-new-branch", 0);

    let config = BranchHealthConfig::resolve(&repo, CliOptions::default())
        .expect("Failed to resolve config");
    let mut manager = BranchManager::new(&repo, &config);

    let branches = manager.branch_map().expect("Failed to build branch map");
    let fresh = branches
        .iter()
        .find(|b| b.name() == "a-new-branch")
        .expect("new branch missing from map");
    assert_eq!(fresh.health(), Some(HealthTier::Healthy));
}

#[test]
fn test_ignore_lists_from_both_sources_union() {
    let (_temp_dir, repo) = setup_test_repo();
    git(
        &repo.root,
        &["config", "branchhealth.ignoredbranches", "bug-27"],
    );

    let cli = CliOptions {
        ignored_branches: Some("bug-143".to_string()),
        ..Default::default()
    };
    let config = BranchHealthConfig::resolve(&repo, cli).expect("Failed to resolve config");

    let expected: std::collections::HashSet<String> = ["HEAD", "bug-143", "bug-27"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(config.ignored_branches(), &expected);

    // The ignored branches stay out of the report; master, no longer
    // ignored, is the oldest branch and sorts first.
    let mut manager = BranchManager::new(&repo, &config);
    let branches = manager.branch_map().expect("Failed to build branch map");
    assert_eq!(names(branches), vec!["master", "bug-14", "bug-44"]);
}

#[test]
fn test_repo_settings_win_over_defaults() {
    let (_temp_dir, repo) = setup_test_repo();
    git(
        &repo.root,
        &["config", "branchhealth.ignoredbranches", "bug-27"],
    );
    git(&repo.root, &["config", "branchhealth.trunk", "bug-44"]);
    git(&repo.root, &["config", "branchhealth.nocolor", "true"]);

    let config = BranchHealthConfig::resolve(&repo, CliOptions::default())
        .expect("Failed to resolve config");

    let expected: std::collections::HashSet<String> =
        ["HEAD", "bug-27"].iter().map(|s| s.to_string()).collect();
    assert_eq!(config.ignored_branches(), &expected);
    assert_eq!(config.trunk_branch(), "bug-44");
    assert!(!config.use_color());
}

#[test]
fn test_deleting_old_branches_leaves_only_trunk() {
    let (_temp_dir, repo) = setup_test_repo();

    let cli = CliOptions {
        healthy_days: Some(1),
        delete_old: true,
        ..Default::default()
    };
    let config = BranchHealthConfig::resolve(&repo, cli).expect("Failed to resolve config");
    let mut manager = BranchManager::new(&repo, &config);

    let branches = manager
        .branch_map()
        .expect("Failed to build branch map")
        .to_vec();
    manager.delete_all_old_branches(&branches);

    let remaining = repo.list_local_refs().expect("Failed to list local refs");
    assert_eq!(remaining, vec!["refs/heads/master"]);
}

#[test]
fn test_all_remotes_report_includes_remote_and_local_branches() {
    let (_temp_dir, repo) = setup_test_repo();
    git(&repo.root, &["remote", "add", "origin", "."]);
    git(
        &repo.root,
        &[
            "update-ref",
            "refs/remotes/origin/bug-14",
            "refs/heads/bug-14",
        ],
    );

    let cli = CliOptions {
        remote_selector: Some(RemoteSelector::All),
        ..Default::default()
    };
    let config = BranchHealthConfig::resolve(&repo, cli).expect("Failed to resolve config");
    let mut manager = BranchManager::new(&repo, &config);

    let branches = manager.branch_map().expect("Failed to build branch map");

    // The same-named branch appears once per source; equal timestamps keep
    // enumeration order, so the remote copy sorts ahead of the local one.
    let paths: Vec<&str> = branches.iter().map(|b| b.path()).collect();
    assert_eq!(
        paths,
        vec![
            "refs/remotes/origin/bug-14",
            "refs/heads/bug-14",
            "refs/heads/bug-44",
            "refs/heads/bug-27",
            "refs/heads/bug-143",
        ]
    );
}
