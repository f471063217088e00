pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

pub use crate::config::{BranchHealthConfig, CliOptions, RemoteSelector, RepoSettings};
pub use crate::core::branch::{Branch, HealthTier, RefKind};
pub use crate::core::git::GitRepository;
pub use crate::core::manager::BranchManager;
pub use crate::utils::{BranchHealthError, Result};
