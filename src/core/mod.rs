pub mod branch;
pub mod git;
pub mod manager;

pub use branch::{Branch, HealthTier, RefKind};
pub use manager::BranchManager;
