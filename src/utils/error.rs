use thiserror::Error;

pub type Result<T> = std::result::Result<T, BranchHealthError>;

#[derive(Error, Debug)]
pub enum BranchHealthError {
    #[error("Not a git repository: {0}")]
    RepositoryNotFound(String),

    #[error("No commit history found for '{0}'")]
    NoActivityFound(String),

    #[error("Remote '{0}' does not exist")]
    RemoteNotFound(String),

    #[error("Git operation failed: {0}")]
    GitOperation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BranchHealthError {
    pub fn repository_not_found(path: impl Into<String>) -> Self {
        Self::RepositoryNotFound(path.into())
    }

    pub fn no_activity_found(ref_path: impl Into<String>) -> Self {
        Self::NoActivityFound(ref_path.into())
    }

    pub fn remote_not_found(remote: impl Into<String>) -> Self {
        Self::RemoteNotFound(remote.into())
    }

    pub fn git_operation(msg: impl Into<String>) -> Self {
        Self::GitOperation(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
