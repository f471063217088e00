pub mod repository;

pub use repository::{GitRepository, LOCAL_REF_PREFIX, REMOTE_REF_PREFIX};
