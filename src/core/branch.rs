use crate::core::git::{GitRepository, REMOTE_REF_PREFIX};
use crate::utils::error::Result;
use crate::utils::time;
use chrono::{DateTime, NaiveDate, Utc};

/// Staleness classification of a branch, relative to the configured number
/// of "healthy" days D: age <= D is healthy, age <= 2*D is aged, anything
/// older is old.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    Healthy,
    Aged,
    Old,
}

/// Discriminates local heads from remote-tracking refs; the remote name
/// carried here selects the deletion strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefKind {
    Local,
    Remote { remote: String },
}

impl RefKind {
    pub fn from_path(path: &str) -> Self {
        if let Some(rest) = path.strip_prefix(REMOTE_REF_PREFIX) {
            if let Some(remote) = rest.split('/').next() {
                if !remote.is_empty() {
                    return RefKind::Remote {
                        remote: remote.to_string(),
                    };
                }
            }
        }
        RefKind::Local
    }
}

/// One branch reference with its last-activity timestamp and health state.
///
/// The health tier is not computed at construction; `mark_health` must be
/// called before `health` is consulted. The relative-activity string is
/// computed once at construction, which is safe because `last_activity`
/// never changes afterwards.
#[derive(Debug, Clone)]
pub struct Branch {
    path: String,
    kind: RefKind,
    last_activity: DateTime<Utc>,
    last_activity_relative: String,
    health: Option<HealthTier>,
}

impl Branch {
    /// Builds a Branch by querying the repository for the ref's most recent
    /// commit timestamp. Fails with `NoActivityFound` for a ref without
    /// commit history.
    pub fn from_ref(repo: &GitRepository, path: &str) -> Result<Self> {
        let last_activity = repo.last_commit_timestamp(path)?;
        Ok(Self::with_activity(path, last_activity))
    }

    pub fn with_activity(path: &str, last_activity: DateTime<Utc>) -> Self {
        Self {
            path: path.to_string(),
            kind: RefKind::from_path(path),
            last_activity,
            last_activity_relative: time::format_relative(last_activity, Utc::now()),
            health: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Short name: the last segment of the ref path.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn kind(&self) -> &RefKind {
        &self.kind
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.kind, RefKind::Remote { .. })
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn last_activity_relative(&self) -> &str {
        &self.last_activity_relative
    }

    /// Classifies this branch against the healthy-days threshold. Must be
    /// called before `health` is read.
    pub fn mark_health(&mut self, healthy_days: u32) {
        self.health = Some(classify(
            self.last_activity.date_naive(),
            healthy_days,
            Utc::now().date_naive(),
        ));
    }

    /// `None` until `mark_health` has been called.
    pub fn health(&self) -> Option<HealthTier> {
        self.health
    }
}

/// Age is the calendar-date difference in whole days, so commits from "this
/// morning" and "last night" count the same number of days.
fn classify(last_activity: NaiveDate, healthy_days: u32, today: NaiveDate) -> HealthTier {
    let age = (today - last_activity).num_days();
    let threshold = i64::from(healthy_days);

    if age > 2 * threshold {
        HealthTier::Old
    } else if age > threshold {
        HealthTier::Aged
    } else {
        HealthTier::Healthy
    }
}
