use log::{debug, warn};

use crate::config::{BranchHealthConfig, RemoteSelector};
use crate::core::branch::{Branch, RefKind};
use crate::core::git::GitRepository;
use crate::utils::error::{BranchHealthError, Result};

/// Enumerates, filters, classifies, orders, and optionally deletes branches.
///
/// The branch map is memoized for the lifetime of the manager; the branch
/// set is assumed stable for one run. Callers must run one manager at a time
/// against a given repository.
pub struct BranchManager<'a> {
    repo: &'a GitRepository,
    config: &'a BranchHealthConfig,
    branch_map: Option<Vec<Branch>>,
}

impl<'a> BranchManager<'a> {
    pub fn new(repo: &'a GitRepository, config: &'a BranchHealthConfig) -> Self {
        Self {
            repo,
            config,
            branch_map: None,
        }
    }

    /// The filtered branch list, sorted by last activity ascending (most
    /// unhealthy first), with every branch's health tier already computed.
    pub fn branch_map(&mut self) -> Result<&[Branch]> {
        if self.branch_map.is_none() {
            self.branch_map = Some(self.build_branch_map()?);
        }
        Ok(self.branch_map.as_deref().unwrap_or_default())
    }

    fn build_branch_map(&self) -> Result<Vec<Branch>> {
        let mut branches = Vec::new();

        for ref_path in self.collect_refs()? {
            let short_name = ref_path.rsplit('/').next().unwrap_or(&ref_path);
            if self.config.ignored_branches().contains(short_name) {
                debug!("ignoring branch '{}'", ref_path);
                continue;
            }

            match Branch::from_ref(self.repo, &ref_path) {
                Ok(branch) => branches.push(branch),
                Err(BranchHealthError::NoActivityFound(_)) => {
                    warn!("no commit history found for '{}'; skipping it", ref_path);
                }
                Err(e) => return Err(e),
            }
        }

        // Stable sort: equal timestamps keep their enumeration order.
        branches.sort_by(|a, b| a.last_activity().cmp(&b.last_activity()));

        for branch in &mut branches {
            branch.mark_health(self.config.healthy_days());
        }

        Ok(branches)
    }

    /// Raw ref paths for the configured remote selector. With `All`, every
    /// remote contributes its refs first (a same-named branch on two remotes
    /// appears twice), then local heads follow.
    fn collect_refs(&self) -> Result<Vec<String>> {
        match self.config.remote_selector() {
            RemoteSelector::Local => self.repo.list_local_refs(),
            RemoteSelector::Remote(name) => self.refs_for_remote(name),
            RemoteSelector::All => {
                let mut refs = Vec::new();
                for remote in self.repo.list_remotes()? {
                    refs.extend(self.refs_for_remote(&remote)?);
                }
                refs.extend(self.repo.list_local_refs()?);
                Ok(refs)
            }
        }
    }

    fn refs_for_remote(&self, remote: &str) -> Result<Vec<String>> {
        match self.repo.list_refs_for_remote(remote) {
            Ok(refs) => Ok(refs),
            Err(BranchHealthError::RemoteNotFound(name)) => {
                warn!("remote '{}' does not exist; nothing to list for it", name);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Deletes each given branch, skipping the trunk branch. Deletion is not
    /// transactional: a failure is logged and the loop moves on.
    pub fn delete_all_old_branches(&self, branches: &[Branch]) {
        for branch in branches {
            if let Err(e) = self.delete_old_branch(branch, true) {
                warn!("failed to delete '{}': {}", branch.path(), e);
            }
        }
    }

    fn delete_old_branch(&self, branch: &Branch, delete_local: bool) -> Result<()> {
        if branch.name() == self.config.trunk_branch() {
            warn!(
                "cowardly refusing to delete trunk branch '{}'",
                branch.path()
            );
            return Ok(());
        }

        match branch.kind() {
            RefKind::Local => {
                debug!("deleting local branch '{}'", branch.path());
                self.repo.delete_local_ref(branch.name())
            }
            RefKind::Remote { remote } => {
                debug!("deleting remote-tracking branch '{}'", branch.path());
                self.repo.delete_remote_ref(remote, branch.name())?;

                // Cascade to the local branch of the same name, if one exists.
                if delete_local && self.repo.local_branch_exists(branch.name())? {
                    debug!("deleting local counterpart of '{}'", branch.path());
                    self.repo.delete_local_ref(branch.name())?;
                }
                Ok(())
            }
        }
    }
}
