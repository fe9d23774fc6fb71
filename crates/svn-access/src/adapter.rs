use std::time::Duration;

use moka::sync::Cache;

use crate::acl::{AclSpec, Verdict};
use crate::env::HookEnv;
use crate::error::Error;
use crate::forge::{ForgeClient, ForgeOutcome, RepoMeta, RepoSnapshot, TeamMembership};

/// Configuration for an [`AccessAdapter`]'s two caches.
///
/// Both the per-user [`RepoSnapshot`] cache and the per-organization
/// [`TeamMembership`] cache share these bounds; a repository that needs
/// different bounds for each should build two adapters rather than one
/// (the contract doesn't promise the two caches coordinate eviction).
#[derive(Clone, Copy, Debug)]
pub struct AdapterConfig {
    /// Maximum number of entries held per cache before older entries are
    /// evicted.
    pub cache_capacity: u64,
    /// How long an entry remains valid, measured from the moment it was
    /// written (not from last access).
    pub cache_ttl: Duration,
}

impl Default for AdapterConfig {
    fn default() -> AdapterConfig {
        AdapterConfig {
            cache_capacity: 1000,
            cache_ttl: Duration::from_secs(15),
        }
    }
}

/// Answers read/write authorization questions for one Git repository
/// exposed over the Subversion protocol.
///
/// Built once per repository (or per repository-and-ACL pairing) and
/// shared across the concurrent requests that need it; its caches are
/// thread-safe and coalesce concurrent loads for the same key.
pub struct AccessAdapter<F> {
    forge: F,
    repo: RepoMeta,
    acl: Option<AclSpec>,
    snapshots: Cache<String, ForgeOutcome<RepoSnapshot>>,
    teams: Cache<String, TeamMembership>,
}

impl<F: ForgeClient> AccessAdapter<F> {
    /// Builds a new adapter for `repo`, optionally scoped by a
    /// pre-validated `acl`. Pass `None` to rely entirely on the
    /// repository's intrinsic forge permissions.
    pub fn new(
        forge: F,
        config: AdapterConfig,
        repo: RepoMeta,
        acl: Option<AclSpec>,
    ) -> AccessAdapter<F> {
        let snapshots = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();
        let teams = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();
        AccessAdapter { forge, repo, acl, snapshots, teams }
    }

    /// Returns whether `user` can read `path` at `is_dir` on `branch`.
    ///
    /// `branch` is accepted for interface symmetry with the write path
    /// and future per-branch ACL extensions; the current ACL contract
    /// evaluates path patterns only.
    pub fn can_read(
        &self,
        user: &str,
        branch: &str,
        path: &str,
        is_dir: bool,
    ) -> Result<bool, Error> {
        Ok(self.verdict(user, branch, path, is_dir)?.read)
    }

    /// Returns whether `user` can write `path` at `is_dir` on `branch`.
    ///
    /// Anonymous users (the empty string) are denied unconditionally and
    /// without touching the forge or either cache.
    pub fn can_write(
        &self,
        user: &str,
        branch: &str,
        path: &str,
        is_dir: bool,
    ) -> Result<bool, Error> {
        if user.is_empty() {
            return Ok(false);
        }
        Ok(self.verdict(user, branch, path, is_dir)?.write)
    }

    /// Builds the environment entries to hand to the Git hook process for
    /// a write by `user` that has already been granted by
    /// [`AccessAdapter::can_write`].
    pub fn hook_env(&self, user: &str) -> HookEnv {
        HookEnv::new(self.repo.id, self.repo.name.clone(), user.to_string())
    }

    fn verdict(
        &self,
        user: &str,
        _branch: &str,
        path: &str,
        is_dir: bool,
    ) -> Result<Verdict, Error> {
        match self.acl {
            // A repository with no ACL at all falls back to the forge's
            // intrinsic permissions.
            None => self.intrinsic_verdict(user),
            // A repository *with* an ACL is governed entirely by it: a
            // path with no matching rule is denied, not handed off to
            // intrinsic permissions.
            Some(ref acl) => {
                let teams = self.team_membership()?;
                match acl.evaluate(user, path, is_dir, &teams) {
                    Some(v) => {
                        debug!("acl rule matched for user {user} path {path}");
                        Ok(v)
                    }
                    None => {
                        debug!(
                            "no acl rule matched for user {user} path {path}; denying"
                        );
                        Ok(Verdict::DENY)
                    }
                }
            }
        }
    }

    fn intrinsic_verdict(&self, user: &str) -> Result<Verdict, Error> {
        match self.repo_snapshot(user)? {
            None => Ok(Verdict::DENY),
            Some(s) => Ok(Verdict {
                read: s.pull || s.push || s.admin,
                write: s.push || s.admin,
            }),
        }
    }

    fn repo_snapshot(&self, user: &str) -> Result<Option<RepoSnapshot>, Error> {
        if user.is_empty() {
            return Ok(if self.repo.is_private {
                None
            } else {
                Some(RepoSnapshot::public(self.repo.id))
            });
        }
        let key = user.to_string();
        let forge = &self.forge;
        let outcome = self
            .snapshots
            .try_get_with(key, || {
                debug!("cache miss for repo snapshot of user {user}");
                forge.repo_snapshot(user)
            })
            .map_err(|e| (*e).clone())?;
        Ok(match outcome {
            ForgeOutcome::Found(s) => Some(s),
            ForgeOutcome::NotFound => None,
        })
    }

    fn team_membership(&self) -> Result<TeamMembership, Error> {
        let owner = self.repo.owner_login.clone();
        let forge = &self.forge;
        self.teams
            .try_get_with(owner.clone(), || {
                debug!("cache miss for team membership of owner {owner}");
                forge.team_membership(&owner)
            })
            .map_err(|e| (*e).clone())
    }
}
