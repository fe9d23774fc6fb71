use std::collections::HashMap;

use crate::error::Error;

/// The per-user cached projection of a repository's permissions as seen
/// from the forge.
///
/// Deliberately small and `Clone` so cache hits are cheap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoSnapshot {
    /// The forge's numeric id for this repository.
    pub repo_id: u64,
    /// Whether the repository is private.
    pub is_private: bool,
    /// Whether this user has admin rights on the repository.
    pub admin: bool,
    /// Whether this user can push to the repository.
    pub push: bool,
    /// Whether this user can pull from the repository.
    pub pull: bool,
}

impl RepoSnapshot {
    /// The projection handed to anonymous callers on a public repository:
    /// read-only, with admin/push forced false regardless of what the
    /// forge might otherwise report for an authenticated owner.
    pub fn public(repo_id: u64) -> RepoSnapshot {
        RepoSnapshot {
            repo_id,
            is_private: false,
            admin: false,
            push: false,
            pull: true,
        }
    }
}

/// The static, non-per-user facts about a repository needed to answer an
/// authorization question: its identity, its owning login (used to key
/// the team-membership cache), and whether it's private.
///
/// No on-disk format is owned by this crate; callers obtain this from
/// whatever configuration layer loads repository mappings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoMeta {
    /// The forge's numeric id for this repository.
    pub id: u64,
    /// The repository's name, used in hook environment export.
    pub name: String,
    /// The login of the user or organization that owns the repository.
    pub owner_login: String,
    /// Whether the repository is private.
    pub is_private: bool,
}

/// The per-organization cached map from team login to its member user
/// identifiers, used to resolve a [`crate::Principal::Team`] selector.
pub type TeamMembership = HashMap<String, Vec<String>>;

/// The outcome of a single forge lookup: either the resource was found,
/// or the forge reported it missing (HTTP 404 and the like).
///
/// `NotFound` is translated to a deny verdict by the adapter; it is never
/// surfaced as an [`Error`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForgeOutcome<T> {
    /// The resource exists; here is its current state.
    Found(T),
    /// The forge has no such resource.
    NotFound,
}

/// The narrow interface the access adapter needs from a forge (e.g.
/// Gitea): per-user repository permissions, and per-organization team
/// membership.
///
/// Implementations may block the calling thread on network I/O; callers
/// of [`crate::AccessAdapter`] must treat its methods as potentially
/// blocking for the same reason.
pub trait ForgeClient {
    /// Looks up this repository's permissions as seen by `user`.
    ///
    /// The empty string denotes the anonymous user; implementations
    /// should not need to special-case it; [`crate::AccessAdapter`]
    /// handles the anonymous public-projection rule itself.
    fn repo_snapshot(
        &self,
        user: &str,
    ) -> Result<ForgeOutcome<RepoSnapshot>, Error>;

    /// Looks up the team-membership map for the organization that owns
    /// the repository.
    fn team_membership(
        &self,
        owner_login: &str,
    ) -> Result<TeamMembership, Error>;
}
