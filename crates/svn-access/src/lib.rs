/*!
This crate answers read/write authorization questions for a Git repository
exposed as if it were a Subversion repository.

It sits just above [`pathglob`]: an [`AclSpec`] is a list of rules pairing a
principal (a user or an organization team) with a compiled `pathglob`
pattern and a verdict. [`AccessAdapter::verdict`] walks those rules for a
given `(user, branch, path)` triple. A repository with no `AclSpec` falls
back entirely to its intrinsic forge permissions; a repository *with* an
`AclSpec` is governed by it alone, so a path with no matching rule is
denied rather than falling through. The adapter caches the forge round
trips it needs to answer either way.

# Example

```
use std::time::Duration;
use svn_access::{
    AccessAdapter, AdapterConfig, ForgeClient, ForgeOutcome, RepoMeta,
    RepoSnapshot, TeamMembership,
};

struct NoForge;

impl ForgeClient for NoForge {
    fn repo_snapshot(
        &self,
        _user: &str,
    ) -> Result<ForgeOutcome<RepoSnapshot>, svn_access::Error> {
        Ok(ForgeOutcome::NotFound)
    }

    fn team_membership(
        &self,
        _owner_login: &str,
    ) -> Result<TeamMembership, svn_access::Error> {
        Ok(TeamMembership::new())
    }
}

let repo = RepoMeta {
    id: 1,
    name: "demo".to_string(),
    owner_login: "acme".to_string(),
    is_private: false,
};
let adapter = AccessAdapter::new(
    NoForge,
    AdapterConfig::default(),
    repo,
    None,
);
assert!(adapter.can_read("", "trunk", "README.md", false).unwrap());
assert!(!adapter.can_write("", "trunk", "README.md", false).unwrap());
```
*/

#![deny(missing_docs)]

#[cfg(feature = "log")]
macro_rules! debug {
    ($($token:tt)*) => (::log::debug!($($token)*);)
}

#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($token:tt)*) => {};
}

mod acl;
mod adapter;
mod env;
mod error;
mod forge;

pub use crate::acl::{AclRule, AclSpec, Principal, Verdict};
pub use crate::adapter::{AccessAdapter, AdapterConfig};
pub use crate::env::HookEnv;
pub use crate::error::Error;
pub use crate::forge::{
    ForgeClient, ForgeOutcome, RepoMeta, RepoSnapshot, TeamMembership,
};
