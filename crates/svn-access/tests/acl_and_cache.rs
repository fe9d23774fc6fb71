//! Behavioral tests for `AccessAdapter` that exercise more than one unit at
//! a time: ACL precedence end to end, and cache TTL expiry against a real
//! clock (the adapter's cache is backed by `moka::sync::Cache`, which has
//! no test-only mock-clock hook exposed through this crate's contract, so
//! these tests use a short real TTL and a generous sleep instead).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use svn_access::{
    AccessAdapter, AclRule, AclSpec, AdapterConfig, ForgeClient, ForgeOutcome,
    Principal, RepoMeta, RepoSnapshot, TeamMembership, Verdict,
};

struct StubForge {
    snapshot: Mutex<ForgeOutcome<RepoSnapshot>>,
    teams: Mutex<TeamMembership>,
    snapshot_calls: AtomicUsize,
    team_calls: AtomicUsize,
}

impl StubForge {
    fn new(snapshot: ForgeOutcome<RepoSnapshot>) -> StubForge {
        StubForge {
            snapshot: Mutex::new(snapshot),
            teams: Mutex::new(TeamMembership::new()),
            snapshot_calls: AtomicUsize::new(0),
            team_calls: AtomicUsize::new(0),
        }
    }

    fn with_team(self, team: &str, members: Vec<String>) -> Self {
        self.teams.lock().unwrap().insert(team.to_string(), members);
        self
    }
}

impl ForgeClient for StubForge {
    fn repo_snapshot(
        &self,
        _user: &str,
    ) -> Result<ForgeOutcome<RepoSnapshot>, svn_access::Error> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot.lock().unwrap().clone())
    }

    fn team_membership(
        &self,
        _owner_login: &str,
    ) -> Result<TeamMembership, svn_access::Error> {
        self.team_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.teams.lock().unwrap().clone())
    }
}

impl ForgeClient for Arc<StubForge> {
    fn repo_snapshot(
        &self,
        user: &str,
    ) -> Result<ForgeOutcome<RepoSnapshot>, svn_access::Error> {
        (**self).repo_snapshot(user)
    }

    fn team_membership(
        &self,
        owner_login: &str,
    ) -> Result<TeamMembership, svn_access::Error> {
        (**self).team_membership(owner_login)
    }
}

fn repo() -> RepoMeta {
    RepoMeta {
        id: 42,
        name: "widgets".to_string(),
        owner_login: "acme".to_string(),
        is_private: true,
    }
}

#[test]
fn docs_team_read_only_does_not_grant_src_access() {
    let forge = StubForge::new(ForgeOutcome::Found(RepoSnapshot {
        repo_id: 42,
        is_private: true,
        admin: false,
        push: false,
        pull: false,
    }))
    .with_team("writers", vec!["alice".to_string()]);

    let acl = AclSpec::new(vec![AclRule {
        principal: Principal::Team("writers".into()),
        pattern: pathglob::compile("docs/**").unwrap(),
        verdict: Verdict::READ_ONLY,
    }])
    .unwrap();

    let adapter =
        AccessAdapter::new(forge, AdapterConfig::default(), repo(), Some(acl));

    assert!(adapter
        .can_read("alice", "trunk", "docs/a.txt", false)
        .unwrap());
    assert!(!adapter
        .can_write("alice", "trunk", "docs/a.txt", false)
        .unwrap());
    assert!(!adapter
        .can_read("alice", "trunk", "src/a.c", false)
        .unwrap());
    assert!(!adapter
        .can_read("bob", "trunk", "docs/a.txt", false)
        .unwrap());
}

#[test]
fn cache_hit_within_ttl_then_miss_after_expiry() {
    let forge = Arc::new(StubForge::new(ForgeOutcome::Found(RepoSnapshot {
        repo_id: 42,
        is_private: true,
        admin: false,
        push: true,
        pull: true,
    })));
    let config = AdapterConfig {
        cache_capacity: 10,
        cache_ttl: Duration::from_millis(30),
    };
    let adapter =
        AccessAdapter::new(Arc::clone(&forge), config, repo(), None);

    adapter.can_read("alice", "trunk", "a.txt", false).unwrap();
    adapter.can_read("alice", "trunk", "a.txt", false).unwrap();
    assert_eq!(forge.snapshot_calls.load(Ordering::SeqCst), 1);

    std::thread::sleep(Duration::from_millis(150));

    adapter.can_read("alice", "trunk", "a.txt", false).unwrap();
    assert_eq!(forge.snapshot_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn team_membership_cache_is_shared_across_distinct_users() {
    let forge = Arc::new(
        StubForge::new(ForgeOutcome::NotFound)
            .with_team("writers", vec!["alice".to_string()]),
    );
    let acl = AclSpec::new(vec![AclRule {
        principal: Principal::Team("writers".into()),
        pattern: pathglob::compile("**").unwrap(),
        verdict: Verdict::READ_WRITE,
    }])
    .unwrap();
    let adapter = AccessAdapter::new(
        Arc::clone(&forge),
        AdapterConfig::default(),
        repo(),
        Some(acl),
    );

    assert!(adapter.can_read("alice", "trunk", "a.txt", false).unwrap());
    assert!(!adapter.can_read("bob", "trunk", "a.txt", false).unwrap());
    assert_eq!(forge.team_calls.load(Ordering::SeqCst), 1);
}
