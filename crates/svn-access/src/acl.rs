use std::collections::HashMap;

use pathglob::CompiledPattern;

use crate::error::Error;

/// Identifies who an [`AclRule`] applies to: either a single user, or an
/// organization team whose membership is resolved separately.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Principal {
    /// A single user, identified by login.
    User(String),
    /// An organization team, identified by its login. Resolving whether a
    /// given user belongs to this team requires the owning repository's
    /// [`crate::TeamMembership`] map, which the adapter supplies at
    /// evaluation time.
    Team(String),
}

/// The read/write verdict attached to a single [`AclRule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
    /// Whether this rule grants read access.
    pub read: bool,
    /// Whether this rule grants write access.
    pub write: bool,
}

impl Verdict {
    /// A verdict that grants neither read nor write.
    pub const DENY: Verdict = Verdict { read: false, write: false };

    /// A verdict that grants read and write.
    pub const READ_WRITE: Verdict = Verdict { read: true, write: true };

    /// A verdict that grants read only.
    pub const READ_ONLY: Verdict = Verdict { read: true, write: false };
}

/// A single entry in an [`AclSpec`]: a principal, a compiled path pattern,
/// and the verdict it contributes when both match.
#[derive(Clone, Debug)]
pub struct AclRule {
    /// Who this rule applies to.
    pub principal: Principal,
    /// The path pattern this rule is scoped to.
    pub pattern: CompiledPattern,
    /// What this rule grants when it applies.
    pub verdict: Verdict,
}

/// An ordered list of [`AclRule`]s for a single repository.
///
/// Rules are evaluated in configured order, and the verdict of the last
/// matching rule wins — the same last-match-wins precedence gitignore
/// itself uses when multiple patterns match the same path. A repository
/// with no `AclSpec` falls back entirely to its intrinsic forge
/// permissions; see [`crate::AccessAdapter`].
#[derive(Clone, Debug)]
pub struct AclSpec {
    rules: Vec<AclRule>,
}

impl AclSpec {
    /// Builds an `AclSpec` from an ordered rule list.
    ///
    /// Returns [`Error::MisconfiguredAcl`] if the same principal has the
    /// same compiled pattern listed more than once: with two identical
    /// `(principal, pattern)` pairs, only one of the two verdicts could
    /// ever apply, which almost always indicates a configuration mistake
    /// rather than an intentional override.
    pub fn new(rules: Vec<AclRule>) -> Result<AclSpec, Error> {
        for (i, rule) in rules.iter().enumerate() {
            for other in &rules[..i] {
                if principal_key(&rule.principal) == principal_key(&other.principal)
                    && rule.pattern == other.pattern
                {
                    return Err(Error::MisconfiguredAcl(format!(
                        "duplicate rule for principal {:?}",
                        rule.principal
                    )));
                }
            }
        }
        Ok(AclSpec { rules })
    }

    /// Evaluates this spec for a concrete `(user, path, is_dir)` triple.
    ///
    /// `teams` maps a team login to its member user logins, used to
    /// resolve [`Principal::Team`] rules against `user`. Walks the rule
    /// list in order and returns the verdict of the *last* rule whose
    /// principal matches `user` (directly, or via team membership) and
    /// whose pattern matches the path. Returns `None` if no rule matches.
    ///
    /// A repository governed by an `AclSpec` at all is governed by it
    /// entirely: the caller must treat `None` here as deny, *not* as a
    /// signal to fall back to intrinsic forge permissions. Falling back to
    /// intrinsic permissions only ever happens when the repository has no
    /// `AclSpec` configured in the first place; see
    /// [`crate::AccessAdapter`].
    pub fn evaluate(
        &self,
        user: &str,
        path: &str,
        is_dir: bool,
        teams: &HashMap<String, Vec<String>>,
    ) -> Option<Verdict> {
        let mut verdict = None;
        for rule in &self.rules {
            if !principal_matches(&rule.principal, user, teams) {
                continue;
            }
            if !rule.pattern.is_match(path, is_dir) {
                continue;
            }
            verdict = Some(rule.verdict);
        }
        verdict
    }
}

fn principal_key(p: &Principal) -> (u8, &str) {
    match *p {
        Principal::User(ref name) => (0, name.as_str()),
        Principal::Team(ref name) => (1, name.as_str()),
    }
}

fn principal_matches(
    principal: &Principal,
    user: &str,
    teams: &HashMap<String, Vec<String>>,
) -> bool {
    match *principal {
        Principal::User(ref name) => name == user,
        Principal::Team(ref team) => teams
            .get(team)
            .is_some_and(|members| members.iter().any(|m| m == user)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(principal: Principal, pattern: &str, verdict: Verdict) -> AclRule {
        AclRule { principal, pattern: pathglob::compile(pattern).unwrap(), verdict }
    }

    #[test]
    fn user_rule_grants_on_matching_path() {
        let spec = AclSpec::new(vec![rule(
            Principal::User("alice".into()),
            "docs/**",
            Verdict::READ_ONLY,
        )])
        .unwrap();
        let teams = HashMap::new();
        assert_eq!(
            spec.evaluate("alice", "docs/a.txt", false, &teams),
            Some(Verdict::READ_ONLY)
        );
        assert_eq!(spec.evaluate("alice", "src/a.c", false, &teams), None);
        assert_eq!(spec.evaluate("bob", "docs/a.txt", false, &teams), None);
    }

    #[test]
    fn team_rule_resolves_via_membership() {
        let spec = AclSpec::new(vec![rule(
            Principal::Team("core".into()),
            "**",
            Verdict::READ_WRITE,
        )])
        .unwrap();
        let mut teams = HashMap::new();
        teams.insert("core".to_string(), vec!["alice".to_string()]);
        assert_eq!(
            spec.evaluate("alice", "any/path.rs", false, &teams),
            Some(Verdict::READ_WRITE)
        );
        assert_eq!(spec.evaluate("bob", "any/path.rs", false, &teams), None);
    }

    #[test]
    fn last_matching_rule_wins() {
        let spec = AclSpec::new(vec![
            rule(Principal::User("alice".into()), "**", Verdict::READ_WRITE),
            rule(
                Principal::User("alice".into()),
                "secrets/**",
                Verdict::DENY,
            ),
        ])
        .unwrap();
        let teams = HashMap::new();
        assert_eq!(
            spec.evaluate("alice", "secrets/key.pem", false, &teams),
            Some(Verdict::DENY)
        );
        assert_eq!(
            spec.evaluate("alice", "README.md", false, &teams),
            Some(Verdict::READ_WRITE)
        );
    }

    #[test]
    fn duplicate_principal_pattern_pair_is_misconfigured() {
        let err = AclSpec::new(vec![
            rule(Principal::User("alice".into()), "docs/**", Verdict::READ_ONLY),
            rule(Principal::User("alice".into()), "docs/**", Verdict::DENY),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::MisconfiguredAcl(_)));
    }

    #[test]
    fn no_matching_rule_returns_none() {
        let spec = AclSpec::new(vec![]).unwrap();
        let teams = HashMap::new();
        assert_eq!(spec.evaluate("alice", "README.md", false, &teams), None);
    }
}
