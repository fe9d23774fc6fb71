use std::collections::BTreeSet;

use crate::matcher::NameMatcher;

/// A path to match against: an ordered list of segments plus a flag
/// saying whether the last segment is a directory.
///
/// Segments never contain `/`; this is guaranteed by the constructor,
/// which splits the input string on `/` and drops the empty components
/// produced by leading, trailing, or doubled separators.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Path {
    segments: Vec<String>,
    is_dir: bool,
}

impl Path {
    /// Builds a path by splitting `raw` on `/`.
    pub fn new(raw: &str, is_dir: bool) -> Path {
        let segments = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();
        Path { segments, is_dir }
    }

    /// Returns the segments of this path.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True if the last segment of this path is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// A compiled pattern: an ordered list of [`NameMatcher`]s produced from
/// a single pattern by [`crate::compile`].
///
/// Created once at configuration load and never mutated afterward; safe
/// to share across threads without synchronization because it contains
/// no interior mutability.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompiledPattern {
    matchers: Vec<NameMatcher>,
}

impl CompiledPattern {
    pub(crate) fn new(matchers: Vec<NameMatcher>) -> CompiledPattern {
        CompiledPattern { matchers }
    }

    /// Returns the primitives that make up this pattern, in application
    /// order.
    pub fn matchers(&self) -> &[NameMatcher] {
        &self.matchers
    }

    /// Checks whether the given path (as a string) matches this pattern.
    /// A convenience wrapper around [`CompiledPattern::is_match_path`]
    /// that splits `raw` into segments itself.
    pub fn is_match(&self, raw: &str, is_dir: bool) -> bool {
        self.is_match_path(&Path::new(raw, is_dir))
    }

    /// Checks whether the given [`Path`] matches this pattern.
    ///
    /// Implemented as a small nondeterministic automaton over matcher
    /// indices: a non-recursive matcher at position `i` requires exactly
    /// one transition `i -> i+1` on consuming a segment, while a
    /// recursive matcher admits both a self-loop (consumes a segment and
    /// stays active) and an epsilon transition `i -> i+1` (consumes zero
    /// segments). The path is accepted if, after processing every
    /// segment, the set of reachable positions contains
    /// `matchers.len()` — "past the last matcher".
    pub fn is_match_path(&self, path: &Path) -> bool {
        let matchers = &self.matchers;
        let segments = path.segments();
        let n = segments.len();

        let mut states: BTreeSet<usize> = BTreeSet::new();
        states.insert(0);
        epsilon_closure(&mut states, matchers);

        for (j, segment) in segments.iter().enumerate() {
            let is_dir_at_j = j < n - 1 || path.is_dir();
            let mut next_states: BTreeSet<usize> = BTreeSet::new();
            for &i in &states {
                let Some(m) = matchers.get(i) else { continue };
                if m.is_recursive() {
                    // Consumes this segment and remains active.
                    next_states.insert(i);
                } else if m.matches(segment, is_dir_at_j) {
                    next_states.insert(i + 1);
                }
            }
            epsilon_closure(&mut next_states, matchers);
            if next_states.is_empty() {
                return false;
            }
            states = next_states;
        }

        states.contains(&matchers.len())
    }
}

/// Extends `states` with epsilon transitions: a recursive matcher at
/// position `i` also admits a transition `i -> i+1` that consumes no
/// segment (a recursive matcher consumes "zero or more" segments).
fn epsilon_closure(states: &mut BTreeSet<usize>, matchers: &[NameMatcher]) {
    loop {
        let additions: Vec<usize> = states
            .iter()
            .copied()
            .filter_map(|i| {
                let m = matchers.get(i)?;
                if m.is_recursive() && !states.contains(&(i + 1)) {
                    Some(i + 1)
                } else {
                    None
                }
            })
            .collect();
        if additions.is_empty() {
            break;
        }
        states.extend(additions);
    }
}
