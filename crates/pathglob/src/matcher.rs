use crate::ErrorKind;

/// A single parsed unit of a `complex` mask: what can appear inside one
/// segment mask once `\`-escapes have been resolved.
#[derive(Clone, Debug, Eq, PartialEq)]
enum MaskAtom {
    Literal(char),
    Any,
    Star,
    Class { negated: bool, ranges: Vec<(char, char)> },
}

/// `NameMatcher` is a closed set of four primitives, each deciding whether
/// it matches a single path segment.
///
/// This is a tagged sum (not a dynamically dispatched object) because the
/// presence of [`NameMatcher::svn_mask`] is statically tied to the variant:
/// only `Equals` and `Simple` can be represented as an SVN mask.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NameMatcher {
    /// Literal segment equality, optionally restricted to directories.
    Equals {
        /// The literal name the segment is compared against.
        name: String,
        /// Matches only if the path at this position is a directory.
        dir_only: bool,
    },
    /// `prefix*suffix` within a single segment.
    Simple {
        /// The prefix that must come first.
        prefix: String,
        /// The suffix that must come last.
        suffix: String,
        /// Matches only if the path at this position is a directory.
        dir_only: bool,
    },
    /// An arbitrary single-segment glob: `?`, `*`, character classes.
    Complex {
        /// The original mask (already unescaped, as written by the user).
        mask: String,
        /// The parsed mask atoms used during matching.
        atoms: Vec<MaskAtom>,
        /// Matches only if the path at this position is a directory.
        dir_only: bool,
        /// Whether the mask contains none of `[`, `]`, `\` (informational).
        svn_compatible: bool,
    },
    /// `**/`: matches any segment, at any depth, once, and remains active
    /// afterward. The only variant for which [`NameMatcher::is_recursive`]
    /// is true.
    Recursive,
}

impl NameMatcher {
    /// Builds the `equals` variant.
    pub(crate) fn equals(name: String, dir_only: bool) -> NameMatcher {
        NameMatcher::Equals { name, dir_only }
    }

    /// Builds the `simple` variant. The segment length must be at least
    /// the combined length of the prefix and suffix; this prevents
    /// overlap when both could otherwise match the same characters.
    pub(crate) fn simple(
        prefix: String,
        suffix: String,
        dir_only: bool,
    ) -> NameMatcher {
        NameMatcher::Simple { prefix, suffix, dir_only }
    }

    /// Parses a `complex` mask and builds the corresponding variant.
    pub(crate) fn complex(
        mask: &str,
        dir_only: bool,
        svn_compatible: bool,
    ) -> Result<NameMatcher, ErrorKind> {
        let atoms = parse_mask(mask)?;
        Ok(NameMatcher::Complex {
            mask: mask.to_string(),
            atoms,
            dir_only,
            svn_compatible,
        })
    }

    /// Returns the single instance of the `recursive` variant.
    pub(crate) fn recursive() -> NameMatcher {
        NameMatcher::Recursive
    }

    /// Checks whether `segment` matches this matcher.
    ///
    /// `segment` is a non-empty Unicode string representing a single path
    /// component (it never contains `/`). `is_dir` is true when the path
    /// position this matcher is applied to is known to be a directory.
    pub fn matches(&self, segment: &str, is_dir: bool) -> bool {
        match *self {
            NameMatcher::Equals { ref name, dir_only } => {
                (!dir_only || is_dir) && segment == name
            }
            NameMatcher::Simple { ref prefix, ref suffix, dir_only } => {
                (!dir_only || is_dir)
                    && segment.len() >= prefix.len() + suffix.len()
                    && segment.starts_with(prefix.as_str())
                    && segment.ends_with(suffix.as_str())
            }
            NameMatcher::Complex { ref atoms, dir_only, .. } => {
                (!dir_only || is_dir) && match_atoms(atoms, segment)
            }
            NameMatcher::Recursive => true,
        }
    }

    /// True only for the `recursive` variant.
    pub fn is_recursive(&self) -> bool {
        matches!(*self, NameMatcher::Recursive)
    }

    /// Returns the literal mask representable in SVN's own pattern
    /// language, if any: the literal string for `equals`, `prefix*suffix`
    /// for `simple`. Absent for `complex` and `recursive` — those must be
    /// evaluated in-process.
    pub fn svn_mask(&self) -> Option<String> {
        match *self {
            NameMatcher::Equals { ref name, .. } => Some(name.clone()),
            NameMatcher::Simple { ref prefix, ref suffix, .. } => {
                Some(format!("{}*{}", prefix, suffix))
            }
            NameMatcher::Complex { .. } | NameMatcher::Recursive => None,
        }
    }

    /// True if this matcher is restricted to directories only.
    pub(crate) fn dir_only(&self) -> bool {
        match *self {
            NameMatcher::Equals { dir_only, .. }
            | NameMatcher::Simple { dir_only, .. }
            | NameMatcher::Complex { dir_only, .. } => dir_only,
            NameMatcher::Recursive => false,
        }
    }
}

/// Parses a `complex` mask (with no leading/trailing `/`) into a list of
/// [`MaskAtom`]s, resolving `\`-escapes and character classes.
fn parse_mask(mask: &str) -> Result<Vec<MaskAtom>, ErrorKind> {
    let mut atoms = Vec::new();
    let mut chars = mask.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => atoms.push(MaskAtom::Star),
            '?' => atoms.push(MaskAtom::Any),
            '\\' => match chars.next() {
                None => return Err(ErrorKind::DanglingEscape),
                Some(escaped) => atoms.push(MaskAtom::Literal(escaped)),
            },
            '[' => {
                let negated = match chars.peek() {
                    Some(&'!') | Some(&'^') => {
                        chars.next();
                        true
                    }
                    _ => false,
                };
                let mut ranges = Vec::new();
                let mut first = true;
                let mut in_range = false;
                loop {
                    let Some(c) = chars.next() else {
                        return Err(ErrorKind::UnclosedClass);
                    };
                    match c {
                        ']' if !first => break,
                        ']' => {
                            ranges.push((']', ']'));
                            first = false;
                        }
                        '-' if first => {
                            ranges.push(('-', '-'));
                            first = false;
                        }
                        '-' if in_range => {
                            let r = ranges.last_mut().unwrap();
                            r.1 = '-';
                            if r.1 < r.0 {
                                return Err(ErrorKind::InvalidRange(
                                    r.0, r.1,
                                ));
                            }
                            in_range = false;
                        }
                        '-' => {
                            in_range = true;
                            first = false;
                        }
                        c => {
                            if in_range {
                                let r = ranges.last_mut().unwrap();
                                r.1 = c;
                                if r.1 < r.0 {
                                    return Err(ErrorKind::InvalidRange(
                                        r.0, r.1,
                                    ));
                                }
                                in_range = false;
                            } else {
                                ranges.push((c, c));
                            }
                            first = false;
                        }
                    }
                }
                if in_range {
                    // Trailing '-' with nothing after it to extend a range;
                    // treat it as a literal.
                    ranges.push(('-', '-'));
                }
                atoms.push(MaskAtom::Class { negated, ranges });
            }
            c => atoms.push(MaskAtom::Literal(c)),
        }
    }
    Ok(atoms)
}

/// Matches parsed mask atoms against a single path segment.
///
/// This is a classic recursive glob matcher bounded to one segment: `*`
/// never crosses a segment boundary because `segment` itself never
/// contains `/`.
fn match_atoms(atoms: &[MaskAtom], segment: &str) -> bool {
    let chars: Vec<char> = segment.chars().collect();
    match_from(atoms, &chars)
}

fn match_from(atoms: &[MaskAtom], chars: &[char]) -> bool {
    match atoms.first() {
        None => chars.is_empty(),
        Some(MaskAtom::Star) => {
            // `*` absorbs 0..n characters; try each length in turn.
            for i in 0..=chars.len() {
                if match_from(&atoms[1..], &chars[i..]) {
                    return true;
                }
            }
            false
        }
        Some(MaskAtom::Any) => {
            !chars.is_empty() && match_from(&atoms[1..], &chars[1..])
        }
        Some(MaskAtom::Literal(c)) => {
            !chars.is_empty()
                && chars[0] == *c
                && match_from(&atoms[1..], &chars[1..])
        }
        Some(MaskAtom::Class { negated, ranges }) => {
            !chars.is_empty()
                && class_matches(*negated, ranges, chars[0])
                && match_from(&atoms[1..], &chars[1..])
        }
    }
}

fn class_matches(negated: bool, ranges: &[(char, char)], c: char) -> bool {
    let hit = ranges.iter().any(|&(s, e)| s <= c && c <= e);
    hit != negated
}
