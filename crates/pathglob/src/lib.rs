/*!
This crate matches a single gitignore/SVN-style wildcard pattern against a
single file path, broken into path segments.

Unlike the classic approach of compiling an entire shell glob into one
regular expression, this crate compiles a pattern into an ordered sequence
of matcher primitives, each responsible for exactly one path segment
(`equals`, `simple`, `complex`, `recursive`). This makes it straightforward
to offload literal and single-asterisk patterns to an SVN client via
[`NameMatcher::svn_mask`], leaving only genuinely complex patterns to be
evaluated in-process.

# Example

```
use pathglob::compile;

let pattern = compile("*.txt").unwrap();
assert!(pattern.is_match("docs/readme.txt", false));
assert!(!pattern.is_match("readme.txt.bak", false));
```

# Syntax

* `*` matches any (possibly empty) run of characters within a single path
  segment; it never crosses a `/`.
* `?` matches exactly one character.
* `[ab]`, `[!ab]`, `[^ab]`, `[a-z]` are character classes with negation and
  ranges; a `]` at position 0 is literal.
* `\x` escapes `x`.
* `**/` as a standalone token matches zero or more intermediate
  directories.
* A trailing `/` restricts the pattern to directories only.
* A leading `/` roots the pattern; a bare file name with no `/` implicitly
  gets a `**/` prefix.
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

mod matcher;
mod pattern;
mod path;

pub use crate::matcher::NameMatcher;
pub use crate::path::{CompiledPattern, Path};

/// Compiles a pattern into a [`CompiledPattern`].
///
/// This is the compiler's only public entry point; it splits the pattern
/// into tokens, normalizes the token list, and lowers each token to a
/// matcher primitive. Compilation never touches the filesystem.
pub fn compile(pattern: &str) -> Result<CompiledPattern, Error> {
    crate::pattern::compile(pattern)
}

/// An error that can occur while parsing a pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    /// The original pattern given by the caller.
    pattern: Option<String>,
    /// What kind of error occurred.
    kind: ErrorKind,
}

/// The kind of error that can occur while parsing a pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The pattern is empty.
    EmptyPattern,
    /// A character class (e.g. `[abc`) was never closed.
    UnclosedClass,
    /// A character class range is invalid (start is greater than end).
    InvalidRange(char, char),
    /// An unescaped `\` was found at the end of the pattern.
    DanglingEscape,
}

impl Error {
    fn new(pattern: &str, kind: ErrorKind) -> Error {
        Error { pattern: Some(pattern.to_string()), kind }
    }

    /// Returns the pattern that caused this error, if known.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pattern {
            None => self.kind.fmt(f),
            Some(ref pattern) => {
                write!(f, "error parsing pattern '{}': {}", pattern, self.kind)
            }
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ErrorKind::EmptyPattern => write!(f, "pattern is empty"),
            ErrorKind::UnclosedClass => {
                write!(f, "unclosed character class; missing ']'")
            }
            ErrorKind::InvalidRange(s, e) => {
                write!(f, "invalid range; '{}' > '{}'", s, e)
            }
            ErrorKind::DanglingEscape => write!(f, "dangling '\\'"),
        }
    }
}
