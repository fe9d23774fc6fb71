use crate::matcher::NameMatcher;
use crate::path::CompiledPattern;
use crate::{Error, ErrorKind};

/// Compiles a pattern into a [`CompiledPattern`]: splits the string into
/// tokens, normalizes the token list, then lowers each token to a matcher.
pub(crate) fn compile(pattern: &str) -> Result<CompiledPattern, Error> {
    if pattern.is_empty() {
        return Err(Error::new(pattern, ErrorKind::EmptyPattern));
    }

    let tokens = normalize(split(pattern));
    debug!("pattern {:?} normalized to tokens {:?}", pattern, tokens);

    let mut matchers = Vec::with_capacity(tokens.len());
    for token in &tokens {
        if let Some(m) = lower(token).map_err(|kind| Error::new(pattern, kind))? {
            matchers.push(m);
        }
    }
    Ok(CompiledPattern::new(matchers))
}

/// Splits a pattern into tokens on `/`: every interior token keeps its
/// trailing `/`, the last token (the file name) does not have one.
fn split(pattern: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut start = 0;
    for (i, c) in pattern.char_indices() {
        if c == '/' {
            tokens.push(pattern[start..=i].to_string());
            start = i + c.len_utf8();
        }
    }
    if start < pattern.len() {
        tokens.push(pattern[start..].to_string());
    }
    tokens
}

/// Brings a token list to the canonical form described in the crate docs:
/// a lone bare token implies `**/`, a pattern with no leading `/` gets
/// rooted, and redundant or glued-together recursive tokens collapse.
///
/// `split()` guarantees that a token without a trailing `/` can only ever
/// be the last token in the list, which is what lets `rewrite_step` treat
/// "is this the `**`-prefixed trailing token" as a simple string check.
///
/// Terminates because each call to `rewrite_step` either shrinks the list,
/// or (for the `**/` / `*/` swap) strictly advances the position of a
/// `**/` token, both of which are bounded below by zero.
fn normalize(mut tokens: Vec<String>) -> Vec<String> {
    if tokens.len() == 1 && tokens[0] != "/" {
        tokens.insert(0, "**/".to_string());
    }
    if tokens.first().map(String::as_str) != Some("/") {
        tokens.insert(0, "/".to_string());
    }

    let mut guard = tokens.len() * tokens.len() + 16;
    loop {
        match rewrite_step(&tokens) {
            None => return tokens,
            Some(next) => {
                tokens = next;
                guard -= 1;
                assert!(guard > 0, "pattern normalization failed to converge");
            }
        }
    }
}

/// Applies the first applicable rewrite rule found scanning left to
/// right, or returns `None` if the list is already in normal form.
fn rewrite_step(tokens: &[String]) -> Option<Vec<String>> {
    for i in 0..tokens.len() {
        let cur = tokens[i].as_str();
        let prev = if i == 0 { None } else { Some(tokens[i - 1].as_str()) };

        if prev == Some("**/") && cur == "*/" {
            // Push the depth-constrained step after the recursive one so
            // the recursive marker sits as late in the chain as possible,
            // without changing the accepted set: both orderings require
            // at least one segment and place no constraint on its
            // content.
            let mut out = tokens.to_vec();
            out.swap(i - 1, i);
            return Some(out);
        }
        if cur == "**/" && prev == Some("**/") {
            let mut out = tokens.to_vec();
            out.remove(i);
            return Some(out);
        }
        if tokens.len() == 3 && prev == Some("**/") && cur == "**" {
            // The whole (rooted) pattern is nothing but a recursive
            // marker followed by a bare trailing "**", with no literal
            // segment anywhere before it — e.g. the pattern was just
            // "**", "**/**", or reduced down to that from something like
            // "***". There is no preceding segment for the bare "**"
            // idiom to require "one more segment after", so this is the
            // universal wildcard: it collapses to pure recursion and
            // matches the empty path too.
            //
            // This is narrower than it looks: as soon as a real segment
            // token sits before the "**/" (e.g. "foo/**/**"), `tokens`
            // has more than 3 entries and this rule does not fire; the
            // general expansion rule below runs instead and preserves
            // the "at least one more segment" requirement, the same as
            // it does for a single "foo/**".
            let mut out = tokens.to_vec();
            out.remove(i);
            return Some(out);
        }
        if cur.starts_with("**") && cur != "**/" {
            // A trailing token that starts with "**" but isn't the
            // canonical recursive token: either the bare "**" idiom
            // (`dir/**`, which must require one more segment so it
            // doesn't match `dir` itself, including when it directly
            // follows an existing "**/") or something glued onto it
            // (`**.log`). Both split into "**/" followed by the
            // remainder with its leading "*" preserved; a "**/" this
            // produces right after an existing one collapses via the
            // duplicate rule above on the next pass.
            let remainder = &cur[2..];
            let tail = format!("*{}", remainder);
            let mut out = tokens[..i].to_vec();
            out.push("**/".to_string());
            out.push(tail);
            out.extend_from_slice(&tokens[i + 1..]);
            return Some(out);
        }
    }
    None
}

/// Lowers a single token to a matcher. Returns `None` for the `/` token,
/// which is only a root marker and does not consume a path segment.
fn lower(token: &str) -> Result<Option<NameMatcher>, ErrorKind> {
    if token == "/" {
        return Ok(None);
    }
    if token == "**/" {
        return Ok(Some(NameMatcher::recursive()));
    }

    let dir_only = token.ends_with('/');
    let mask = if dir_only { &token[..token.len() - 1] } else { token };

    let needs_full_glob =
        mask.chars().any(|c| c == '[' || c == ']' || c == '\\');
    if needs_full_glob {
        return NameMatcher::complex(mask, dir_only, false).map(Some);
    }

    if !mask.contains('?') {
        let star_count = mask.chars().filter(|&c| c == '*').count();
        let matcher = match star_count {
            0 => NameMatcher::equals(mask.to_string(), dir_only),
            1 => {
                let at = mask.find('*').unwrap();
                let prefix = mask[..at].to_string();
                let suffix = mask[at + 1..].to_string();
                NameMatcher::simple(prefix, suffix, dir_only)
            }
            _ => NameMatcher::complex(mask, dir_only, true)?,
        };
        return Ok(Some(matcher));
    }

    NameMatcher::complex(mask, dir_only, true).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_basic() {
        assert_eq!(split("*.txt"), vec!["*.txt"]);
        assert_eq!(split("**/foo/bar"), vec!["**/", "foo/", "bar"]);
        assert_eq!(split("/top.txt"), vec!["/", "top.txt"]);
        assert_eq!(split("build/"), vec!["build/"]);
        assert_eq!(split("/"), vec!["/"]);
    }

    #[test]
    fn normalize_single_bare_token_gets_rooted_doublestar_prefix() {
        assert_eq!(
            normalize(split("foo")),
            vec!["/".to_string(), "**/".to_string(), "foo".to_string()]
        );
    }

    #[test]
    fn normalize_single_dir_only_token_also_gets_prefix() {
        assert_eq!(
            normalize(split("build/")),
            vec![
                "/".to_string(),
                "**/".to_string(),
                "build/".to_string()
            ]
        );
    }

    #[test]
    fn normalize_root_alone_stays_alone() {
        assert_eq!(normalize(split("/")), vec!["/".to_string()]);
    }

    #[test]
    fn normalize_is_idempotent() {
        for pattern in [
            "foo", "build/", "**/foo/bar", "/top.txt", "**.log", "***",
            "a/**", "foo/**/**",
        ] {
            let once = normalize(split(pattern));
            let twice = normalize(once.clone());
            assert_eq!(once, twice, "pattern={pattern:?}");
        }
    }

    #[test]
    fn normalize_splits_glued_doublestar() {
        let tokens = normalize(split("**.log"));
        assert_eq!(
            tokens,
            vec!["/".to_string(), "**/".to_string(), "*.log".to_string()]
        );
    }

    #[test]
    fn normalize_collapses_duplicate_doublestar() {
        let a = normalize(split("**/**/foo"));
        let b = normalize(split("**/foo"));
        assert_eq!(a, b);
    }

    #[test]
    fn normalize_bare_doublestar_whole_pattern_is_pure_recursive() {
        // "**" alone must reduce to just the recursive token so that it
        // still matches the empty path; no trailing "*" requiring an
        // extra segment should survive.
        assert_eq!(
            normalize(split("**")),
            vec!["/".to_string(), "**/".to_string()]
        );
    }

    #[test]
    fn normalize_trailing_bare_doublestar_requires_one_more_segment() {
        // "a/**" must not reduce to plain "a/": it has to keep requiring
        // at least one more path segment underneath "a".
        assert_eq!(
            normalize(split("a/**")),
            vec![
                "/".to_string(),
                "a/".to_string(),
                "**/".to_string(),
                "*".to_string(),
            ]
        );
    }

    #[test]
    fn normalize_redundant_trailing_doublestar_after_recursive_still_requires_segment() {
        // "foo/**/**" must accept exactly the same set as "foo/**": the
        // redundant leading "**/" collapses away, but the trailing bare
        // "**" still has to expand to "**/" + "*", requiring at least one
        // more segment underneath "foo" rather than matching "foo" itself.
        assert_eq!(
            normalize(split("foo/**/**")),
            vec![
                "/".to_string(),
                "foo/".to_string(),
                "**/".to_string(),
                "*".to_string(),
            ]
        );
        assert_eq!(normalize(split("foo/**/**")), normalize(split("foo/**")));
    }

    #[test]
    fn normalize_never_leaves_a_bare_doublestar_token() {
        for pattern in [
            "**", "a/**", "foo/**/**", "**.log", "***", "a/**/b/**",
        ] {
            let tokens = normalize(split(pattern));
            assert!(
                !tokens.iter().any(|t| t == "**"),
                "pattern={pattern:?} tokens={tokens:?}"
            );
        }
    }

    #[test]
    fn lower_rejects_unclosed_class() {
        assert!(lower("[ab").is_err());
    }

    #[test]
    fn lower_rejects_dangling_escape() {
        assert!(lower("foo\\").is_err());
    }

    #[test]
    fn lower_root_token_yields_no_matcher() {
        assert_eq!(lower("/").unwrap(), None);
    }

    #[test]
    fn lower_recursive_token() {
        assert!(lower("**/").unwrap().unwrap().is_recursive());
    }

    #[test]
    fn compile_rejects_empty_pattern() {
        assert_eq!(
            crate::compile("").unwrap_err().kind(),
            &ErrorKind::EmptyPattern
        );
    }
}
