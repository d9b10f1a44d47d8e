//! Glob pattern matching for navigation filters.
//!
//! Supports a restricted glob syntax over workspace-relative paths:
//! - `*` matches any run of characters except `/`
//! - `**` matches any run of characters including `/`
//! - `?` matches exactly one character
//!
//! Matching is case-insensitive and anchored: the whole path must match.
//! Backslashes in patterns and candidate paths are normalized to forward
//! slashes before comparison, so Windows-style configuration entries behave
//! the same as POSIX ones.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Error type for pattern translation.
///
/// The glob-to-regex translation is total over the supported syntax, so this
/// is a defensive path: it fires only if the translated expression fails to
/// compile, which indicates a translation bug rather than bad user input.
#[derive(Debug, Clone, Error)]
pub enum PatternError {
    /// The translated pattern did not compile to a valid matcher.
    #[error("invalid glob pattern '{pattern}': {message}")]
    Invalid { pattern: String, message: String },
}

/// Placeholder standing in for `**` between the single-star and double-star
/// rewrite steps. NUL bytes cannot survive the metacharacter escape of user
/// content, so the token cannot collide with anything the user wrote.
const DOUBLESTAR_TOKEN: &str = "\u{0}\u{0}";

/// Regex metacharacters that must be escaped in pattern text.
///
/// `*` and `?` are deliberately absent: they carry glob meaning and are
/// rewritten in later translation steps.
const REGEX_METACHARS: &[char] = &[
    '.', '+', '^', '$', '(', ')', '{', '}', '|', '[', ']', '\\',
];

/// A compiled glob pattern.
///
/// Immutable and cheap to clone (the underlying regex is reference-counted).
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a glob pattern into a matcher.
    ///
    /// Translation steps, in order:
    /// 1. Normalize backslashes to forward slashes.
    /// 2. Escape regex metacharacters except `*` and `?`.
    /// 3. Swap `**` for a placeholder token.
    /// 4. Rewrite remaining `*` to "any run excluding `/`".
    /// 5. Rewrite the placeholder to "any run including `/`".
    /// 6. Rewrite `?` to "any single character".
    /// 7. Anchor and compile case-insensitively.
    pub fn compile(source: &str) -> Result<Pattern, PatternError> {
        let normalized = source.replace('\\', "/");

        let mut escaped = String::with_capacity(normalized.len() * 2);
        for ch in normalized.chars() {
            if REGEX_METACHARS.contains(&ch) {
                escaped.push('\\');
            }
            escaped.push(ch);
        }

        let translated = escaped
            .replace("**", DOUBLESTAR_TOKEN)
            .replace('*', "[^/]*")
            .replace(DOUBLESTAR_TOKEN, ".*")
            .replace('?', ".");

        let regex = RegexBuilder::new(&format!("^{translated}$"))
            .case_insensitive(true)
            .build()
            .map_err(|e| PatternError::Invalid {
                pattern: source.to_string(),
                message: e.to_string(),
            })?;

        Ok(Pattern {
            source: source.to_string(),
            regex,
        })
    }

    /// Compile with process-wide memoization keyed by pattern source.
    ///
    /// Filters re-evaluate the same handful of patterns on every refresh;
    /// the memo table keeps that from recompiling the regex each time.
    pub fn compile_cached(source: &str) -> Result<Pattern, PatternError> {
        static CACHE: OnceLock<RwLock<HashMap<String, Pattern>>> = OnceLock::new();
        let cache = CACHE.get_or_init(|| RwLock::new(HashMap::new()));

        if let Some(pattern) = cache
            .read()
            .expect("pattern cache RwLock poisoned")
            .get(source)
        {
            return Ok(pattern.clone());
        }

        let pattern = Pattern::compile(source)?;
        cache
            .write()
            .expect("pattern cache RwLock poisoned")
            .insert(source.to_string(), pattern.clone());
        Ok(pattern)
    }

    /// The original pattern text this matcher was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Test whether `path` matches this pattern.
    ///
    /// Path separators are normalized to `/` before the anchored,
    /// case-insensitive comparison.
    pub fn matches(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        self.regex.is_match(&normalized)
    }
}

/// Test whether `path` matches any of the exclusion patterns.
///
/// Short-circuits on the first match; there is no precedence among
/// exclusion patterns. An empty exclusion set never excludes anything.
pub fn is_excluded(path: &str, exclude: &[String]) -> Result<bool, PatternError> {
    for pattern in exclude {
        if Pattern::compile_cached(pattern)?.matches(path) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, path: &str) -> bool {
        Pattern::compile(pattern).unwrap().matches(path)
    }

    mod translation {
        use super::*;

        #[test]
        fn literal_pattern_is_exact_match() {
            assert!(matches("src/main.rs", "src/main.rs"));
            assert!(!matches("src/main.rs", "src/main.rsx"));
            assert!(!matches("src/main.rs", "xsrc/main.rs"));
        }

        #[test]
        fn empty_pattern_matches_only_empty_path() {
            assert!(matches("", ""));
            assert!(!matches("", "a"));
        }

        #[test]
        fn single_star_stops_at_separator() {
            assert!(matches("a/*.ts", "a/b.ts"));
            assert!(!matches("a/*.ts", "a/b/c.ts"));
        }

        #[test]
        fn double_star_crosses_separators() {
            assert!(matches("a/**/*.ts", "a/b/c.ts"));
            assert!(matches("**/*.md", "docs/guide/intro.md"));
            assert!(matches("src/**", "src/deep/nested/file.c"));
        }

        #[test]
        fn question_mark_matches_single_character() {
            assert!(matches("file?.txt", "file1.txt"));
            assert!(!matches("file?.txt", "file10.txt"));
            assert!(!matches("file?.txt", "file.txt"));
        }

        #[test]
        fn matching_is_case_insensitive() {
            assert!(matches("*.TS", "file.ts"));
            assert!(matches("SRC/Main.RS", "src/main.rs"));
        }

        #[test]
        fn backslashes_normalize_to_forward_slashes() {
            assert!(matches("a\\b\\*.h", "a/b/c.h"));
            assert!(matches("a/b/*.h", "a\\b\\c.h"));
        }

        #[test]
        fn metacharacters_are_literal() {
            assert!(matches("notes (draft).md", "notes (draft).md"));
            assert!(matches("a+b.txt", "a+b.txt"));
            assert!(!matches("a.b", "axb"));
            assert!(matches("[x]/file.ts", "[x]/file.ts"));
        }

        #[test]
        fn dot_does_not_act_as_wildcard() {
            assert!(!matches("*.rs", "main_rs"));
        }
    }

    mod exclusion {
        use super::*;

        #[test]
        fn empty_exclusion_set_excludes_nothing() {
            assert!(!is_excluded("any/path.ts", &[]).unwrap());
        }

        #[test]
        fn any_matching_pattern_excludes() {
            let exclude = vec!["**/*.test.ts".to_string(), "vendor/**".to_string()];
            assert!(is_excluded("src/app.test.ts", &exclude).unwrap());
            assert!(is_excluded("vendor/lib/x.js", &exclude).unwrap());
            assert!(!is_excluded("src/app.ts", &exclude).unwrap());
        }
    }

    mod memoization {
        use super::*;

        #[test]
        fn cached_compile_returns_equivalent_matcher() {
            let a = Pattern::compile_cached("cache/*.json").unwrap();
            let b = Pattern::compile_cached("cache/*.json").unwrap();
            assert_eq!(a.source(), b.source());
            assert!(a.matches("cache/data.json"));
            assert!(b.matches("cache/data.json"));
        }
    }
}
