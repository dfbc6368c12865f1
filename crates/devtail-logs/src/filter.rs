//! Exclusion pattern matching
//!
//! A pattern starting with `/` is a regex, optionally closed by a second `/`
//! followed by flags (`/^debug:/i`). Anything else is a plain case-sensitive
//! substring match. Invalid regexes never match and never raise.

use regex::{Regex, RegexBuilder};

enum Matcher {
    Substring(String),
    Regex(Regex),
    /// Pattern failed to compile; treated as never-matching
    Never,
}

/// Compiled set of exclusion patterns.
pub struct ExcludeFilter {
    matchers: Vec<Matcher>,
}

impl ExcludeFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let matchers = patterns
            .iter()
            .map(|p| compile_pattern(p.as_ref()))
            .collect();
        Self { matchers }
    }

    /// True if any pattern matches the line (short-circuit on first match).
    pub fn matches(&self, line: &str) -> bool {
        self.matchers.iter().any(|m| match m {
            Matcher::Substring(s) => line.contains(s.as_str()),
            Matcher::Regex(re) => re.is_match(line),
            Matcher::Never => false,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

fn compile_pattern(pattern: &str) -> Matcher {
    let Some(rest) = pattern.strip_prefix('/') else {
        return Matcher::Substring(pattern.to_string());
    };

    // The regex body runs up to the last `/`; characters after it are flags.
    // A lone leading `/` with no closing delimiter means the whole remainder
    // is the source and there are no flags.
    let (source, flags) = match rest.rfind('/') {
        Some(idx) => (&rest[..idx], &rest[idx + 1..]),
        None => (rest, ""),
    };

    let mut builder = RegexBuilder::new(source);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            _ => {}
        }
    }

    match builder.build() {
        Ok(re) => Matcher::Regex(re),
        Err(_) => Matcher::Never,
    }
}

/// One-shot convenience over [`ExcludeFilter`].
pub fn should_exclude<S: AsRef<str>>(line: &str, patterns: &[S]) -> bool {
    if patterns.is_empty() {
        return false;
    }
    ExcludeFilter::new(patterns).matches(line)
}
