//! Regular expression value object.

use std::fmt;

use regex::{Regex, RegexBuilder};

/// Canonical order in which flags are reported.
const FLAG_ORDER: &str = "dgimsuvy";

/// A regular expression configuration value.
///
/// Carries its source text and a flag string alongside the compiled regex so
/// that copies keep their flags. `i`, `m`, `s` and `x` change matching; other
/// flags (`g`, `y`, ...) are carried for round-tripping only.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str, flags: &str) -> Result<Self, regex::Error> {
        let flags = canonical_flags(flags);
        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .ignore_whitespace(flags.contains('x'))
            .build()?;
        Ok(Self {
            source: source.to_string(),
            flags,
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

fn canonical_flags(flags: &str) -> String {
    let mut known: Vec<char> = FLAG_ORDER.chars().filter(|c| flags.contains(*c)).collect();
    let mut extra: Vec<char> = flags.chars().filter(|c| !FLAG_ORDER.contains(*c)).collect();
    extra.sort_unstable();
    extra.dedup();
    known.extend(extra);
    known.into_iter().collect()
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({self})")
    }
}
