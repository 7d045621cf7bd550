//! compiler.rs - Builds the matching strategy for a single rule.
//!
//! A rule is matched either as a plain substring (`LiteralMatcher`) or as a
//! regular expression (`RegexMatcher`). `MatchStrategy` is the tagged union over
//! the two, and is the only thing the engine and the dry-run matcher talk to.
//! Nothing compiled here is cached; every call builds its matchers fresh.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{NoExpand, Regex, RegexBuilder};

use crate::config::{EngineSettings, Rule};
use crate::errors::PromptMaskError;
use crate::sanitizers::flags::RegexFlags;

/// Matches a pattern as literal text: case-sensitive, left to right, non-overlapping.
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    needle: String,
}

impl LiteralMatcher {
    pub fn new(pattern: &str) -> Result<Self, PromptMaskError> {
        if pattern.is_empty() {
            return Err(PromptMaskError::EmptyPattern);
        }
        Ok(Self {
            needle: pattern.to_string(),
        })
    }

    /// Every occurrence of the needle. After a hit the scan resumes at the end
    /// of that hit, so `"aa"` is found twice in `"aaaa"`, not three times.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        text.match_indices(self.needle.as_str())
            .map(|(_, hit)| hit)
            .collect()
    }

    /// Replaces every occurrence of the needle with `token`.
    pub fn replace_all(&self, text: &str, token: &str) -> String {
        text.replace(self.needle.as_str(), token)
    }
}

/// Matches a compiled regular expression with its parsed flags.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
    flags: RegexFlags,
}

impl RegexMatcher {
    pub fn new(pattern: &str, flags: RegexFlags, size_limit: usize) -> Result<Self, PromptMaskError> {
        if pattern.is_empty() {
            return Err(PromptMaskError::EmptyPattern);
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_matches_new_line)
            .size_limit(size_limit)
            .build()
            .map_err(|source| PromptMaskError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            regex,
            flags,
        })
    }

    /// Every non-empty match, in order, duplicates included.
    ///
    /// The whole text is always scanned. A zero-length match carries no content
    /// and is not recorded; the cursor steps one character past it so the scan
    /// always makes progress.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut found = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let Some(m) = self.regex.find_at(text, pos) else {
                break;
            };

            if m.is_empty() {
                pos = step_past(text, m.end());
                continue;
            }

            found.push(m.as_str());
            pos = m.end();
        }

        found
    }

    /// Replaces every occurrence of `value` (taken literally) with `token`.
    ///
    /// Case-insensitive only when the rule asked for `i`. `value` already matched
    /// the rule, so `size_limit` (which bounds user patterns) does not apply to
    /// the escaped literal built here.
    pub fn replace_value(&self, text: &str, value: &str, token: &str) -> Result<String, PromptMaskError> {
        if !self.flags.case_insensitive {
            return Ok(text.replace(value, token));
        }

        let value_regex = RegexBuilder::new(&regex::escape(value))
            .case_insensitive(true)
            .size_limit(usize::MAX)
            .build()
            .map_err(|_| PromptMaskError::ValueReplacement { value_len: value.len() })?;

        Ok(value_regex.replace_all(text, NoExpand(token)).into_owned())
    }
}

/// Index of the character boundary following `at`, or one past the end of `text`.
fn step_past(text: &str, at: usize) -> usize {
    match text[at..].chars().next() {
        Some(c) => at + c.len_utf8(),
        None => text.len() + 1,
    }
}

/// How a rule's pattern is matched against text.
#[derive(Debug, Clone)]
pub enum MatchStrategy {
    Literal(LiteralMatcher),
    Regex(RegexMatcher),
}

impl MatchStrategy {
    /// Builds the strategy for a raw pattern. `flags` are ignored in literal mode.
    pub fn compile(
        pattern: &str,
        is_regex: bool,
        flags: Option<&str>,
        size_limit: usize,
    ) -> Result<Self, PromptMaskError> {
        if is_regex {
            let flags = RegexFlags::parse(flags)?;
            debug!("Compiling regex pattern with flags {:?}", flags);
            Ok(Self::Regex(RegexMatcher::new(pattern, flags, size_limit)?))
        } else {
            Ok(Self::Literal(LiteralMatcher::new(pattern)?))
        }
    }

    pub fn for_rule(rule: &Rule, settings: &EngineSettings) -> Result<Self, PromptMaskError> {
        Self::compile(
            &rule.pattern,
            rule.is_regex,
            rule.flags.as_deref(),
            settings.regex_size_limit,
        )
    }

    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        match self {
            Self::Literal(m) => m.find_all(text),
            Self::Regex(m) => m.find_all(text),
        }
    }

    /// Applies `(value, token)` substitutions in order.
    pub fn substitute<'a, I>(&self, text: &str, replacements: I) -> Result<String, PromptMaskError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut out = text.to_string();
        for (value, token) in replacements {
            out = match self {
                // Every literal hit is the needle itself, so there is one value at most.
                Self::Literal(m) => m.replace_all(&out, token),
                Self::Regex(m) => m.replace_value(&out, value, token)?,
            };
        }
        Ok(out)
    }
}
