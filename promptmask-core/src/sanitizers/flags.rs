// promptmask-core/src/sanitizers/flags.rs
//! Parsing of single-letter regex flag strings (`"gi"`, `"gm"`, ...).
//!
//! License: MIT OR APACHE 2.0

use std::str::FromStr;

use crate::errors::PromptMaskError;

/// The regex options a rule's `flags` string can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegexFlags {
    /// `g`. Scanning is always global; the flag is kept for round-tripping.
    pub global: bool,
    /// `i`. Also makes the per-value replace pass case-insensitive.
    pub case_insensitive: bool,
    /// `m`. `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// `s`. `.` matches `\n`.
    pub dot_matches_new_line: bool,
}

impl Default for RegexFlags {
    fn default() -> Self {
        Self {
            global: true,
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
        }
    }
}

impl RegexFlags {
    /// Parses an optional flag string. A missing string means global matching only.
    pub fn parse(flags: Option<&str>) -> Result<Self, PromptMaskError> {
        match flags {
            None => Ok(Self::default()),
            Some(s) => s.parse(),
        }
    }

    /// Flags with nothing set, used when checking a bare pattern.
    pub fn none() -> Self {
        Self {
            global: false,
            ..Self::default()
        }
    }
}

impl FromStr for RegexFlags {
    type Err = PromptMaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::none();
        let mut seen = Vec::with_capacity(s.len());

        for c in s.chars() {
            if seen.contains(&c) {
                return Err(PromptMaskError::DuplicateFlag(c));
            }
            seen.push(c);

            match c {
                'g' => flags.global = true,
                'i' => flags.case_insensitive = true,
                'm' => flags.multi_line = true,
                's' => flags.dot_matches_new_line = true,
                // Unicode is always on and match indices are always available.
                'u' | 'd' => {}
                other => return Err(PromptMaskError::InvalidFlag(other)),
            }
        }

        Ok(flags)
    }
}
