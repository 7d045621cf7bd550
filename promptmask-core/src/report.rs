// promptmask-core/src/report.rs
//! Result types produced by the engine, and helpers for logging matched values
//! without leaking them.

use std::collections::HashMap;

use lazy_static::lazy_static;
use log::debug;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::config::Rule;

lazy_static! {
    /// Whether matched values may appear verbatim in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("PROMPTMASK_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Ordered mapping from each distinct matched value to the token that replaced it.
///
/// Entries keep first-seen order, which is also the order of the token indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pair unless `value` is already mapped. Returns true if inserted.
    pub fn insert(&mut self, value: impl Into<String>, token: impl Into<String>) -> bool {
        let value = value.into();
        if self.index.contains_key(&value) {
            return false;
        }
        self.index.insert(value.clone(), self.entries.len());
        self.entries.push((value, token.into()));
        true
    }

    pub fn get(&self, value: &str) -> Option<&str> {
        self.index.get(value).map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, value: &str) -> bool {
        self.index.contains_key(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(value, token)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(v, t)| (v.as_str(), t.as_str()))
    }

    /// The inverse mapping, token to original value, for building an undo.
    pub fn reverse(&self) -> ReplacementMap {
        let mut reversed = ReplacementMap::new();
        for (value, token) in self.iter() {
            reversed.insert(token, value);
        }
        reversed
    }
}

impl Serialize for ReplacementMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (value, token) in &self.entries {
            map.serialize_entry(value, token)?;
        }
        map.end()
    }
}

/// One rule's contribution to a sanitization call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRule {
    pub rule: Rule,
    /// Total number of matches, not the number of distinct values.
    pub match_count: usize,
    /// Matched substrings in order of occurrence, duplicates included.
    pub matches: Vec<String>,
    pub replacement_map: ReplacementMap,
}

impl AppliedRule {
    pub fn distinct_count(&self) -> usize {
        self.replacement_map.len()
    }

    pub fn token_for(&self, value: &str) -> Option<&str> {
        self.replacement_map.get(value)
    }
}

/// A rule that could not be applied and was treated as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRule {
    pub rule_id: String,
    pub rule_name: String,
    pub reason: String,
}

/// The outcome of one `sanitize` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizationResult {
    pub original_text: String,
    pub sanitized_text: String,
    /// Rules that matched at least once, in application order.
    pub applied_rules: Vec<AppliedRule>,
    /// Enabled rules that failed to compile or apply.
    pub skipped_rules: Vec<SkippedRule>,
    pub has_changes: bool,
}

impl SanitizationResult {
    pub fn total_matches(&self) -> usize {
        self.applied_rules.iter().map(|a| a.match_count).sum()
    }

    pub fn applied_rule(&self, rule_id: &str) -> Option<&AppliedRule> {
        self.applied_rules.iter().find(|a| a.rule.id == rule_id)
    }
}

/// Outcome of a dry-run match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternTestResult {
    pub matches: Vec<String>,
    pub count: usize,
}

impl PatternTestResult {
    pub fn from_matches(matches: Vec<String>) -> Self {
        let count = matches.len();
        Self { matches, count }
    }
}

/// Outcome of checking a pattern at authoring time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternValidation {
    pub valid: bool,
    pub error: Option<String>,
}

impl PatternValidation {
    pub fn ok() -> Self {
        Self { valid: true, error: None }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

/// The form of a matched value that is safe to write to a log.
pub fn loggable_value(value: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        value.to_string()
    } else {
        redact_sensitive(value)
    }
}

pub fn log_replacement_debug(rule_id: &str, value: &str, token: &str) {
    debug!(
        "Rule '{}' maps value '{}' to token '{}'",
        rule_id,
        loggable_value(value),
        token
    );
}
