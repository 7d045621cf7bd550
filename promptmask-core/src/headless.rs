// promptmask-core/src/headless.rs

//! `headless.rs`
//! One-shot entry points backed by a default `RuleEngine`.
//!
//! These are what most collaborators call: a preview hook on each keystroke, an
//! apply hook on submit, and a rule editor checking a pattern before saving it.

use anyhow::Result;

use crate::config::{Rule, RuleSet};
use crate::engine::SanitizationEngine;
use crate::engines::rule_engine::RuleEngine;
use crate::report::{PatternTestResult, SanitizationResult};

/// Applies every enabled rule, in order, to `text`.
///
/// Zero-length regex matches are neither recorded nor replaced.
pub fn sanitize(text: &str, rules: &[Rule]) -> SanitizationResult {
    RuleEngine::new().sanitize(text, rules)
}

/// Applies only the rules whose ids are listed, ignoring their stored `enabled` flag.
pub fn sanitize_selected(text: &str, rules: &[Rule], selected_ids: &[&str]) -> SanitizationResult {
    RuleEngine::new().sanitize_selected(text, rules, selected_ids)
}

/// Counts what a pattern would match in `text` without replacing anything.
///
/// Only non-empty matches count, so `x*` reports the runs of `x`, not the gaps.
pub fn test_pattern(text: &str, pattern: &str, is_regex: bool, flags: Option<&str>) -> PatternTestResult {
    RuleEngine::new().test_pattern(text, pattern, is_regex, flags)
}

/// Sanitizes `text` with a full rule set, honouring its engine settings.
///
/// With `selected_ids`, only those rules are applied; every id must exist.
pub fn sanitize_with_rule_set(text: &str, rule_set: &RuleSet, selected_ids: Option<&[&str]>) -> Result<SanitizationResult> {
    let engine = RuleEngine::with_settings(rule_set.engine.clone());
    let result = match selected_ids {
        Some(ids) => {
            let subset = rule_set.subset(ids)?;
            engine.sanitize(text, &subset.rules)
        }
        None => engine.sanitize(text, &rule_set.rules),
    };
    Ok(result)
}
