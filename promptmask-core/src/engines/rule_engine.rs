// promptmask-core/src/engines/rule_engine.rs
//! A `SanitizationEngine` implementation that applies an ordered list of
//! user-defined find/replace rules and replaces each distinct matched value with
//! an indexed token.
//! License: MIT OR APACHE 2.0

use log::{debug, warn};

use crate::config::{EngineSettings, Rule};
use crate::engine::SanitizationEngine;
use crate::errors::PromptMaskError;
use crate::report::{
    log_replacement_debug, AppliedRule, PatternTestResult, ReplacementMap, SanitizationResult, SkippedRule,
};
use crate::sanitizers::compiler::MatchStrategy;

/// Builds the token for the `index`-th distinct value of a rule (1-based).
pub fn format_token(replacement: &str, index: usize) -> String {
    format!("{}_{}", replacement, index)
}

#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    settings: EngineSettings,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Runs one rule against `text`.
    ///
    /// Returns `Ok(None)` when the rule does not match, otherwise the rewritten
    /// text and the record of what was replaced. Distinct values are numbered in
    /// first-seen order and substituted in that same order.
    pub fn apply_rule(&self, rule: &Rule, text: &str) -> Result<Option<(String, AppliedRule)>, PromptMaskError> {
        let strategy = MatchStrategy::for_rule(rule, &self.settings)?;
        let found = strategy.find_all(text);
        if found.is_empty() {
            return Ok(None);
        }

        let mut replacement_map = ReplacementMap::new();
        for value in &found {
            if !replacement_map.contains(value) {
                let token = format_token(&rule.replacement, replacement_map.len() + 1);
                log_replacement_debug(&rule.id, value, &token);
                replacement_map.insert(*value, token);
            }
        }

        let rewritten = strategy.substitute(text, replacement_map.iter())?;

        let applied = AppliedRule {
            rule: rule.clone(),
            match_count: found.len(),
            matches: found.into_iter().map(str::to_string).collect(),
            replacement_map,
        };
        Ok(Some((rewritten, applied)))
    }
}

impl SanitizationEngine for RuleEngine {
    fn sanitize(&self, text: &str, rules: &[Rule]) -> SanitizationResult {
        let mut working = text.to_string();
        let mut applied_rules = Vec::new();
        let mut skipped_rules = Vec::new();

        for rule in rules.iter().filter(|r| r.enabled) {
            match self.apply_rule(rule, &working) {
                Ok(Some((rewritten, applied))) => {
                    debug!(
                        "Rule '{}' matched {} time(s), {} distinct value(s).",
                        rule.id,
                        applied.match_count,
                        applied.distinct_count()
                    );
                    working = rewritten;
                    applied_rules.push(applied);
                }
                Ok(None) => debug!("Rule '{}' did not match.", rule.id),
                Err(e) => {
                    warn!("Skipping rule '{}' ({}): {}", rule.id, rule.name, e);
                    skipped_rules.push(SkippedRule {
                        rule_id: rule.id.clone(),
                        rule_name: rule.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let has_changes = working != text;
        SanitizationResult {
            original_text: text.to_string(),
            sanitized_text: working,
            applied_rules,
            skipped_rules,
            has_changes,
        }
    }

    fn test_pattern(&self, text: &str, pattern: &str, is_regex: bool, flags: Option<&str>) -> PatternTestResult {
        if pattern.is_empty() || text.is_empty() {
            return PatternTestResult::default();
        }

        match MatchStrategy::compile(pattern, is_regex, flags, self.settings.regex_size_limit) {
            Ok(strategy) => {
                let matches = strategy.find_all(text).into_iter().map(str::to_string).collect();
                PatternTestResult::from_matches(matches)
            }
            Err(e) => {
                debug!("Pattern test found nothing, pattern rejected: {}", e);
                PatternTestResult::default()
            }
        }
    }

    fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}
