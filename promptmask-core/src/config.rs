//! Configuration management for `promptmask-core`.
//!
//! This module defines the `Rule` value the engine consumes and the `RuleSet`
//! container a collaborator uses as its rule source. It handles YAML
//! deserialization and provides utilities for loading, merging, validating and
//! subsetting rule sets. The engine itself never mutates any of these values.
//!
//! License: MIT OR Apache-2.0

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::PromptMaskError;
use crate::validators::validate_rule;

/// Default ceiling for the compiled size of a single regex, in bytes.
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A single user-defined find/replace rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct Rule {
    /// Stable identifier, unique within a rule set.
    pub id: String,
    /// Display label. Not used for matching.
    pub name: String,
    /// Literal text or regular expression, depending on `is_regex`.
    pub pattern: String,
    /// Prefix of the generated tokens: `replacement_1`, `replacement_2`, ...
    pub replacement: String,
    pub is_regex: bool,
    /// Regex flag string such as `"gi"`. Only read when `is_regex` is set.
    pub flags: Option<String>,
    pub enabled: bool,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            pattern: String::new(),
            replacement: "[REDACTED]".to_string(),
            is_regex: false,
            flags: None,
            enabled: true,
            category: None,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }
}

impl Rule {
    /// A new enabled literal rule with a random id, stamped with the current time.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
            created_at: now,
            updated_at: now,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Switches the rule to regex mode. `None` means the default global scan.
    pub fn with_regex(mut self, flags: Option<&str>) -> Self {
        self.is_regex = true;
        self.flags = flags.map(str::to_string);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Upper bound on the compiled size of any regex built for a rule.
    pub regex_size_limit: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

/// An ordered rule list plus engine settings. Rule order is application order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleSet {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Parses and validates a rule set from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let set: RuleSet = serde_yml::from_str(text)
            .map_err(PromptMaskError::from)
            .context("Failed to parse rule set")?;
        validate_rules(&set.rules)?;
        Ok(set)
    }

    /// Loads rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .map_err(PromptMaskError::from)
            .with_context(|| format!("Failed to read rule file {}", path.display()))?;
        let set = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load rule file {}", path.display()))?;

        info!("Loaded {} rules from file {}.", set.rules.len(), path.display());
        Ok(set)
    }

    /// Loads the built-in starter rules.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let set = Self::from_yaml_str(default_yaml).context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", set.rules.len());
        Ok(set)
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// A copy holding only the listed rules, in rule-set order, each enabled.
    ///
    /// Every id must exist in the set. `self` is left untouched.
    pub fn subset(&self, ids: &[&str]) -> Result<RuleSet, PromptMaskError> {
        let known: HashSet<&str> = self.rules.iter().map(|r| r.id.as_str()).collect();
        let unknown: Vec<String> = ids
            .iter()
            .filter(|id| !known.contains(*id))
            .map(|id| id.to_string())
            .collect();
        if !unknown.is_empty() {
            return Err(PromptMaskError::UnknownRuleIds(unknown));
        }

        Ok(RuleSet {
            engine: self.engine.clone(),
            rules: select_rules(&self.rules, ids),
        })
    }
}

/// Copies of `rules` with `enabled` set exactly for the listed ids.
///
/// Order follows `rules`, not `ids`; rules not listed are dropped.
pub fn select_rules(rules: &[Rule], ids: &[&str]) -> Vec<Rule> {
    let wanted: HashSet<&str> = ids.iter().copied().collect();
    rules
        .iter()
        .filter(|r| wanted.contains(r.id.as_str()))
        .cloned()
        .map(|mut r| {
            r.enabled = true;
            r
        })
        .collect()
}

/// Merges user rules and engine settings over the defaults.
///
/// A user rule replaces the default rule with the same id in place; user rules
/// with new ids are appended in their own order.
pub fn merge_rules(default_set: RuleSet, user_set: Option<RuleSet>) -> RuleSet {
    debug!("merge_rules called. Initial default rules count: {}", default_set.rules.len());

    let Some(user_set) = user_set else {
        return default_set;
    };

    let mut rules = default_set.rules;
    let positions: HashMap<String, usize> = rules
        .iter()
        .enumerate()
        .map(|(i, r)| (r.id.clone(), i))
        .collect();

    debug!("User rule set provided. Merging {} user rules.", user_set.rules.len());
    for user_rule in user_set.rules {
        match positions.get(&user_rule.id) {
            Some(&i) => rules[i] = user_rule,
            None => rules.push(user_rule),
        }
    }

    debug!("Final total rules after merge: {}", rules.len());
    RuleSet {
        engine: user_set.engine,
        rules,
    }
}

/// Validates rule integrity: non-empty unique ids, usable patterns and flags.
///
/// Every problem is collected so the author sees them all at once.
pub fn validate_rules(rules: &[Rule]) -> Result<()> {
    let mut ids = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.id.is_empty() {
            errors.push(format!("Rule '{}' has an empty `id` field.", rule.name));
        } else if !ids.insert(rule.id.as_str()) {
            errors.push(PromptMaskError::DuplicateRuleId(rule.id.clone()).to_string());
        }

        if let Err(e) = validate_rule(rule) {
            errors.push(format!("Rule '{}': {}", rule.id, e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
    }
}
