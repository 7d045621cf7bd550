// promptmask-core/src/lib.rs
//! # PromptMask Core Library
//!
//! `promptmask-core` applies an ordered list of user-defined find/replace rules
//! (literal or regular expression) to free-form text. It returns the transformed
//! text, a record of which rules fired and how often, and for every rule a
//! mapping from each distinct matched value to the token that replaced it.
//!
//! The library is pure and stateless: no I/O on the sanitization path, no caches,
//! and the rules it is given are never mutated.
//!
//! ## Modules
//!
//! * `config`: Defines `Rule` and `RuleSet`, with YAML loading, merging and subsetting.
//! * `sanitizers`: Builds the literal or regex `MatchStrategy` for a rule.
//! * `validators`: Authoring-time checks for patterns and rules.
//! * `report`: Result types (`SanitizationResult`, `AppliedRule`, ...) and log helpers.
//! * `engine`: Defines the `SanitizationEngine` trait.
//! * `engines`: Contains the concrete `RuleEngine`.
//! * `headless`: One-shot entry points over a default engine.
//!
//! ## Token scheme
//!
//! Within one rule and one call, distinct matched values are numbered from 1 in
//! first-seen order and replaced by `replacement + "_" + index`. Two different
//! e-mail addresses masked by a rule with replacement `[EMAIL]` become
//! `[EMAIL]_1` and `[EMAIL]_2`; repeats of the same address share a token.
//!
//! ## Usage Example
//!
//! ```rust
//! use promptmask_core::{sanitize, Rule};
//!
//! let rules = vec![
//!     Rule::new("Email", r"[a-z]+@[a-z]+\.com", "[EMAIL]").with_regex(Some("g")),
//! ];
//! let result = sanitize("contact a@x.com or b@y.com or a@x.com again", &rules);
//!
//! assert_eq!(result.sanitized_text, "contact [EMAIL]_1 or [EMAIL]_2 or [EMAIL]_1 again");
//! assert_eq!(result.applied_rules[0].match_count, 3);
//! assert_eq!(result.applied_rules[0].replacement_map.len(), 2);
//! ```
//!
//! ## Error Handling
//!
//! `sanitize` and `test_pattern` never fail: a rule that cannot be compiled or
//! applied is reported in `SanitizationResult::skipped_rules` and treated as a
//! no-op. Rule loading returns `anyhow::Result`; `PromptMaskError` is the typed
//! error underneath.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod report;
pub mod sanitizers;
pub mod validators;

/// Re-exports the rule types and functions for managing rule sets.
pub use config::{
    merge_rules,
    select_rules,
    validate_rules,
    EngineSettings,
    Rule,
    RuleSet,
    DEFAULT_REGEX_SIZE_LIMIT,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::PromptMaskError;

/// Re-exports the engine trait and its concrete implementation.
pub use engine::SanitizationEngine;
pub use engines::rule_engine::{format_token, RuleEngine};

/// Re-exports the result types returned by the engine.
pub use report::{
    AppliedRule,
    PatternTestResult,
    PatternValidation,
    ReplacementMap,
    SanitizationResult,
    SkippedRule,
};

/// Re-exports the matching strategy for callers that drive matching directly.
pub use sanitizers::compiler::{LiteralMatcher, MatchStrategy, RegexMatcher};
pub use sanitizers::flags::RegexFlags;

/// Re-exports the one-shot entry points.
pub use headless::{sanitize, sanitize_selected, sanitize_with_rule_set, test_pattern};
pub use validators::{validate_pattern, validate_rule};
