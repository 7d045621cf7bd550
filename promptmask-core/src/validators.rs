// File: promptmask-core/src/validators.rs
//! Authoring-time validation of patterns and rules.
//!
//! The engine never calls these on its own hot path: a rule that slips through
//! and fails at apply time is skipped there instead. Callers are expected to run
//! `validate_pattern` (or `validate_rule`) before accepting a rule.
//!
//! License: MIT OR APACHE 2.0

use crate::config::{Rule, DEFAULT_REGEX_SIZE_LIMIT};
use crate::errors::PromptMaskError;
use crate::report::PatternValidation;
use crate::sanitizers::compiler::{LiteralMatcher, RegexMatcher};
use crate::sanitizers::flags::RegexFlags;

/// Checks that `pattern` is non-empty and, in regex mode, compiles with no flags.
///
/// Literal patterns are always valid once non-empty.
pub fn validate_pattern(pattern: &str, is_regex: bool) -> PatternValidation {
    match check_pattern(pattern, is_regex) {
        Ok(()) => PatternValidation::ok(),
        Err(PromptMaskError::InvalidRegex { source, .. }) => PatternValidation::invalid(source.to_string()),
        Err(e) => PatternValidation::invalid(e.to_string()),
    }
}

fn check_pattern(pattern: &str, is_regex: bool) -> Result<(), PromptMaskError> {
    if is_regex {
        RegexMatcher::new(pattern, RegexFlags::none(), DEFAULT_REGEX_SIZE_LIMIT)?;
    } else {
        LiteralMatcher::new(pattern)?;
    }
    Ok(())
}

/// Checks a whole rule: the pattern, and for regex rules the flags they will be
/// compiled with.
pub fn validate_rule(rule: &Rule) -> Result<(), PromptMaskError> {
    if !rule.is_regex {
        return check_pattern(&rule.pattern, false);
    }

    let flags = RegexFlags::parse(rule.flags.as_deref())?;
    RegexMatcher::new(&rule.pattern, flags, DEFAULT_REGEX_SIZE_LIMIT)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pattern_is_invalid_in_both_modes() {
        for is_regex in [true, false] {
            let v = validate_pattern("", is_regex);
            assert!(!v.valid);
            assert_eq!(v.error.as_deref(), Some("Pattern cannot be empty"));
        }
    }

    #[test]
    fn test_unclosed_group_depends_on_mode() {
        let as_regex = validate_pattern("(unclosed", true);
        assert!(!as_regex.valid);
        assert!(as_regex.error.is_some());

        let as_literal = validate_pattern("(unclosed", false);
        assert!(as_literal.valid);
        assert_eq!(as_literal.error, None);
    }

    #[test]
    fn test_valid_regex() {
        assert!(validate_pattern(r"[a-z]+@[a-z]+\.com", true).valid);
    }

    #[test]
    fn test_validate_rule_checks_flags() {
        let rule = Rule::new("r", "abc", "[R]").with_regex(Some("gq"));
        assert!(matches!(validate_rule(&rule), Err(PromptMaskError::InvalidFlag('q'))));
    }

    #[test]
    fn test_validate_rule_ignores_flags_on_literals() {
        let mut rule = Rule::new("r", "abc", "[R]");
        rule.flags = Some("zz".to_string());
        assert!(validate_rule(&rule).is_ok());
    }
}
