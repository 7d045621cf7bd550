// promptmask-core/src/engine.rs
//! Defines the core SanitizationEngine trait.
//!
//! The trait decouples collaborators (a preview pane, a submit hook) from the
//! concrete engine. Every method is pure: it reads its arguments, returns a fresh
//! value, and never mutates the rules it is given.
//!
//! License: MIT OR APACHE 2.0

use crate::config::{select_rules, EngineSettings, Rule};
use crate::report::{PatternTestResult, SanitizationResult};

/// A trait that defines the core functionality of a sanitization engine.
pub trait SanitizationEngine: Send + Sync {
    /// Applies every enabled rule, in order, to `text`.
    ///
    /// Each rule runs against the output of the previous one. A rule that cannot
    /// be compiled or applied is recorded in `skipped_rules` and leaves the text
    /// unchanged; it never aborts the other rules.
    ///
    /// Zero-length regex matches (such as `x*` between two non-`x` characters)
    /// are not counted and not replaced; only non-empty hits are recorded.
    fn sanitize(&self, text: &str, rules: &[Rule]) -> SanitizationResult;

    /// Applies exactly the rules whose ids are listed, in rule order.
    ///
    /// Operates on private copies, so the caller's `enabled` flags are neither
    /// consulted nor modified. Unknown ids are ignored.
    fn sanitize_selected(&self, text: &str, rules: &[Rule], selected_ids: &[&str]) -> SanitizationResult {
        let selected = select_rules(rules, selected_ids);
        self.sanitize(text, &selected)
    }

    /// Dry-run of the matching half of `sanitize` for a single pattern.
    ///
    /// Returns an empty result for an empty pattern, empty text, or a pattern
    /// that does not compile. Counts follow the same rules as `sanitize`:
    /// zero-length regex matches are not counted.
    fn test_pattern(&self, text: &str, pattern: &str, is_regex: bool, flags: Option<&str>) -> PatternTestResult;

    /// Returns a reference to the engine's settings.
    fn settings(&self) -> &EngineSettings;
}
