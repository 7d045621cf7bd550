//! Pattern matching primitives for the rule engine.
//!
//! This module turns a rule's `pattern`, `is_regex` switch and `flags` string into a
//! `MatchStrategy`: either a plain substring matcher or a compiled regular expression.
//! Both strategies expose the same scan operation, so the dry-run matcher used for
//! previews and the full sanitization pass always agree on what a rule matches.
//!
//! This module works closely with `config` (for rule definitions), `validators` (for
//! authoring-time checks), and `engines` (which drives substitution).

pub mod compiler;
pub mod flags;
