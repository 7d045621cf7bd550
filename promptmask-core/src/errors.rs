//! errors.rs - Custom error types for the promptmask-core library.
//!
//! This module defines a structured error enum for the library. Rule-level
//! failures raised while sanitizing are never returned to the caller; they are
//! captured per rule and surfaced as `SkippedRule` entries instead.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types produced by `promptmask-core`.
///
/// `#[non_exhaustive]` leaves room for new variants without breaking
/// downstream `match` statements.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PromptMaskError {
    #[error("Pattern cannot be empty")]
    EmptyPattern,

    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The matched value itself is never part of the message.
    #[error("Failed to replace a matched value of {value_len} bytes")]
    ValueReplacement { value_len: usize },

    #[error("Unsupported regex flag '{0}'")]
    InvalidFlag(char),

    #[error("Regex flag '{0}' is repeated")]
    DuplicateFlag(char),

    #[error("Duplicate rule id found: '{0}'")]
    DuplicateRuleId(String),

    #[error("Unknown rule id(s): {}", .0.join(", "))]
    UnknownRuleIds(Vec<String>),

    #[error("Failed to parse rule configuration: {0}")]
    ConfigParse(#[from] serde_yml::Error),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),
}
