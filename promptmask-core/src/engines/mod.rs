// promptmask-core/src/engines/mod.rs
//! Concrete implementations of the `SanitizationEngine` trait.
//!
//! `rule_engine` holds the find/replace engine driven by user rules. New engine
//! types live in their own file here and are declared with `pub mod <name>;`.

pub mod rule_engine;
