//! Lint rules: the trait, the registry, and the built-in set.

pub mod builtin;
mod registry;
mod rule;

pub use registry::RuleRegistry;
pub use rule::{LintRule, RuleId};
