//! The lint rule trait.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostic::Severity;
use crate::walk::VisitorNode;

/// Identifier for a lint rule, e.g. `tag-description`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub String);

impl RuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RuleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A lint rule: an identity plus the visitor tree that implements it.
///
/// Rules hold no traversal logic of their own. [`LintRule::visitor`] builds
/// a fresh tree per run; the engine composes the trees of every enabled rule
/// and walks the document once.
pub trait LintRule {
    /// Stable rule identifier.
    fn id(&self) -> RuleId;

    /// Short human-readable description of what the rule checks.
    fn description(&self) -> &str;

    /// Severity used when the run does not override it.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Build this rule's visitor tree.
    fn visitor(&self) -> VisitorNode;
}
