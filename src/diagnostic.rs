//! Lint diagnostics.
//!
//! This module provides the [`Diagnostic`] type for issues found during a
//! walk, the [`Severity`] scale, and the [`Report`] builder rules hand to
//! [`Context::report`](crate::walk::Context::report). Diagnostics are data:
//! the engine returns them in traversal order and never throws them.

use serde::Serialize;

use crate::model::Location;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational hint, does not affect validity.
    Hint,
    /// Warning that should be addressed.
    Warning,
    /// Error that fails the lint run.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Hint => write!(f, "hint"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic produced by a rule during a walk.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// The rule that produced this diagnostic.
    pub rule_id: String,
    /// Resolved severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Where the issue sits.
    pub location: Location,
    /// Whether the diagnostic points at the property key rather than the
    /// value.
    pub report_on_key: bool,
}

/// Input to [`Context::report`](crate::walk::Context::report).
///
/// Omitted fields fall back to the reporting context: the current node's
/// location and the rule's default severity.
pub struct Report {
    pub(crate) message: String,
    pub(crate) location: Option<Location>,
    pub(crate) severity: Option<Severity>,
    pub(crate) report_on_key: bool,
}

impl Report {
    /// Start a report with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
            severity: None,
            report_on_key: false,
        }
    }

    /// Point the report somewhere other than the current node.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Override the rule's default severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Point the diagnostic at the property key instead of the value.
    pub fn on_key(mut self) -> Self {
        self.report_on_key = true;
        self
    }
}
