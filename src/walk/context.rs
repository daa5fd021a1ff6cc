//! Per-callback walk context.
//!
//! A [`Context`] is handed to every listener invocation. It carries the
//! current location, the nearest typed ancestors, and the reference registry
//! of the run, and collects diagnostics via [`Context::report`].

use std::collections::HashMap;

use crate::diagnostic::{Diagnostic, Report, Severity};
use crate::model::{Location, Node};
use crate::resolve::RefRegistry;

/// Result of [`Context::resolve`]: the node with references substituted.
pub struct Resolved {
    /// Location of the target for a resolved reference; for any other node,
    /// the current visit's location.
    pub location: Location,
    /// The target node, or the input unchanged when it was not a reference.
    pub node: Node,
}

/// State visible to a listener at one node occurrence.
pub struct Context<'w> {
    pub(crate) type_name: &'w str,
    pub(crate) location: &'w Location,
    pub(crate) parents: &'w HashMap<String, Node>,
    pub(crate) registry: &'w RefRegistry,
    pub(crate) rule_id: &'w str,
    pub(crate) severity: Severity,
    pub(crate) out: &'w mut Vec<Diagnostic>,
}

impl Context<'_> {
    /// Declared type of the current node.
    pub fn type_name(&self) -> &str {
        self.type_name
    }

    /// Location of the current node in its owning document.
    pub fn location(&self) -> &Location {
        self.location
    }

    /// The nearest ancestor of the given type on the current path, if any.
    /// Ancestry is logical: it follows reference substitutions, not the
    /// written layout.
    pub fn parent(&self, type_name: &str) -> Option<&Node> {
        self.parents.get(type_name)
    }

    /// The whole nearest-ancestor-by-type map, valid for the duration of the
    /// current listener call.
    pub fn parents(&self) -> &HashMap<String, Node> {
        self.parents
    }

    /// File a diagnostic. Missing report fields fall back to the current
    /// location and the owning rule's severity.
    pub fn report(&mut self, report: Report) {
        self.out.push(Diagnostic {
            rule_id: self.rule_id.to_string(),
            severity: report.severity.unwrap_or(self.severity),
            message: report.message,
            location: report.location.unwrap_or_else(|| self.location.clone()),
            report_on_key: report.report_on_key,
        });
    }

    /// Follow a reference node to its registered target. Non-reference nodes
    /// come back unchanged, located at the current visit.
    pub fn resolve(&self, node: &Node) -> Resolved {
        if node.is_ref() {
            if let Some(entry) = self.registry.resolve_node(node) {
                return Resolved {
                    location: entry.location.clone(),
                    node: entry.node.clone(),
                };
            }
        }
        Resolved {
            location: self.location.clone(),
            node: node.clone(),
        }
    }
}
