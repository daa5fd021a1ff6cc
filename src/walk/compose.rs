//! Visitor composition.
//!
//! [`compose`] flattens the visitor trees of every rule in a run into flat
//! dispatch tables keyed by type name. Each listener becomes a candidate
//! carrying its ancestor chain and its specificity depth; the walker matches
//! chains against the live ancestor stack and picks winners by depth.
//! Composition happens once per run, so type names are validated here and a
//! miss fails fast instead of silently never firing.

use std::collections::HashMap;
use std::fmt;

use crate::diagnostic::Severity;
use crate::error::{ApivetError, Result};
use crate::types::TypeSchema;

use super::visitor::{EnterFn, LeaveFn, RefFn, RuleVisitor, SkipFn, VisitorNode};

/// Reserved wildcard name. Valid only at the top level of a visitor tree.
pub const ANY: &str = "any";

/// A type-scoped listener, flattened out of its tree.
pub(crate) struct TypeCandidate {
    /// Ancestor type names that must appear, in order, above a matching
    /// node. Empty for top-level listeners.
    pub chain: Vec<String>,
    /// Specificity: `chain.len() + 1`. Deeper wins.
    pub depth: usize,
    pub enter: Option<EnterFn>,
    pub leave: Option<LeaveFn>,
    pub skip: Option<SkipFn>,
    pub rule_id: String,
    pub severity: Severity,
}

impl TypeCandidate {
    pub(crate) fn has_listener(&self) -> bool {
        self.enter.is_some() || self.leave.is_some()
    }
}

/// A wildcard listener; fires at every visited node.
pub(crate) struct AnyCandidate {
    pub enter: Option<EnterFn>,
    pub leave: Option<LeaveFn>,
    pub rule_id: String,
    pub severity: Severity,
}

/// A reference observer with the scope it was declared under.
pub(crate) struct RefCandidate {
    /// Ancestor chain the observer is scoped to; empty means everywhere.
    pub chain: Vec<String>,
    pub observer: RefFn,
    pub rule_id: String,
    pub severity: Severity,
}

/// Flattened dispatch tables for one walk.
#[derive(Default)]
pub struct Dispatch {
    pub(crate) by_type: HashMap<String, Vec<TypeCandidate>>,
    pub(crate) any: Vec<AnyCandidate>,
    pub(crate) refs: Vec<RefCandidate>,
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("by_type", &self.by_type.keys().collect::<Vec<_>>())
            .field("any", &self.any.len())
            .field("refs", &self.refs.len())
            .finish()
    }
}

/// Flatten every rule's visitor tree into one [`Dispatch`].
///
/// Candidates keep registration order: rule order first, then declaration
/// order within a tree. The walker relies on that order when several
/// listeners tie at the same specificity.
pub fn compose(rules: Vec<RuleVisitor>, schema: &TypeSchema) -> Result<Dispatch> {
    let mut dispatch = Dispatch::default();
    for rule in rules {
        let owner = Owner {
            rule_id: rule.rule_id,
            severity: rule.severity,
        };
        let root = rule.root;
        if let Some(observer) = root.ref_observer {
            dispatch.refs.push(RefCandidate {
                chain: Vec::new(),
                observer,
                rule_id: owner.rule_id.clone(),
                severity: owner.severity,
            });
        }
        for (name, child) in root.children {
            if name == ANY {
                if !child.children.is_empty() {
                    return Err(ApivetError::UnknownType { name });
                }
                dispatch.any.push(AnyCandidate {
                    enter: child.enter,
                    leave: child.leave,
                    rule_id: owner.rule_id.clone(),
                    severity: owner.severity,
                });
                continue;
            }
            flatten(child, name, &mut Vec::new(), schema, &owner, &mut dispatch)?;
        }
    }
    Ok(dispatch)
}

struct Owner {
    rule_id: String,
    severity: Severity,
}

fn flatten(
    node: VisitorNode,
    type_name: String,
    path: &mut Vec<String>,
    schema: &TypeSchema,
    owner: &Owner,
    dispatch: &mut Dispatch,
) -> Result<()> {
    if type_name == ANY || !schema.contains(&type_name) {
        return Err(ApivetError::UnknownType { name: type_name });
    }
    if node.enter.is_some() || node.leave.is_some() || node.skip.is_some() {
        dispatch
            .by_type
            .entry(type_name.clone())
            .or_default()
            .push(TypeCandidate {
                chain: path.clone(),
                depth: path.len() + 1,
                enter: node.enter,
                leave: node.leave,
                skip: node.skip,
                rule_id: owner.rule_id.clone(),
                severity: owner.severity,
            });
    }
    if let Some(observer) = node.ref_observer {
        let mut chain = path.clone();
        chain.push(type_name.clone());
        dispatch.refs.push(RefCandidate {
            chain,
            observer,
            rule_id: owner.rule_id.clone(),
            severity: owner.severity,
        });
    }
    path.push(type_name);
    for (child_name, child) in node.children {
        flatten(child, child_name, path, schema, owner, dispatch)?;
    }
    path.pop();
    Ok(())
}
