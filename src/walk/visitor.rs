//! Visitor trees.
//!
//! A rule describes interest in node types as a tree of [`VisitorNode`]s.
//! Top-level children are type-scoped listeners; nesting a child under
//! another narrows it to nodes with that ancestry. The tree is declarative:
//! composition flattens it into dispatch tables before the walk starts.

use crate::diagnostic::Severity;
use crate::model::Node;
use crate::resolve::ResolvedRef;
use crate::walk::Context;

/// Callback fired when the walker enters a node.
pub type EnterFn = Box<dyn Fn(&Node, &mut Context<'_>)>;

/// Callback fired when the walker leaves a node.
pub type LeaveFn = Box<dyn Fn(&Node, &mut Context<'_>)>;

/// Predicate consulted before visiting a node; `true` prunes the subtree.
pub type SkipFn = Box<dyn Fn(&Node, &Context<'_>) -> bool>;

/// Observer fired for each reference-node occurrence, before substitution.
/// Receives the registry entry for the occurrence, or `None` when resolution
/// did not record one.
pub type RefFn = Box<dyn Fn(&Node, &mut Context<'_>, Option<&ResolvedRef>)>;

/// One node of a visitor tree.
#[derive(Default)]
pub struct VisitorNode {
    pub(crate) enter: Option<EnterFn>,
    pub(crate) leave: Option<LeaveFn>,
    pub(crate) skip: Option<SkipFn>,
    pub(crate) ref_observer: Option<RefFn>,
    pub(crate) children: Vec<(String, VisitorNode)>,
}

impl VisitorNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a node with only an enter listener. This is the common
    /// shape for simple rules.
    pub fn on_enter(f: impl Fn(&Node, &mut Context<'_>) + 'static) -> Self {
        Self::new().enter(f)
    }

    /// Fire when the walker enters a matching node.
    pub fn enter(mut self, f: impl Fn(&Node, &mut Context<'_>) + 'static) -> Self {
        self.enter = Some(Box::new(f));
        self
    }

    /// Fire when the walker leaves a matching node, after its children.
    pub fn leave(mut self, f: impl Fn(&Node, &mut Context<'_>) + 'static) -> Self {
        self.leave = Some(Box::new(f));
        self
    }

    /// Prune matching nodes for which the predicate returns `true`. Pruning
    /// is shared: a pruned subtree is invisible to every rule in the run.
    pub fn skip(mut self, f: impl Fn(&Node, &Context<'_>) -> bool + 'static) -> Self {
        self.skip = Some(Box::new(f));
        self
    }

    /// Observe reference nodes encountered within this scope. Observation
    /// happens per occurrence, before the walker substitutes the target.
    pub fn observe_refs(
        mut self,
        f: impl Fn(&Node, &mut Context<'_>, Option<&ResolvedRef>) + 'static,
    ) -> Self {
        self.ref_observer = Some(Box::new(f));
        self
    }

    /// Scope `child` to nodes of type `type_name` within this node's scope.
    /// At the tree root this is the ordinary "listen for a type" form; deeper
    /// nesting narrows by ancestry.
    pub fn child(mut self, type_name: impl Into<String>, child: VisitorNode) -> Self {
        self.children.push((type_name.into(), child));
        self
    }
}

/// A visitor tree bound to the rule that owns it.
pub struct RuleVisitor {
    pub rule_id: String,
    pub severity: Severity,
    pub root: VisitorNode,
}

impl RuleVisitor {
    pub fn new(rule_id: impl Into<String>, severity: Severity, root: VisitorNode) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            root,
        }
    }
}
