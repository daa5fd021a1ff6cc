//! The resolved-reference registry.
//!
//! Output of a resolution pass: an insertion-ordered map from written
//! pointer identity — `(originating source, ref string)` — to its resolved
//! target. Built once, read-only afterwards. Insertion order is discovery
//! order and is part of the contract.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::model::{Document, Location, Node, Source};

/// Identity of a written reference: where it was written, and what was
/// written. Two occurrences of the same ref string in one document share one
/// registry entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RefKey {
    pub source: Source,
    pub reference: String,
}

/// A fully resolved reference.
#[derive(Clone, Debug)]
pub struct ResolvedRef {
    /// The pointer string as written.
    pub reference: String,
    /// Location of the target node.
    pub location: Location,
    /// The target node itself (never a reference node).
    pub node: Node,
    /// The document owning the target.
    pub document: Arc<Document>,
}

/// Registry of every reference discovered during one resolution pass.
#[derive(Debug, Default)]
pub struct RefRegistry {
    entries: IndexMap<RefKey, ResolvedRef>,
    by_node: HashMap<usize, RefKey>,
}

impl RefRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved reference. The first resolution of a key wins;
    /// resolution is idempotent, so later insertions carry the same target.
    pub(crate) fn insert(&mut self, key: RefKey, resolved: ResolvedRef) {
        self.entries.entry(key).or_insert(resolved);
    }

    /// Associate a specific reference-node occurrence with its entry, so the
    /// walker and `Context::resolve` can go from node to target directly.
    pub(crate) fn link_node(&mut self, node: &Node, key: &RefKey) {
        self.by_node.insert(node.id(), key.clone());
    }

    /// Look up by written pointer identity.
    pub fn get(&self, source: &Source, reference: &str) -> Option<&ResolvedRef> {
        self.entries.get(&RefKey {
            source: source.clone(),
            reference: reference.to_string(),
        })
    }

    /// Look up the target of a reference-node occurrence seen during
    /// resolution.
    pub fn resolve_node(&self, node: &Node) -> Option<&ResolvedRef> {
        let key = self.by_node.get(&node.id())?;
        self.entries.get(key)
    }

    /// Entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&RefKey, &ResolvedRef)> {
        self.entries.iter()
    }

    /// Written ref strings in discovery order; handy in assertions.
    pub fn references(&self) -> Vec<&str> {
        self.entries.keys().map(|k| k.reference.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Source;

    fn resolved(source: &Source, reference: &str, node: Node) -> ResolvedRef {
        let document = Arc::new(Document::new(source.clone(), node.clone()));
        ResolvedRef {
            reference: reference.to_string(),
            location: Location::root(source.clone()),
            node,
            document,
        }
    }

    #[test]
    fn preserves_insertion_order() {
        let source = Source::named("a.yaml");
        let mut registry = RefRegistry::new();
        for reference in ["#/defs", "#/tmp/info", "#/zzz"] {
            let key = RefKey {
                source: source.clone(),
                reference: reference.to_string(),
            };
            registry.insert(key, resolved(&source, reference, Node::scalar("x", None)));
        }
        assert_eq!(registry.references(), ["#/defs", "#/tmp/info", "#/zzz"]);
    }

    #[test]
    fn same_key_registers_once() {
        let source = Source::named("a.yaml");
        let key = RefKey {
            source: source.clone(),
            reference: "#/x".to_string(),
        };
        let mut registry = RefRegistry::new();
        let first = Node::scalar("first", None);
        registry.insert(key.clone(), resolved(&source, "#/x", first.clone()));
        registry.insert(key.clone(), resolved(&source, "#/x", Node::scalar("second", None)));

        assert_eq!(registry.len(), 1);
        let entry = registry.get(&source, "#/x").unwrap();
        assert!(entry.node.same(&first));
    }

    #[test]
    fn node_occurrences_share_an_entry() {
        let source = Source::named("a.yaml");
        let key = RefKey {
            source: source.clone(),
            reference: "#/x".to_string(),
        };
        let mut registry = RefRegistry::new();
        registry.insert(key.clone(), resolved(&source, "#/x", Node::scalar("t", None)));

        let occurrence_a = Node::scalar("ref-a", None);
        let occurrence_b = Node::scalar("ref-b", None);
        registry.link_node(&occurrence_a, &key);
        registry.link_node(&occurrence_b, &key);

        let a = registry.resolve_node(&occurrence_a).unwrap();
        let b = registry.resolve_node(&occurrence_b).unwrap();
        assert!(a.node.same(&b.node));
        assert!(registry.resolve_node(&Node::scalar("other", None)).is_none());
    }
}
