//! Reference resolution.
//!
//! A resolution pass discovers every cross-reference reachable from a root
//! document, guided by the type schema's `referenceable` slots, and resolves
//! each to a target node, owning document, and location. Chains of references
//! are followed transitively: every intermediate hop gets its own registry
//! entry, inner hops first. Resolved targets are then scanned as if they were
//! inline content, so references inside referenced subtrees surface too.
//!
//! Any failure — malformed pointer, missing target, loader error, or a
//! cycle — aborts the whole pass; there is no partial registry.

mod registry;

pub use registry::{RefKey, RefRegistry, ResolvedRef};

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ApivetError, Result};
use crate::loader::SourceLoader;
use crate::model::{pointer, Document, Location, Node, NodeKind, Source};
use crate::types::{ChildSlot, TypeSchema, TypeShape};

/// Resolve every reference reachable from `root`, treating its root node as
/// `root_type`.
pub fn resolve_document(
    root: &Arc<Document>,
    loader: &dyn SourceLoader,
    schema: &TypeSchema,
    root_type: &str,
) -> Result<RefRegistry> {
    if !schema.contains(root_type) {
        return Err(ApivetError::UnknownType {
            name: root_type.to_string(),
        });
    }
    let mut resolver = Resolver {
        loader,
        schema,
        registry: RefRegistry::new(),
        scanned: HashSet::new(),
    };
    let location = Location::root(root.source().clone());
    resolver.scan_node(&root.root().clone(), root_type, root, &location)?;
    Ok(resolver.registry)
}

struct Resolver<'a> {
    loader: &'a dyn SourceLoader,
    schema: &'a TypeSchema,
    registry: RefRegistry,
    scanned: HashSet<Location>,
}

/// A resolved pointer target, before it is tied to a written ref string.
struct Target {
    document: Arc<Document>,
    location: Location,
    node: Node,
}

impl Resolver<'_> {
    /// Discover references in `node`, treated as `type_name`. Each location
    /// is scanned at most once; diamonds and cross-document sharing converge
    /// here instead of looping.
    fn scan_node(
        &mut self,
        node: &Node,
        type_name: &str,
        document: &Arc<Document>,
        location: &Location,
    ) -> Result<()> {
        if !self.scanned.insert(location.clone()) {
            return Ok(());
        }
        let Some(def) = self.schema.get(type_name) else {
            return Ok(());
        };

        match def.shape() {
            TypeShape::Object { properties } => {
                let Some(mapping) = node.as_mapping() else {
                    return Ok(());
                };
                for prop in properties {
                    if let Some(child) = mapping.get(&prop.name) {
                        self.scan_slot(child, &prop.slot, document, location.child(prop.name.as_str()))?;
                    }
                }
            }
            TypeShape::Map { value } => {
                let Some(mapping) = node.as_mapping() else {
                    return Ok(());
                };
                for entry in mapping.entries() {
                    self.scan_slot(&entry.value, value, document, location.child(entry.key.as_str()))?;
                }
            }
            TypeShape::List { item } => {
                let Some(items) = node.as_sequence() else {
                    return Ok(());
                };
                for (index, child) in items.iter().enumerate() {
                    self.scan_slot(child, item, document, location.child(index.to_string()))?;
                }
            }
        }
        Ok(())
    }

    /// Handle one child slot: resolve a reference node if the slot allows
    /// one, then continue discovery on whatever content ends up there.
    fn scan_slot(
        &mut self,
        node: &Node,
        slot: &ChildSlot,
        document: &Arc<Document>,
        location: Location,
    ) -> Result<()> {
        if slot.referenceable && node.is_ref() {
            let mut chain = Vec::new();
            let resolved = self.resolve_ref(node, document, &mut chain)?;
            if let Some(type_name) = &slot.type_name {
                let document = Arc::clone(&resolved.document);
                let target_location = resolved.location.clone();
                let target = resolved.node.clone();
                self.scan_node(&target, type_name, &document, &target_location)?;
            }
            return Ok(());
        }
        if let Some(type_name) = &slot.type_name {
            self.scan_node(node, type_name, document, &location)?;
        }
        Ok(())
    }

    /// Resolve one reference node, following transitive chains. `chain`
    /// holds the `(source, fragment)` pairs of the chain in progress; a
    /// repeat is a circular pointer.
    fn resolve_ref(
        &mut self,
        ref_node: &Node,
        document: &Arc<Document>,
        chain: &mut Vec<(Source, String)>,
    ) -> Result<ResolvedRef> {
        let raw = ref_node
            .ref_value()
            .ok_or_else(|| ApivetError::PointerSyntax {
                raw: String::new(),
            })?
            .to_string();
        let key = RefKey {
            source: document.source().clone(),
            reference: raw.clone(),
        };
        if let Some(existing) = self.registry.get(document.source(), &raw) {
            let existing = existing.clone();
            self.registry.link_node(ref_node, &key);
            return Ok(existing);
        }

        debug!(reference = %raw, source = %document.source(), "resolving reference");
        let (specifier, fragment) = pointer::split_ref(&raw);
        let target_doc = match specifier {
            None | Some("") => Arc::clone(document),
            Some(path) => self.loader.load(Some(document), path)?,
        };
        let segments = pointer::parse_fragment(&raw, fragment)?;

        let hop = (
            target_doc.source().clone(),
            pointer::render_fragment(&segments),
        );
        if chain.contains(&hop) {
            return Err(ApivetError::CircularReference);
        }
        chain.push(hop);
        let target = self.walk_pointer(&target_doc, &segments, &raw, chain)?;
        chain.pop();

        let resolved = ResolvedRef {
            reference: raw,
            location: target.location,
            node: target.node,
            document: target.document,
        };
        self.registry.insert(key.clone(), resolved.clone());
        self.registry.link_node(ref_node, &key);
        Ok(resolved)
    }

    /// Walk fragment segments from a document root. Reference nodes met
    /// along the way — mid-path or as the final node — are resolved in the
    /// same chain and the walk continues from their targets.
    fn walk_pointer(
        &mut self,
        document: &Arc<Document>,
        segments: &[String],
        raw: &str,
        chain: &mut Vec<(Source, String)>,
    ) -> Result<Target> {
        let mut doc = Arc::clone(document);
        let mut current = doc.root().clone();
        let mut consumed: Vec<String> = Vec::new();

        for segment in segments {
            if current.is_ref() {
                let hop = self.resolve_ref(&current, &doc, chain)?;
                doc = hop.document;
                consumed = hop.location.segments().to_vec();
                current = hop.node;
            }
            let next = match current.kind() {
                NodeKind::Mapping(m) => m.get(segment).cloned(),
                NodeKind::Sequence(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| items.get(i))
                    .cloned(),
                NodeKind::Scalar(_) => None,
            };
            current = next.ok_or_else(|| ApivetError::TargetNotFound {
                pointer: raw.to_string(),
            })?;
            consumed.push(segment.clone());
        }

        if current.is_ref() {
            let hop = self.resolve_ref(&current, &doc, chain)?;
            return Ok(Target {
                document: hop.document,
                location: hop.location,
                node: hop.node,
            });
        }
        Ok(Target {
            document: doc.clone(),
            location: Location::new(doc.source().clone(), consumed),
            node: current,
        })
    }
}
