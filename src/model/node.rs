//! Generic document nodes.
//!
//! A [`Node`] is one vertex of a parsed document tree: a scalar, an ordered
//! mapping, or a sequence. Nodes are cheap `Arc` handles, so the resolver and
//! walker can share subtrees across documents without lifetime plumbing; the
//! `Arc` pointer doubles as a stable identity (see [`Node::id`]).
//!
//! Nodes are produced by the parse adapter and the source loader only — the
//! resolver and walker never build them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::span::SourceSpan;

/// The key used to recognize reference nodes.
pub const REF_KEY: &str = "$ref";

/// A node in a parsed document tree.
#[derive(Clone)]
pub struct Node {
    inner: Arc<NodeInner>,
}

struct NodeInner {
    kind: NodeKind,
    span: Option<SourceSpan>,
}

/// The shape of a node.
pub enum NodeKind {
    /// A scalar value, kept as its source text.
    Scalar(String),
    /// An ordered key/value mapping.
    Mapping(Mapping),
    /// An ordered sequence of nodes.
    Sequence(Vec<Node>),
}

/// An ordered mapping with by-key lookup.
pub struct Mapping {
    entries: Vec<MapEntry>,
    index: HashMap<String, usize>,
}

/// One mapping entry; the key carries its own span for on-key reporting.
pub struct MapEntry {
    pub key: String,
    pub key_span: Option<SourceSpan>,
    pub value: Node,
}

impl Mapping {
    /// Build a mapping from entries in document order. Duplicate keys keep
    /// the first occurrence in the lookup index.
    pub fn new(entries: Vec<MapEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.key.clone()).or_insert(i);
        }
        Self { entries, index }
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.index.get(key).map(|&i| &self.entries[i].value)
    }

    /// Look up a full entry by key.
    pub fn entry(&self, key: &str) -> Option<&MapEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Node {
    /// Create a scalar node.
    pub fn scalar(value: impl Into<String>, span: Option<SourceSpan>) -> Self {
        Self::from_kind(NodeKind::Scalar(value.into()), span)
    }

    /// Create a mapping node from entries in document order.
    pub fn mapping(entries: Vec<MapEntry>, span: Option<SourceSpan>) -> Self {
        Self::from_kind(NodeKind::Mapping(Mapping::new(entries)), span)
    }

    /// Create a sequence node.
    pub fn sequence(items: Vec<Node>, span: Option<SourceSpan>) -> Self {
        Self::from_kind(NodeKind::Sequence(items), span)
    }

    fn from_kind(kind: NodeKind, span: Option<SourceSpan>) -> Self {
        Self {
            inner: Arc::new(NodeInner { kind, span }),
        }
    }

    /// The node's shape.
    pub fn kind(&self) -> &NodeKind {
        &self.inner.kind
    }

    /// Source position, when the parser recorded one.
    pub fn span(&self) -> Option<SourceSpan> {
        self.inner.span
    }

    /// Stable identity for this node occurrence.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    /// Whether two handles point at the same node occurrence.
    pub fn same(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match &self.inner.kind {
            NodeKind::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match &self.inner.kind {
            NodeKind::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match &self.inner.kind {
            NodeKind::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Mapping lookup shorthand; `None` for non-mappings.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Scalar value of a mapping entry, e.g. `node.str_field("name")`.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|n| n.as_scalar())
    }

    /// Whether this node is a reference node: a mapping carrying a scalar
    /// `$ref` entry.
    pub fn is_ref(&self) -> bool {
        self.ref_value().is_some()
    }

    /// The written pointer string of a reference node.
    pub fn ref_value(&self) -> Option<&str> {
        self.get(REF_KEY).and_then(|n| n.as_scalar())
    }

    /// Project the subtree into a `serde_json::Value`. Scalars stay strings;
    /// this is a structural view for assertions and debugging, not a typed
    /// decoding.
    pub fn to_json(&self) -> serde_json::Value {
        match &self.inner.kind {
            NodeKind::Scalar(s) => serde_json::Value::String(s.clone()),
            NodeKind::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Node::to_json).collect())
            }
            NodeKind::Mapping(m) => {
                let mut obj = serde_json::Map::new();
                for entry in m.entries() {
                    obj.insert(entry.key.clone(), entry.value.to_json());
                }
                serde_json::Value::Object(obj)
            }
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_json().fmt(f)
    }
}
