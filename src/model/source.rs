//! Source identities and documents.
//!
//! A [`Source`] names one loaded document: a normalized identifier used for
//! equality and caching, plus a short display name for diagnostics. A
//! [`Document`] pairs a source with its parsed root node. Two documents are
//! the same document exactly when their source identifiers are equal; the
//! source loader's cache enforces one `Document` instance per identifier.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::node::Node;

/// Identity of a loaded document.
#[derive(Clone)]
pub struct Source {
    inner: Arc<SourceInfo>,
}

struct SourceInfo {
    /// Normalized identifier (absolute path or caller-supplied name).
    id: String,
    /// Short name used in diagnostics.
    name: String,
}

impl Source {
    /// Create a source whose identifier and display name differ, e.g. an
    /// absolute path displayed by file name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(SourceInfo {
                id: id.into(),
                name: name.into(),
            }),
        }
    }

    /// Create a source displayed by its identifier, for in-memory documents.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name)
    }

    /// The normalized identifier.
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Source {}

impl Hash for Source {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.id)
    }
}

/// A parsed document: source identity plus root node.
#[derive(Debug)]
pub struct Document {
    source: Source,
    root: Node,
}

impl Document {
    pub fn new(source: Source, root: Node) -> Self {
        Self { source, root }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }
}
