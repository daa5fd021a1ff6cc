//! Parsing documents from YAML text.
//!
//! Thin adapter over `marked_yaml`, which keeps line/column markers on every
//! node and mapping key. This is the only place [`Node`] trees are built from
//! source text; the resolver and walker consume the result as-is.

use std::path::PathBuf;
use std::sync::Arc;

use marked_yaml::types::Node as YamlNode;

use crate::error::{ApivetError, Result};
use crate::model::node::{MapEntry, Node};
use crate::model::source::{Document, Source};
use crate::model::span::SourceSpan;

/// Parse YAML text into an in-memory document named `name`.
pub fn parse_document(name: impl Into<String>, text: &str) -> Result<Arc<Document>> {
    parse_with_source(Source::named(name), text)
}

/// Parse YAML text into a document with an explicit source identity. Used by
/// the source loader, where the identifier is the normalized path.
pub fn parse_with_source(source: Source, text: &str) -> Result<Arc<Document>> {
    let parsed = marked_yaml::parse_yaml(0, text).map_err(|e| ApivetError::SourceParse {
        path: PathBuf::from(source.id()),
        message: e.to_string(),
    })?;
    let root = convert(&parsed);
    Ok(Arc::new(Document::new(source, root)))
}

fn convert(node: &YamlNode) -> Node {
    match node {
        YamlNode::Scalar(scalar) => Node::scalar(scalar.as_str(), span_of(scalar.span())),
        YamlNode::Sequence(sequence) => {
            let items = sequence.iter().map(convert).collect();
            Node::sequence(items, span_of(sequence.span()))
        }
        YamlNode::Mapping(mapping) => {
            let entries = mapping
                .iter()
                .map(|(key, value)| MapEntry {
                    key: key.as_str().to_string(),
                    key_span: span_of(key.span()),
                    value: convert(value),
                })
                .collect();
            Node::mapping(entries, span_of(mapping.span()))
        }
    }
}

fn span_of(span: &marked_yaml::types::Span) -> Option<SourceSpan> {
    let start = span.start()?;
    let end = span.end().unwrap_or(start);
    Some(SourceSpan::new(
        start.line(),
        start.column(),
        end.line(),
        end.column(),
    ))
}
