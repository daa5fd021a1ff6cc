//! Generic document model.
//!
//! An already-parsed tree of mapping/sequence/scalar nodes with source
//! provenance on every node and key, plus the identity types the resolver
//! and walker are built on: [`Source`], [`Document`], and [`Location`].

pub mod location;
pub mod node;
pub mod parse;
pub mod pointer;
pub mod source;
pub mod span;

pub use location::Location;
pub use node::{MapEntry, Mapping, Node, NodeKind, REF_KEY};
pub use parse::{parse_document, parse_with_source};
pub use source::{Document, Source};
pub use span::SourceSpan;
