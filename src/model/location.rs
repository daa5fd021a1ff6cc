//! Logical node locations.
//!
//! A [`Location`] denotes a node by its owning source and the pointer walked
//! from that document's root. Locations are the identity unit for diagnostics
//! and for cycle detection: two locations are equal exactly when they name
//! the same source and the same segment sequence.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::pointer;
use super::source::Source;

/// A node's position inside a document graph.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Location {
    source: Source,
    segments: Vec<String>,
}

impl Location {
    /// The root of a document.
    pub fn root(source: Source) -> Self {
        Self {
            source,
            segments: Vec::new(),
        }
    }

    /// Build a location from explicit segments.
    pub fn new(source: Source, segments: Vec<String>) -> Self {
        Self { source, segments }
    }

    /// Extend by one segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self {
            source: self.source.clone(),
            segments,
        }
    }

    /// Extend by several segments, e.g. to point a diagnostic at a
    /// grandchild of the current node.
    pub fn append<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments = self.segments.clone();
        segments.extend(extra.into_iter().map(Into::into));
        Self {
            source: self.source.clone(),
            segments,
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The escaped `#/…` fragment for this location.
    pub fn fragment(&self) -> String {
        pointer::render_fragment(&self.segments)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.fragment())
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Location", 2)?;
        state.serialize_field("source", self.source.name())?;
        state.serialize_field("pointer", &self.fragment())?;
        state.end()
    }
}
