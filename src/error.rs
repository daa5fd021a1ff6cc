//! Error types for apivet operations.
//!
//! This module defines [`ApivetError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Resolution failures abort the whole resolution pass; no partial registry
//!   is ever returned
//! - Malformed *documents* never surface here — the walker degrades and lets
//!   rules report diagnostics instead
//! - `UnknownType` is a programmer error (a visitor names a type the active
//!   schema does not declare) and is not recoverable at runtime

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for apivet operations.
#[derive(Debug, Error)]
pub enum ApivetError {
    /// A `$ref` value that is not a valid pointer.
    #[error("Malformed reference pointer: {raw}")]
    PointerSyntax { raw: String },

    /// A pointer fragment that does not exist in the target document.
    #[error("Could not resolve pointer: {pointer}")]
    TargetNotFound { pointer: String },

    /// A reference chain that loops back on itself.
    ///
    /// The display text is a stable contract relied on by callers matching
    /// resolution failures.
    #[error("Self-referencing circular pointer")]
    CircularReference,

    /// An external target document could not be found.
    #[error("Source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// An external target document could not be parsed.
    #[error("Failed to parse source at {}: {message}", path.display())]
    SourceParse { path: PathBuf, message: String },

    /// A visitor references a type name unknown to the active schema.
    #[error("Unknown type in visitor: {name}")]
    UnknownType { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for apivet operations.
pub type Result<T> = std::result::Result<T, ApivetError>;
