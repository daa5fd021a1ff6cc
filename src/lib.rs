//! apivet: a structural linting core for API descriptions.
//!
//! The crate is built from two engines. The [`resolve`] module discovers and
//! resolves every `$ref` reachable from a document, following transitive
//! chains across files and rejecting cycles. The [`walk`] module then runs a
//! type-driven depth-first traversal in which rules, written as composable
//! visitor trees, observe nodes with references substituted in place.
//!
//! ```no_run
//! use apivet::loader::{FsLoader, SourceLoader};
//! use apivet::rules::RuleRegistry;
//!
//! # fn main() -> apivet::Result<()> {
//! let loader = FsLoader::new();
//! let document = loader.load(None, "openapi.yaml")?;
//! let diagnostics = apivet::lint_document(&document, &loader, &RuleRegistry::with_builtins())?;
//! for d in &diagnostics {
//!     println!("{} {} {}", d.severity, d.location, d.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod diagnostic;
pub mod error;
pub mod lint;
pub mod loader;
pub mod model;
pub mod resolve;
pub mod rules;
pub mod types;
pub mod walk;

pub use diagnostic::{Diagnostic, Report, Severity};
pub use error::{ApivetError, Result};
pub use lint::{lint_document, lint_with};
pub use model::{Document, Location, Node, Source};
pub use resolve::{resolve_document, RefRegistry, ResolvedRef};
pub use walk::{compose, walk, Context, RuleVisitor, VisitorNode};
