//! End-to-end lint driver.
//!
//! One run is resolve, compose, walk, in that order. Resolution failures
//! abort the run before any rule fires; a broken reference graph would make
//! rule output meaningless.

use std::sync::Arc;

use tracing::debug;

use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::loader::SourceLoader;
use crate::model::Document;
use crate::resolve::resolve_document;
use crate::rules::RuleRegistry;
use crate::types::{oas3, TypeSchema};
use crate::walk::{compose, walk, RuleVisitor};

/// Lint an OpenAPI 3 document with the rules in `rules`.
pub fn lint_document(
    document: &Arc<Document>,
    loader: &dyn SourceLoader,
    rules: &RuleRegistry,
) -> Result<Vec<Diagnostic>> {
    let schema = oas3::schema();
    let visitors = rules
        .iter()
        .map(|rule| RuleVisitor::new(rule.id().as_str(), rule.default_severity(), rule.visitor()))
        .collect();
    lint_with(document, loader, visitors, &schema, oas3::ROOT)
}

/// Lint with an explicit schema, root type, and pre-built visitors. This is
/// the entry point for non-OpenAPI document families.
pub fn lint_with(
    document: &Arc<Document>,
    loader: &dyn SourceLoader,
    visitors: Vec<RuleVisitor>,
    schema: &TypeSchema,
    root_type: &str,
) -> Result<Vec<Diagnostic>> {
    let registry = resolve_document(document, loader, schema, root_type)?;
    debug!(
        source = %document.source(),
        references = registry.len(),
        "resolution complete"
    );
    let dispatch = compose(visitors, schema)?;
    walk(document, schema, &dispatch, &registry, root_type)
}
