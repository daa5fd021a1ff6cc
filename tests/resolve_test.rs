//! Resolution scenarios across documents.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use apivet::loader::{FsLoader, SourceLoader};
use apivet::model::{parse_document, Document};
use apivet::types::oas3;
use apivet::{resolve_document, ApivetError, RefRegistry};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn load_root(loader: &FsLoader, path: &PathBuf) -> Arc<Document> {
    loader.load(None, path.to_str().unwrap()).unwrap()
}

fn resolve(document: &Arc<Document>, loader: &FsLoader) -> apivet::Result<RefRegistry> {
    resolve_document(document, loader, &oas3::schema(), oas3::ROOT)
}

#[test]
fn external_refs_register_in_discovery_order() {
    let dir = TempDir::new().unwrap();
    let root_path = write(
        &dir,
        "openapi.yaml",
        "\
openapi: 3.0.0
info:
  $ref: './externalInfo.yaml#/info'
",
    );
    write(
        &dir,
        "externalInfo.yaml",
        "\
info:
  title: External
  version: 1.0.0
  license:
    $ref: './externalLicense.yaml#/license'
",
    );
    write(
        &dir,
        "externalLicense.yaml",
        "\
license:
  name: MIT
",
    );

    let loader = FsLoader::new();
    let document = load_root(&loader, &root_path);
    let registry = resolve(&document, &loader).unwrap();

    // The outer ref first, then the ref found inside its target subtree.
    assert_eq!(
        registry.references(),
        [
            "./externalInfo.yaml#/info",
            "./externalLicense.yaml#/license",
        ]
    );

    let info = registry
        .get(document.source(), "./externalInfo.yaml#/info")
        .unwrap();
    assert_eq!(info.location.source().name(), "externalInfo.yaml");
    assert_eq!(info.location.fragment(), "#/info");
    assert_eq!(info.node.str_field("title"), Some("External"));

    let license = registry
        .get(info.document.source(), "./externalLicense.yaml#/license")
        .unwrap();
    assert_eq!(license.node.str_field("name"), Some("MIT"));
}

#[test]
fn whole_file_scalar_targets_resolve() {
    let dir = TempDir::new().unwrap();
    let root_path = write(
        &dir,
        "openapi.yaml",
        "\
openapi: 3.0.0
info:
  title: Pets
  description:
    $ref: './description.md'
",
    );
    write(&dir, "description.md", "# Pets API\n\nLorem ipsum");

    let loader = FsLoader::new();
    let document = load_root(&loader, &root_path);
    let registry = resolve(&document, &loader).unwrap();

    let entry = registry.get(document.source(), "./description.md").unwrap();
    assert_eq!(entry.node.as_scalar(), Some("# Pets API\n\nLorem ipsum"));
    assert_eq!(entry.location.fragment(), "#/");
    assert_eq!(entry.location.source().name(), "description.md");
}

#[test]
fn cross_file_cycle_is_rejected() {
    let dir = TempDir::new().unwrap();
    let root_path = write(
        &dir,
        "a.yaml",
        "\
openapi: 3.0.0
info:
  $ref: './b.yaml#/info'
",
    );
    write(
        &dir,
        "b.yaml",
        "\
info:
  $ref: './a.yaml#/info'
",
    );

    let loader = FsLoader::new();
    let document = load_root(&loader, &root_path);
    let err = resolve(&document, &loader).unwrap_err();
    assert_eq!(err.to_string(), "Self-referencing circular pointer");
}

#[test]
fn missing_external_file_fails_resolution() {
    let dir = TempDir::new().unwrap();
    let root_path = write(
        &dir,
        "openapi.yaml",
        "\
openapi: 3.0.0
info:
  $ref: './nope.yaml#/info'
",
    );

    let loader = FsLoader::new();
    let document = load_root(&loader, &root_path);
    let err = resolve(&document, &loader).unwrap_err();
    assert!(matches!(err, ApivetError::SourceNotFound { .. }));
}

#[test]
fn pointer_escapes_reach_slash_and_tilde_keys() {
    let document = parse_document(
        "openapi.yaml",
        "\
openapi: 3.0.0
paths:
  /pet:
    $ref: '#/defs/~1pet~0item'
defs:
  /pet~item:
    summary: shared path item
",
    )
    .unwrap();

    let registry = resolve(&document, &FsLoader::new()).unwrap();
    let entry = registry.get(document.source(), "#/defs/~1pet~0item").unwrap();
    assert_eq!(entry.location.fragment(), "#/defs/~1pet~0item");
    assert_eq!(entry.node.str_field("summary"), Some("shared path item"));
}

#[test]
fn shared_targets_resolve_to_one_instance() {
    let document = parse_document(
        "openapi.yaml",
        "\
openapi: 3.0.0
paths:
  /pet:
    get:
      parameters:
        - $ref: '#/components/parameters/shared'
    post:
      parameters:
        - $ref: '#/components/parameters/shared'
components:
  parameters:
    shared:
      name: shared
      in: query
",
    )
    .unwrap();

    let registry = resolve(&document, &FsLoader::new()).unwrap();
    assert_eq!(registry.references(), ["#/components/parameters/shared"]);

    // Both written occurrences point at the same parameter list item, so the
    // registry holds the parsed node itself, not a copy.
    let entry = registry
        .get(document.source(), "#/components/parameters/shared")
        .unwrap();
    let parsed = document
        .root()
        .get("components")
        .and_then(|c| c.get("parameters"))
        .and_then(|p| p.get("shared"))
        .unwrap();
    assert!(entry.node.same(parsed));
}

#[test]
fn mid_path_refs_are_traversed_and_registered() {
    let document = parse_document(
        "openapi.yaml",
        "\
openapi: 3.0.0
info:
  $ref: '#/tmp/info'
tmp:
  $ref: '#/defs'
defs:
  info:
    contact: {}
    license: {}
",
    )
    .unwrap();

    let registry = resolve(&document, &FsLoader::new()).unwrap();
    // The hop through #/tmp is followed first, so it registers first.
    assert_eq!(registry.references(), ["#/defs", "#/tmp/info"]);

    let outer = registry.get(document.source(), "#/tmp/info").unwrap();
    assert_eq!(outer.location.fragment(), "#/defs/info");
}
