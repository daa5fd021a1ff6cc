//! Source loading and caching.
//!
//! The resolver asks a [`SourceLoader`] for external documents. The loader
//! owns the only state shared across walks: a process-lifetime cache keyed by
//! normalized identifier, so repeated requests for one target return the same
//! [`Document`] instance. That instance identity is load-bearing — the
//! registry and the walker's cycle guard compare locations by source
//! identity.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::error::{ApivetError, Result};
use crate::model::{parse_with_source, Document, Node, Source};

/// Provider of external documents.
///
/// `base` is the document the specifier was written in; relative specifiers
/// resolve against its identifier. `None` loads an entry-point document.
pub trait SourceLoader {
    fn load(&self, base: Option<&Document>, specifier: &str) -> Result<Arc<Document>>;
}

/// Filesystem loader with a process-lifetime document cache.
///
/// YAML and JSON files are parsed with provenance; any other extension loads
/// as a single scalar document holding the file's text (markdown description
/// targets rely on this).
#[derive(Default)]
pub struct FsLoader {
    cache: Mutex<HashMap<PathBuf, Arc<Document>>>,
}

impl FsLoader {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Arc<Document>>> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn resolve_path(&self, base: Option<&Document>, specifier: &str) -> PathBuf {
        let raw = Path::new(specifier);
        if raw.is_absolute() {
            return normalize(raw);
        }
        let joined = match base {
            Some(doc) => Path::new(doc.source().id())
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(raw),
            None => std::env::current_dir().unwrap_or_default().join(raw),
        };
        normalize(&joined)
    }

    fn read(&self, path: &Path) -> Result<Arc<Document>> {
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ApivetError::SourceNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ApivetError::Io(e)
            }
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let source = Source::new(path.to_string_lossy().into_owned(), name);

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") | Some("json") => parse_with_source(source, &text),
            _ => Ok(Arc::new(Document::new(source, Node::scalar(text, None)))),
        }
    }
}

impl SourceLoader for FsLoader {
    fn load(&self, base: Option<&Document>, specifier: &str) -> Result<Arc<Document>> {
        let path = self.resolve_path(base, specifier);

        // The lock is held across a cache miss so racing callers for the
        // same identifier settle on one Document instance.
        let mut cache = self.lock();
        if let Some(doc) = cache.get(&path) {
            return Ok(Arc::clone(doc));
        }
        debug!(path = %path.display(), "loading external document");
        let doc = self.read(&path)?;
        cache.insert(path, Arc::clone(&doc));
        Ok(doc)
    }
}

/// Lexically normalize a path: resolve `.` and `..` without touching the
/// filesystem, so cache keys are stable across spellings.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_and_parses_yaml() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "openapi.yaml", "openapi: 3.0.0\n");
        let loader = FsLoader::new();

        let doc = loader.load(None, path.to_str().unwrap()).unwrap();
        assert_eq!(doc.root().str_field("openapi"), Some("3.0.0"));
        assert_eq!(doc.source().name(), "openapi.yaml");
    }

    #[test]
    fn repeated_loads_return_same_instance() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.yaml", "x: 1\n");
        let loader = FsLoader::new();

        let first = loader.load(None, path.to_str().unwrap()).unwrap();
        let second = loader.load(None, path.to_str().unwrap()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn different_spellings_hit_one_cache_entry() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.yaml", "x: 1\n");
        let loader = FsLoader::new();

        let plain = dir.path().join("a.yaml");
        let dotted = dir.path().join(".").join("a.yaml");
        let first = loader.load(None, plain.to_str().unwrap()).unwrap();
        let second = loader.load(None, dotted.to_str().unwrap()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn relative_specifier_resolves_against_base() {
        let dir = TempDir::new().unwrap();
        let root_path = write(&dir, "root.yaml", "info: {}\n");
        write(&dir, "other.yaml", "name: MIT\n");
        let loader = FsLoader::new();

        let root = loader.load(None, root_path.to_str().unwrap()).unwrap();
        let other = loader.load(Some(&root), "./other.yaml").unwrap();
        assert_eq!(other.root().str_field("name"), Some("MIT"));
    }

    #[test]
    fn non_yaml_extension_loads_as_scalar() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "description.md", "# Hello World\n\nLorem ipsum");
        let loader = FsLoader::new();

        let doc = loader.load(None, path.to_str().unwrap()).unwrap();
        assert_eq!(doc.root().as_scalar(), Some("# Hello World\n\nLorem ipsum"));
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.yaml");
        let loader = FsLoader::new();

        let err = loader.load(None, path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ApivetError::SourceNotFound { .. }));
    }

    #[test]
    fn normalize_resolves_dot_segments() {
        assert_eq!(
            normalize(Path::new("/a/b/../c/./d.yaml")),
            PathBuf::from("/a/c/d.yaml")
        );
    }
}
