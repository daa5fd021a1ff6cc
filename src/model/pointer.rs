//! Reference pointer parsing.
//!
//! A written reference is `specifier#fragment`: an optional external document
//! specifier and a JSON-Pointer-style fragment. `#/a/b` is local, `file.yaml`
//! with no fragment targets the whole external root. Segments escape `~` as
//! `~0` and `/` as `~1`.

use crate::error::{ApivetError, Result};

/// Split a written reference into `(specifier, fragment)`.
///
/// The specifier is `None` for local references (`#/a/b`). The fragment never
/// includes the `#` and is empty when the reference targets a whole document.
pub fn split_ref(raw: &str) -> (Option<&str>, &str) {
    match raw.split_once('#') {
        Some(("", fragment)) => (None, fragment),
        Some((specifier, fragment)) => (Some(specifier), fragment),
        None => (Some(raw), ""),
    }
}

/// Parse a pointer fragment into unescaped segments.
///
/// The empty fragment and the bare `/` both denote the document root. Any
/// other fragment must start with `/`; `raw` is the full written reference,
/// used for error reporting.
pub fn parse_fragment(raw: &str, fragment: &str) -> Result<Vec<String>> {
    if fragment.is_empty() || fragment == "/" {
        return Ok(Vec::new());
    }
    let Some(rest) = fragment.strip_prefix('/') else {
        return Err(ApivetError::PointerSyntax {
            raw: raw.to_string(),
        });
    };
    Ok(rest.split('/').map(unescape).collect())
}

/// Render segments as a `#/`-prefixed fragment, escaping as needed.
pub fn render_fragment(segments: &[String]) -> String {
    if segments.is_empty() {
        return "#/".to_string();
    }
    let mut out = String::from("#");
    for segment in segments {
        out.push('/');
        out.push_str(&escape(segment));
    }
    out
}

/// Escape a single path segment.
pub fn escape(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Unescape a single path segment.
pub fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_local_ref() {
        assert_eq!(split_ref("#/defs/info"), (None, "/defs/info"));
    }

    #[test]
    fn split_external_ref_with_fragment() {
        assert_eq!(
            split_ref("./external.yaml#/info"),
            (Some("./external.yaml"), "/info")
        );
    }

    #[test]
    fn split_external_ref_without_fragment() {
        assert_eq!(split_ref("./license.yaml"), (Some("./license.yaml"), ""));
    }

    #[test]
    fn parse_root_fragments() {
        assert!(parse_fragment("#", "").unwrap().is_empty());
        assert!(parse_fragment("#/", "/").unwrap().is_empty());
    }

    #[test]
    fn parse_nested_fragment() {
        assert_eq!(
            parse_fragment("#/paths/~1pet/get", "/paths/~1pet/get").unwrap(),
            vec!["paths".to_string(), "/pet".to_string(), "get".to_string()]
        );
    }

    #[test]
    fn parse_rejects_missing_leading_slash() {
        let err = parse_fragment("#defs", "defs").unwrap_err();
        assert!(err.to_string().contains("#defs"));
    }

    #[test]
    fn render_escapes_segments() {
        let segments = vec!["paths".to_string(), "/pet".to_string()];
        assert_eq!(render_fragment(&segments), "#/paths/~1pet");
        assert_eq!(render_fragment(&[]), "#/");
    }

    #[test]
    fn escape_round_trip() {
        let raw = "a/~b";
        assert_eq!(unescape(&escape(raw)), raw);
        assert_eq!(escape(raw), "a~1~0b");
    }
}
