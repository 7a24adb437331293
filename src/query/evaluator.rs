//! JSONPath query engine
//!
//! Plain dot/index paths (`$.data.items[-1].id`) are walked directly so that
//! negative indices behave like Python-style "from the end" lookups. Anything
//! with wildcards, filters, slices or recursive descent is handed to
//! `jsonpath-rust`.

use super::types::{DocumentQuery, QueryExpr};
use crate::error::{Error, Result};
use serde_json::Value;

/// Built-in [`DocumentQuery`] implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathQuery;

impl JsonPathQuery {
    /// Create a new query engine
    pub fn new() -> Self {
        Self
    }
}

impl DocumentQuery for JsonPathQuery {
    fn evaluate(&self, expr: &QueryExpr, document: &Value) -> Result<Vec<Value>> {
        let QueryExpr::JsonPath(path) = expr;

        if is_simple_path(path) {
            let segments = parse_simple_path(path)
                .ok_or_else(|| Error::json_path(format!("Invalid path: {path}")))?;
            return Ok(walk(document, &segments).into_iter().cloned().collect());
        }

        evaluate_with_jsonpath(document, path)
    }

    fn validate(&self, expr: &QueryExpr) -> Result<()> {
        let QueryExpr::JsonPath(path) = expr;

        if is_simple_path(path) {
            parse_simple_path(path)
                .map(|_| ())
                .ok_or_else(|| Error::json_path(format!("Invalid path: {path}")))
        } else {
            compile(path).map(|_| ())
        }
    }

    fn is_multi(&self, expr: &QueryExpr) -> bool {
        let QueryExpr::JsonPath(path) = expr;
        selects_many(path)
    }
}

// ============================================================================
// Simple paths
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(i64),
}

/// True when the path only uses keys and integer indices
fn is_simple_path(path: &str) -> bool {
    const COMPLEX: [&str; 8] = ["*", "..", "?", ":", "@", "'", "\"", ","];
    !COMPLEX.iter().any(|token| path.contains(token))
}

/// True for wildcards, slices, unions, filters and recursive descent.
/// Bracketed keys such as `$['items']` still select a single field.
fn selects_many(path: &str) -> bool {
    const MULTI: [&str; 5] = ["*", "..", "?", ":", ","];
    MULTI.iter().any(|token| path.contains(token))
}

fn parse_simple_path(path: &str) -> Option<Vec<Segment>> {
    let path = path.trim();
    let rest = path.strip_prefix('$').unwrap_or(path);
    let rest = rest.strip_prefix('.').unwrap_or(rest);

    let mut segments = Vec::new();
    if rest.is_empty() {
        return Some(segments);
    }

    for part in rest.split('.') {
        let (name, mut indices) = match part.find('[') {
            Some(pos) => (&part[..pos], &part[pos..]),
            None => (part, ""),
        };

        if name.is_empty() && indices.is_empty() {
            return None;
        }
        if !name.is_empty() {
            segments.push(Segment::Key(name.to_string()));
        }

        while !indices.is_empty() {
            let close = indices.find(']')?;
            let index = indices[1..close].trim().parse::<i64>().ok()?;
            segments.push(Segment::Index(index));
            indices = &indices[close + 1..];
            if !indices.is_empty() && !indices.starts_with('[') {
                return None;
            }
        }
    }

    Some(segments)
}

fn walk<'a>(document: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    let mut current = document;
    for segment in segments {
        current = match (segment, current) {
            (Segment::Key(key), Value::Object(map)) => map.get(key)?,
            (Segment::Index(index), Value::Array(items)) => {
                #[allow(clippy::cast_possible_wrap)]
                let position = if *index < 0 {
                    items.len() as i64 + index
                } else {
                    *index
                };
                if position < 0 {
                    return None;
                }
                items.get(position as usize)?
            }
            _ => return None,
        };
    }
    Some(current)
}

// ============================================================================
// jsonpath-rust
// ============================================================================

fn compile(path: &str) -> Result<jsonpath_rust::JsonPath<Value>> {
    jsonpath_rust::JsonPath::try_from(path)
        .map_err(|e| Error::json_path(format!("Invalid JSONPath '{path}': {e}")))
}

fn evaluate_with_jsonpath(document: &Value, path: &str) -> Result<Vec<Value>> {
    let jp = compile(path)?;

    match jp.find(document) {
        Value::Array(matches) => Ok(matches),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_path() {
        assert_eq!(
            parse_simple_path("$.items[-1].id"),
            Some(vec![
                Segment::Key("items".to_string()),
                Segment::Index(-1),
                Segment::Key("id".to_string()),
            ])
        );
        assert_eq!(parse_simple_path("$"), Some(vec![]));
        assert_eq!(
            parse_simple_path("content"),
            Some(vec![Segment::Key("content".to_string())])
        );
        assert_eq!(
            parse_simple_path("$[0][1]"),
            Some(vec![Segment::Index(0), Segment::Index(1)])
        );
    }

    #[test]
    fn test_parse_simple_path_rejects_garbage() {
        assert_eq!(parse_simple_path("$.items[abc]"), None);
        assert_eq!(parse_simple_path("$.items[0"), None);
        assert_eq!(parse_simple_path("$.a..b"), None);
    }

    #[test]
    fn test_is_simple_path() {
        assert!(is_simple_path("$._links.next.href"));
        assert!(is_simple_path("$.items[-1].id"));
        assert!(!is_simple_path("$.items[*].id"));
        assert!(!is_simple_path("$..id"));
        assert!(!is_simple_path("$.items[?(@.active)]"));
        assert!(!is_simple_path("$.items[-1:]"));
    }

    #[test]
    fn test_selects_many() {
        assert!(selects_many("$.items[*]"));
        assert!(selects_many("$..id"));
        assert!(selects_many("$.items[-2:]"));
        assert!(selects_many("$.items[?(@.active)]"));
        assert!(!selects_many("$.items"));
        assert!(!selects_many("$['items']"));
    }
}
