//! Typed field extraction on top of [`DocumentQuery`]

use super::types::{CountExtraction, DocumentQuery, QueryExpr};
use crate::error::Result;
use serde_json::Value;
use tracing::{debug, warn};

/// Extract an item count from a page.
///
/// Multi-value expressions (see [`DocumentQuery::is_multi`]) count their
/// matches, however many there are. Otherwise a single array match counts its
/// elements and a single number or numeric string is taken as-is.
pub fn extract_count(
    query: &dyn DocumentQuery,
    expr: &QueryExpr,
    document: &Value,
) -> Result<CountExtraction> {
    let matches = query.evaluate(expr, document)?;

    if query.is_multi(expr) {
        return Ok(CountExtraction::Count(matches.len() as u64));
    }

    let extraction = match matches.as_slice() {
        [] | [Value::Null] => CountExtraction::Absent,
        [Value::Array(items)] => CountExtraction::Count(items.len() as u64),
        [Value::Number(n)] => match n.as_u64() {
            Some(count) => CountExtraction::Count(count),
            None => match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 => CountExtraction::Count(f as u64),
                _ => CountExtraction::Malformed(n.to_string()),
            },
        },
        [Value::String(s)] => match s.trim().parse::<u64>() {
            Ok(count) => CountExtraction::Count(count),
            Err(_) => CountExtraction::Malformed(s.clone()),
        },
        [other] => CountExtraction::Malformed(other.to_string()),
        many => CountExtraction::Count(many.len() as u64),
    };

    Ok(extraction)
}

/// Extract an item count, reading absent and malformed values as zero.
///
/// The two fallbacks are logged separately so a wrong expression can be told
/// apart from a page that legitimately has no field.
pub fn count_or_zero(query: &dyn DocumentQuery, expr: &QueryExpr, document: &Value) -> Result<u64> {
    let extraction = extract_count(query, expr, document)?;
    match &extraction {
        CountExtraction::Count(_) => {}
        CountExtraction::Absent => {
            debug!("Count expression '{}' matched nothing, using 0", expr);
        }
        CountExtraction::Malformed(raw) => {
            warn!(
                "Count expression '{}' matched non-numeric value {}, using 0",
                expr, raw
            );
        }
    }
    Ok(extraction.or_zero())
}

/// Extract a "has next page" marker.
///
/// Returns `None` when the marker is absent, `null`, `false`, an empty string
/// or an empty container.
pub fn extract_marker(
    query: &dyn DocumentQuery,
    expr: &QueryExpr,
    document: &Value,
) -> Result<Option<String>> {
    let matches = query.evaluate(expr, document)?;

    let marker = matches.into_iter().next().and_then(|value| match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(ref items) if items.is_empty() => None,
        Value::Object(ref map) if map.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    });

    Ok(marker)
}

/// Extract a cursor token for the next page.
///
/// Numbers are stringified; absent, `null`, empty and structured values yield `None`.
pub fn extract_token(
    query: &dyn DocumentQuery,
    expr: &QueryExpr,
    document: &Value,
) -> Result<Option<String>> {
    let matches = query.evaluate(expr, document)?;

    let token = match matches.into_iter().next() {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => {
            warn!(
                "Cursor expression '{}' matched a structured value {}, ignoring",
                expr, other
            );
            None
        }
    };

    Ok(token)
}
