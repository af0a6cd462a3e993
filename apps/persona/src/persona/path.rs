//! Attribute paths: dotted addresses into a persona tree.
//!
//! Resolution rule, applied at every step:
//! - mapping → the segment is a key lookup
//! - sequence → the segment is the identifier of a named record (first match wins)
//! - scalar → the path cannot continue (`PathError::TypeMismatch`)
//!
//! A final `weight` segment addresses the `weight` field of the record reached by the
//! previous segment. Assigning any other final segment into a sequence is a no-op,
//! reported as `Assignment::SkippedSequence`.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::errors::PathError;

/// Fields that identify a record inside a sequence, checked in order.
pub const IDENTIFIER_FIELDS: &[&str] = &["name", "phrase", "theme"];

/// Final segment that targets a record's weight field.
pub const WEIGHT_SEGMENT: &str = "weight";

/// A node that can be addressed by name when it sits inside a sequence.
pub trait Identifiable {
    fn identifier(&self) -> Option<&str>;
}

impl Identifiable for Value {
    fn identifier(&self) -> Option<&str> {
        let record = self.as_object()?;
        IDENTIFIER_FIELDS
            .iter()
            .find_map(|field| record.get(*field).and_then(Value::as_str))
    }
}

/// A parsed, non-empty attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributePath {
    raw: String,
    segments: Vec<String>,
}

impl AttributePath {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if let Some(index) = segments.iter().position(|s| s.is_empty()) {
            return Err(PathError::EmptySegment {
                path: raw.to_string(),
                index,
            });
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for AttributePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Outcome of a successful `assign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// The `weight` field of a named record was set.
    Weight,
    /// A mapping key was set or overwritten.
    Key,
    /// The parent was a sequence; nothing was written.
    SkippedSequence,
}

/// Human-readable node kind, used in mismatch errors.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

fn not_found(path: &AttributePath, segment: &str) -> PathError {
    PathError::NotFound {
        path: path.raw.clone(),
        segment: segment.to_string(),
    }
}

fn mismatch(path: &AttributePath, segment: &str, found: &Value) -> PathError {
    PathError::TypeMismatch {
        path: path.raw.clone(),
        segment: segment.to_string(),
        found: kind(found),
    }
}

fn step<'a>(node: &'a Value, segment: &str, path: &AttributePath) -> Result<&'a Value, PathError> {
    match node {
        Value::Object(map) => map.get(segment).ok_or_else(|| not_found(path, segment)),
        Value::Array(items) => items
            .iter()
            .find(|item| item.identifier() == Some(segment))
            .ok_or_else(|| not_found(path, segment)),
        other => Err(mismatch(path, segment, other)),
    }
}

fn step_mut<'a>(
    node: &'a mut Value,
    segment: &str,
    path: &AttributePath,
) -> Result<&'a mut Value, PathError> {
    match node {
        Value::Object(map) => map.get_mut(segment).ok_or_else(|| not_found(path, segment)),
        Value::Array(items) => items
            .iter_mut()
            .find(|item| item.identifier() == Some(segment))
            .ok_or_else(|| not_found(path, segment)),
        other => Err(mismatch(path, segment, other)),
    }
}

/// Resolves every segment of `path` and returns the addressed node.
pub fn resolve<'a>(tree: &'a Value, path: &AttributePath) -> Result<&'a Value, PathError> {
    path.segments
        .iter()
        .try_fold(tree, |node, segment| step(node, segment, path))
}

/// Resolves all but the final segment, returning the container and the final segment.
pub fn resolve_parent_mut<'a, 'p>(
    tree: &'a mut Value,
    path: &'p AttributePath,
) -> Result<(&'a mut Value, &'p str), PathError> {
    let (last, parents) = path.segments.split_last().ok_or(PathError::Empty)?;
    let mut node = tree;
    for segment in parents {
        node = step_mut(node, segment, path)?;
    }
    Ok((node, last.as_str()))
}

/// Writes `value` at `path`.
pub fn assign(tree: &mut Value, path: &AttributePath, value: Value) -> Result<Assignment, PathError> {
    let (parent, last) = resolve_parent_mut(tree, path)?;

    if last == WEIGHT_SEGMENT {
        // The parent here is the record itself, not the sequence that holds it.
        return match parent {
            Value::Object(record) => {
                record.insert(WEIGHT_SEGMENT.to_string(), value);
                Ok(Assignment::Weight)
            }
            other => Err(mismatch(path, last, other)),
        };
    }

    match parent {
        Value::Object(map) => {
            map.insert(last.to_string(), value);
            Ok(Assignment::Key)
        }
        Value::Array(_) => {
            debug!(
                "Skipping '{}': positional assignment into a sequence is not supported",
                path
            );
            Ok(Assignment::SkippedSequence)
        }
        other => Err(mismatch(path, last, other)),
    }
}
