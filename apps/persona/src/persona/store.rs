//! Persona store: the loaded persona tree plus its identity.
//!
//! Construction validates the whole document up front; a store is either fully
//! usable or never built. Stores are cheap to clone and are treated as snapshots:
//! weight learning produces a new store instead of mutating one that readers share.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::{PathError, PersonaLoadError};
use crate::learning::{aggregate, AggregationReport, Observation};
use crate::persona::path::{assign, resolve, AttributePath, Assignment, Identifiable};

const PERSONA_NAME_PATH: &str = "persona_identification.persona_name";
const REAL_PERSON_NAME_PATH: &str =
    "persona_identification.real_person_reference.real_person_full_name";

/// Who the persona is, read from `persona_identification`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaIdentity {
    pub persona_name: String,
    pub real_person_name: String,
}

#[derive(Debug, Clone)]
pub struct PersonaStore {
    tree: Value,
    identity: PersonaIdentity,
}

impl PersonaStore {
    pub fn from_value(tree: Value) -> Result<Self, PersonaLoadError> {
        if !tree.is_object() {
            return Err(PersonaLoadError::NotAnObject);
        }

        let identity = PersonaIdentity {
            persona_name: required_string(&tree, PERSONA_NAME_PATH)?,
            real_person_name: required_string(&tree, REAL_PERSON_NAME_PATH)?,
        };
        check_unique_names(&tree, "")?;

        info!(
            "Persona '{}' based on '{}' loaded",
            identity.persona_name, identity.real_person_name
        );
        Ok(Self { tree, identity })
    }

    pub fn from_json_str(json: &str) -> Result<Self, PersonaLoadError> {
        let tree: Value = serde_json::from_str(json)?;
        Self::from_value(tree)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PersonaLoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PersonaLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn identity(&self) -> &PersonaIdentity {
        &self.identity
    }

    pub fn tree(&self) -> &Value {
        &self.tree
    }

    pub fn into_tree(self) -> Value {
        self.tree
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.tree)
    }

    /// Resolves a dotted path. No fallback: any broken step is an error.
    pub fn get(&self, path: &str) -> Result<&Value, PathError> {
        let path = AttributePath::parse(path)?;
        resolve(&self.tree, &path)
    }

    /// Resolves a dotted path, returning `default` on any failure.
    pub fn get_or<'a>(&'a self, path: &str, default: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(default)
    }

    /// Writes `value` at `path`. Does not re-check record name uniqueness.
    pub fn set(&mut self, path: &str, value: Value) -> Result<Assignment, PathError> {
        let path = AttributePath::parse(path)?;
        assign(&mut self.tree, &path, value)
    }

    /// Strings at `path`: every string of a sequence, or a lone string. Empty if absent.
    pub fn strings(&self, path: &str) -> Vec<String> {
        match self.get(path) {
            Ok(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Ok(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    /// The string `field` of every record in the sequence at `path`. Empty if absent.
    pub fn record_fields(&self, path: &str, field: &str) -> Vec<String> {
        match self.get(path) {
            Ok(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.get(field).and_then(Value::as_str))
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Learns weights from `observations` into a new store; `self` is left untouched.
    pub fn reweighted(
        &self,
        observations: &[Observation],
    ) -> Result<(PersonaStore, AggregationReport), PersonaLoadError> {
        let (tree, report) = aggregate(observations, &self.tree);
        Ok((PersonaStore::from_value(tree)?, report))
    }

    /// Weight of the record at `path`, adjusted for the interaction context.
    pub fn contextual_weight(&self, path: &str, context: Option<&str>) -> Result<f64, PathError> {
        self.get(path).map(|record| contextual_weight(record, context))
    }
}

/// Record weight (default 1.0) scaled by context.
///
/// Crisis contexts boost empathy-driven attributes ×1.5; accountability contexts
/// boost directness-driven attributes ×1.2. Both can apply.
pub fn contextual_weight(record: &Value, context: Option<&str>) -> f64 {
    let mut weight = record.get("weight").and_then(Value::as_f64).unwrap_or(1.0);

    let Some(context) = context else {
        return weight;
    };
    let context = context.to_lowercase();
    let description = record
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_lowercase();

    if context.contains("crisis") && description.contains("empathy") {
        weight *= 1.5;
    }
    if context.contains("accountability") && description.contains("directness") {
        weight *= 1.2;
    }
    weight
}

fn required_string(tree: &Value, path: &'static str) -> Result<String, PersonaLoadError> {
    let parsed = AttributePath::parse(path).map_err(|_| PersonaLoadError::MissingField(path))?;
    match resolve(tree, &parsed) {
        Ok(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => {
            warn!("Persona document has no usable '{}'", path);
            Err(PersonaLoadError::MissingField(path))
        }
    }
}

fn child_location(location: &str, key: &str) -> String {
    if location.is_empty() {
        key.to_string()
    } else {
        format!("{location}.{key}")
    }
}

/// Every sequence of named records must have unique identifiers.
fn check_unique_names(node: &Value, location: &str) -> Result<(), PersonaLoadError> {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                check_unique_names(child, &child_location(location, key))?;
            }
        }
        Value::Array(items) => {
            let mut seen = HashSet::new();
            for item in items {
                if let Some(id) = item.identifier() {
                    if !seen.insert(id) {
                        return Err(PersonaLoadError::DuplicateName {
                            location: location.to_string(),
                            name: id.to_string(),
                        });
                    }
                }
            }
            for (index, item) in items.iter().enumerate() {
                check_unique_names(item, &format!("{location}[{index}]"))?;
            }
        }
        _ => {}
    }
    Ok(())
}
