use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::EngineError;

/// Max score assumed when an observation does not declare one.
pub const DEFAULT_MAX_SCORE: f64 = 5.0;

/// One manually scored piece of evidence about the persona.
///
/// `attribute_scores` maps attribute paths to raw scores on a `0..=max_score_per_attribute`
/// scale. The upper bound is expected, not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Informational only; never read by the aggregator.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub attribute_scores: BTreeMap<String, f64>,
    #[serde(default = "default_max_score")]
    pub max_score_per_attribute: f64,
}

fn default_max_score() -> f64 {
    DEFAULT_MAX_SCORE
}

impl Observation {
    pub fn new<I, P>(content: &str, scores: I, max_score_per_attribute: f64) -> Self
    where
        I: IntoIterator<Item = (P, f64)>,
        P: Into<String>,
    {
        Self {
            content: content.to_string(),
            attribute_scores: scores.into_iter().map(|(p, s)| (p.into(), s)).collect(),
            max_score_per_attribute,
        }
    }
}

/// Reads a JSON list of observations.
pub fn load_observations(path: impl AsRef<Path>) -> Result<Vec<Observation>, EngineError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
    let observations: Vec<Observation> = serde_json::from_str(&json)?;
    info!(
        "Loaded {} observations from {}",
        observations.len(),
        path.display()
    );
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_max_score_defaults_to_five() {
        let obs: Observation = serde_json::from_str(r#"{"attribute_scores": {"a.weight": 3}}"#).unwrap();
        assert_eq!(obs.max_score_per_attribute, DEFAULT_MAX_SCORE);
        assert_eq!(obs.attribute_scores["a.weight"], 3.0);
        assert!(obs.content.is_empty());
    }

    #[test]
    fn test_empty_object_is_a_valid_observation() {
        let obs: Observation = serde_json::from_str("{}").unwrap();
        assert!(obs.attribute_scores.is_empty());
    }

    #[test]
    fn test_load_fixture_observations() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/observations.json");
        let observations = load_observations(path).unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[1].max_score_per_attribute, DEFAULT_MAX_SCORE);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_observations("/no/such/observations.json").unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }
}
