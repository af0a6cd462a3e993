//! Weight aggregation. Turns scored observations into persona weights.
//!
//! Algorithm:
//! 1. normalized = raw / max_score_per_attribute (no clamping: raw > max yields > 1.0)
//! 2. group by path, arithmetic mean; every observation counts equally
//! 3. write each mean into a deep copy of the template via `persona::path::assign`
//! 4. paths that cannot be written are reported, never fatal
//!
//! Output is deterministic for a given observation list and template.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::EngineError;
use crate::learning::observation::{load_observations, Observation};
use crate::persona::path::{assign, AttributePath, Assignment};

const SEQUENCE_SKIP_REASON: &str =
    "target is a sequence; positional assignment is not supported";

/// Result of an aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationReport {
    pub updated_count: usize,
    /// (path, reason) for every path that was not written.
    pub skipped: Vec<(String, String)>,
    /// Mean normalized score per path, whether or not it could be written.
    pub weights: BTreeMap<String, f64>,
}

/// Normalizes and averages scores per path.
///
/// Scores from an observation whose max is not a positive number are dropped and
/// reported, as are non-finite raw scores.
pub fn average_weights(observations: &[Observation]) -> (BTreeMap<String, f64>, Vec<(String, String)>) {
    let mut totals: BTreeMap<String, (f64, u32)> = BTreeMap::new();
    let mut skipped = Vec::new();

    for observation in observations {
        let max_score = observation.max_score_per_attribute;
        for (path, &raw) in &observation.attribute_scores {
            if !(max_score.is_finite() && max_score > 0.0) {
                skipped.push((
                    path.clone(),
                    format!("max_score_per_attribute must be positive, got {max_score}"),
                ));
                continue;
            }
            if !raw.is_finite() {
                skipped.push((path.clone(), format!("raw score is not a finite number: {raw}")));
                continue;
            }
            let (sum, count) = totals.entry(path.clone()).or_insert((0.0, 0));
            *sum += raw / max_score;
            *count += 1;
        }
    }

    let weights = totals
        .into_iter()
        .map(|(path, (sum, count))| (path, sum / f64::from(count)))
        .collect();
    (weights, skipped)
}

/// Applies averaged observation scores to a copy of `template`.
pub fn aggregate(observations: &[Observation], template: &Value) -> (Value, AggregationReport) {
    let (weights, mut skipped) = average_weights(observations);
    let mut tree = template.clone();
    let mut updated_count = 0;

    for (raw_path, weight) in &weights {
        debug!("Calculated weight {:.3} for '{}'", weight, raw_path);

        let outcome = AttributePath::parse(raw_path)
            .and_then(|path| assign(&mut tree, &path, Value::from(*weight)));

        match outcome {
            Ok(Assignment::Weight) | Ok(Assignment::Key) => updated_count += 1,
            Ok(Assignment::SkippedSequence) => {
                warn!("Could not update attribute path '{}': {}", raw_path, SEQUENCE_SKIP_REASON);
                skipped.push((raw_path.clone(), SEQUENCE_SKIP_REASON.to_string()));
            }
            Err(e) => {
                warn!("Could not update attribute path '{}': {}. Skipping.", raw_path, e);
                skipped.push((raw_path.clone(), e.to_string()));
            }
        }
    }

    info!(
        "Updated {} attribute weights ({} skipped)",
        updated_count,
        skipped.len()
    );

    (
        tree,
        AggregationReport {
            updated_count,
            skipped,
            weights,
        },
    )
}

/// Reads observations and a persona template, aggregates, and writes the result.
///
/// Nothing is written unless both inputs read and parse.
pub fn recalculate_weights(
    observations_path: impl AsRef<Path>,
    template_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<AggregationReport, EngineError> {
    let observations = load_observations(observations_path)?;

    let template_path = template_path.as_ref();
    let template_json =
        std::fs::read_to_string(template_path).map_err(|e| EngineError::io(template_path, e))?;
    let template: Value = serde_json::from_str(&template_json)?;

    let (updated, report) = aggregate(&observations, &template);

    let output_path = output_path.as_ref();
    let output = serde_json::to_string_pretty(&updated)?;
    std::fs::write(output_path, output).map_err(|e| EngineError::io(output_path, e))?;
    info!("Updated persona saved to {}", output_path.display());

    Ok(report)
}
