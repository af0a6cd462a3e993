// Offline weight learning: scored observations are averaged per attribute path
// and written back into a copy of the persona tree.

pub mod aggregator;
pub mod observation;

pub use aggregator::{aggregate, average_weights, recalculate_weights, AggregationReport};
pub use observation::{load_observations, Observation, DEFAULT_MAX_SCORE};
