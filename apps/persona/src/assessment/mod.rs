// Pitch assessment: structured pitch facts and weighted criterion scoring.

pub mod pitch;
pub mod scoring;

pub use pitch::PitchFacts;
pub use scoring::{
    criteria_breakdown, Criterion, CriterionFinding, PitchScore, PitchScorer,
    RuleTablePitchScorer,
};
