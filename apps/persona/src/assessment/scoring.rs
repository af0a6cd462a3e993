//! Pitch scoring: a pluggable, trait-based scorer that rates a pitch against the
//! persona's weighted criteria.
//!
//! Default: `RuleTablePitchScorer` (pure-Rust, deterministic, fully testable).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::assessment::pitch::PitchFacts;
use crate::persona::PersonaStore;

pub const CRITERIA_BREAKDOWN_PATH: &str =
    "interaction_protocols.pitch_assessment_criteria.criteria_breakdown";

/// Points awarded for each matched rule.
const RULE_POINTS: u32 = 5;
/// Per-criterion cap.
pub const MAX_CRITERION_SCORE: u32 = 5;
const STRENGTH_THRESHOLD: u32 = 4;
const WEAKNESS_THRESHOLD: u32 = 2;
/// Summaries shorter than this count as clear.
const CLARITY_MAX_CHARS: usize = 200;
const IMPACT_THRESHOLD: f64 = 0.7;
const REPUTATION_THRESHOLD: f64 = 0.8;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One weighted criterion from the persona's criteria breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub details: String,
}

/// A criterion classified as a strength or weakness, with its raw score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionFinding {
    pub criterion: String,
    pub details: String,
    pub score: u32,
}

impl fmt::Display for CriterionFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (Score: {}/{})",
            self.criterion, self.details, self.score, MAX_CRITERION_SCORE
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchScore {
    pub percentage: f64, // 0 – 100
    pub strengths: Vec<CriterionFinding>,
    pub weaknesses: Vec<CriterionFinding>,
    pub scorer_backend: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Strength,
    Weakness,
}

/// Reads the criteria breakdown in document order. Missing breakdown → no criteria.
pub fn criteria_breakdown(store: &PersonaStore) -> Vec<Criterion> {
    let Ok(Value::Object(breakdown)) = store.get(CRITERIA_BREAKDOWN_PATH) else {
        return Vec::new();
    };

    breakdown
        .iter()
        .filter_map(|(name, definition)| {
            if !definition.is_object() {
                warn!("Criterion '{}' is not a mapping; ignoring it", name);
                return None;
            }
            let weight = definition.get("weight").and_then(Value::as_f64).unwrap_or(0.0);
            if weight < 0.0 {
                warn!("Criterion '{}' has negative weight {}; using 0", name, weight);
            }
            Some(Criterion {
                name: name.clone(),
                weight: weight.max(0.0),
                details: definition
                    .get("details")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching callers.
pub trait PitchScorer: Send + Sync {
    fn score(&self, criteria: &[Criterion], pitch: &PitchFacts) -> PitchScore;
}

/// Fixed rule table keyed by substrings of the criterion name.
///
/// Algorithm:
/// 1. raw = Σ(points of matched rules), capped at 5
/// 2. percentage = Σ(raw × weight) / Σ(5 × weight) × 100, or 0 when Σweight = 0
/// 3. raw ≥ 4 → strength, raw ≤ 2 → weakness, otherwise neither
pub struct RuleTablePitchScorer;

impl PitchScorer for RuleTablePitchScorer {
    fn score(&self, criteria: &[Criterion], pitch: &PitchFacts) -> PitchScore {
        compute_rule_table_score(criteria, pitch)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rule table
// ────────────────────────────────────────────────────────────────────────────

enum Signal {
    Keyword(&'static str),
    ConciseSummary,
    DataProvided,
    ImpactAbove(f64),
    ReputationAbove(f64),
    EthicallyAligned,
}

impl Signal {
    fn holds(&self, pitch: &PitchFacts) -> bool {
        match self {
            Signal::Keyword(k) => pitch.has_keyword(k),
            Signal::ConciseSummary => pitch.summary.chars().count() < CLARITY_MAX_CHARS,
            Signal::DataProvided => pitch.data_provided,
            Signal::ImpactAbove(t) => pitch.potential_impact > *t,
            Signal::ReputationAbove(t) => pitch.source_reputation > *t,
            Signal::EthicallyAligned => pitch.ethical_alignment,
        }
    }
}

struct Rule {
    name_fragment: &'static str,
    signal: Signal,
}

const RULES: &[Rule] = &[
    Rule { name_fragment: "relevance", signal: Signal::Keyword("relevance") },
    Rule { name_fragment: "newsworthiness", signal: Signal::Keyword("breaking") },
    Rule { name_fragment: "clarity", signal: Signal::ConciseSummary },
    Rule { name_fragment: "completeness", signal: Signal::DataProvided },
    Rule { name_fragment: "originality", signal: Signal::Keyword("unique_angle") },
    Rule { name_fragment: "impact", signal: Signal::ImpactAbove(IMPACT_THRESHOLD) },
    Rule { name_fragment: "credibility", signal: Signal::ReputationAbove(REPUTATION_THRESHOLD) },
    Rule { name_fragment: "ethical", signal: Signal::EthicallyAligned },
];

/// Raw 0–5 score of one criterion. Unmatched criteria score 0.
pub fn score_criterion(criterion_name: &str, pitch: &PitchFacts) -> u32 {
    let name = criterion_name.to_lowercase();
    let matched = RULES
        .iter()
        .filter(|rule| name.contains(rule.name_fragment) && rule.signal.holds(pitch))
        .count() as u32;
    (matched * RULE_POINTS).min(MAX_CRITERION_SCORE)
}

pub fn classify(raw_score: u32) -> Option<Classification> {
    if raw_score >= STRENGTH_THRESHOLD {
        Some(Classification::Strength)
    } else if raw_score <= WEAKNESS_THRESHOLD {
        Some(Classification::Weakness)
    } else {
        None
    }
}

fn compute_rule_table_score(criteria: &[Criterion], pitch: &PitchFacts) -> PitchScore {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut total_weighted = 0.0_f64;
    let mut max_possible = 0.0_f64;

    for criterion in criteria {
        let weight = criterion.weight.max(0.0);
        let raw = score_criterion(&criterion.name, pitch);

        total_weighted += f64::from(raw) * weight;
        max_possible += f64::from(MAX_CRITERION_SCORE) * weight;

        let finding = CriterionFinding {
            criterion: criterion.name.clone(),
            details: criterion.details.clone(),
            score: raw,
        };
        match classify(raw) {
            Some(Classification::Strength) => strengths.push(finding),
            Some(Classification::Weakness) => weaknesses.push(finding),
            None => {}
        }
    }

    let percentage = if max_possible > 0.0 {
        total_weighted / max_possible * 100.0
    } else {
        0.0
    };

    PitchScore {
        percentage,
        strengths,
        weaknesses,
        scorer_backend: "rule_table".to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
