//! Pitch feedback letters, written in the persona's voice from a `PitchScore`.

use serde::Serialize;
use tracing::info;

use crate::assessment::{criteria_breakdown, PitchFacts, PitchScore, PitchScorer};
use crate::persona::PersonaStore;

pub const RESPONSE_GOAL_PATH: &str = "interaction_protocols.response_framing_principles.goal_of_response";
pub const RESPONSE_TONE_PATH: &str = "interaction_protocols.response_framing_principles.tone_for_response";

pub const FALLBACK_GOAL: &str = "provide feedback.";
pub const FALLBACK_RESPONSE_TONE: &str = "professional";

const NO_STRENGTHS: &str = "No significant strengths immediately stood out, though the effort is noted.";
const NO_WEAKNESSES: &str =
    "The pitch was relatively strong, with no major weaknesses identified at this stage.";
const STRENGTHS_HEADING: &str = "**Strengths:**";
const WEAKNESSES_HEADING: &str = "**Areas for Further Consideration/Improvement:**";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchAssessment {
    pub score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub feedback_message: String,
    pub persona_tone_used: String,
    pub scorer_backend: String,
}

/// Scores `pitch` against the persona's criteria and writes the feedback letter.
pub fn assess_pitch(store: &PersonaStore, scorer: &dyn PitchScorer, pitch: &PitchFacts) -> PitchAssessment {
    let criteria = criteria_breakdown(store);
    let score = scorer.score(&criteria, pitch);
    info!(
        "Assessed pitch '{}': {:.2}% over {} criteria ({} strengths, {} weaknesses)",
        pitch.display_title(),
        score.percentage,
        criteria.len(),
        score.strengths.len(),
        score.weaknesses.len()
    );
    compose_pitch_feedback(store, pitch, &score)
}

pub fn compose_pitch_feedback(store: &PersonaStore, pitch: &PitchFacts, score: &PitchScore) -> PitchAssessment {
    let strengths: Vec<String> = score.strengths.iter().map(ToString::to_string).collect();
    let weaknesses: Vec<String> = score.weaknesses.iter().map(ToString::to_string).collect();

    let tone = store
        .strings(RESPONSE_TONE_PATH)
        .into_iter()
        .find(|t| !t.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_RESPONSE_TONE.to_string());

    let title = pitch.display_title();
    let sections = [
        format!("Subject: Assessment of Your Pitch on '{title}'"),
        "Dear colleague,".to_string(),
        format!("Thank you for reaching out with your pitch on '{title}'. I've reviewed the material."),
        format!(
            "My initial assessment yields an overall score of {:.2}%.",
            score.percentage
        ),
        "From a journalistic perspective, here are the key observations:".to_string(),
        findings_section(STRENGTHS_HEADING, &strengths, NO_STRENGTHS),
        findings_section(WEAKNESSES_HEADING, &weaknesses, NO_WEAKNESSES),
        format!("Given this assessment, my aim is to {}.", response_goal(store)),
        "Please consider these points for future pitches or if you wish to refine this one.".to_string(),
        format!("Regards,\n{} (AI Persona)", store.identity().real_person_name),
    ];

    PitchAssessment {
        score: score.percentage,
        strengths,
        weaknesses,
        feedback_message: sections.join("\n\n"),
        persona_tone_used: tone,
        scorer_backend: score.scorer_backend.clone(),
    }
}

fn findings_section(heading: &str, findings: &[String], when_empty: &str) -> String {
    if findings.is_empty() {
        return format!("{heading} {when_empty}");
    }
    let lines: Vec<String> = findings.iter().map(|f| format!("- {f}")).collect();
    format!("{heading}\n{}", lines.join("\n"))
}

/// The persona's stated goal, lower-cased, without a trailing full stop.
fn response_goal(store: &PersonaStore) -> String {
    let goal = store
        .strings(RESPONSE_GOAL_PATH)
        .into_iter()
        .find(|g| !g.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_GOAL.to_string());
    goal.trim().trim_end_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{CriterionFinding, RuleTablePitchScorer};
    use crate::compose::test_support::{bare_store, fixture_store};

    fn finding(criterion: &str, score: u32) -> CriterionFinding {
        CriterionFinding {
            criterion: criterion.to_string(),
            details: "details".to_string(),
            score,
        }
    }

    fn score(percentage: f64, strengths: Vec<CriterionFinding>, weaknesses: Vec<CriterionFinding>) -> PitchScore {
        PitchScore {
            percentage,
            strengths,
            weaknesses,
            scorer_backend: "rule_table".to_string(),
        }
    }

    #[test]
    fn test_letter_lists_findings_and_signs_off() {
        let store = fixture_store();
        let pitch = PitchFacts {
            title: "Clinic Closures".to_string(),
            ..PitchFacts::default()
        };
        let assessment = compose_pitch_feedback(
            &store,
            &pitch,
            &score(62.5, vec![finding("Human Impact", 5)], vec![finding("Source Credibility", 0)]),
        );

        let letter = &assessment.feedback_message;
        assert!(letter.starts_with("Subject: Assessment of Your Pitch on 'Clinic Closures'"));
        assert!(letter.contains("overall score of 62.50%"));
        assert!(letter.contains("**Strengths:**\n- Human Impact: details (Score: 5/5)"));
        assert!(letter.contains(
            "**Areas for Further Consideration/Improvement:**\n- Source Credibility: details (Score: 0/5)"
        ));
        assert!(letter.contains("my aim is to help the sender sharpen the story for the public interest."));
        assert!(letter.ends_with("Regards,\nAsha Verma (AI Persona)"));
        assert_eq!(assessment.persona_tone_used, "Candid");
        assert_eq!(assessment.strengths, vec!["Human Impact: details (Score: 5/5)"]);
    }

    #[test]
    fn test_empty_findings_use_fixed_sentences() {
        let store = fixture_store();
        let assessment = compose_pitch_feedback(&store, &PitchFacts::default(), &score(50.0, vec![], vec![]));
        assert!(assessment.feedback_message.contains(&format!("{STRENGTHS_HEADING} {NO_STRENGTHS}")));
        assert!(assessment.feedback_message.contains(&format!("{WEAKNESSES_HEADING} {NO_WEAKNESSES}")));
        assert!(assessment.feedback_message.contains("'Untitled Pitch'"));
    }

    #[test]
    fn test_bare_store_uses_goal_and_tone_fallbacks() {
        let store = bare_store();
        let assessment = compose_pitch_feedback(&store, &PitchFacts::default(), &score(0.0, vec![], vec![]));
        assert_eq!(assessment.persona_tone_used, FALLBACK_RESPONSE_TONE);
        assert!(assessment.feedback_message.contains("my aim is to provide feedback.\n"));
        assert!(assessment.feedback_message.contains("overall score of 0.00%"));
    }

    #[test]
    fn test_assess_pitch_scores_with_persona_criteria() {
        let store = fixture_store();
        let pitch = PitchFacts {
            title: "Hidden Costs".to_string(),
            summary: "Families displaced by the housing policy, with documents.".to_string(),
            keywords: ["relevance", "breaking", "unique_angle"].iter().map(|s| s.to_string()).collect(),
            data_provided: true,
            potential_impact: 0.9,
            source_reputation: 0.95,
            ethical_alignment: true,
        };
        let assessment = assess_pitch(&store, &RuleTablePitchScorer, &pitch);
        assert!((assessment.score - 100.0).abs() < 1e-9);
        assert_eq!(assessment.strengths.len(), 8);
        assert!(assessment.weaknesses.is_empty());
        assert_eq!(assessment.scorer_backend, "rule_table");
    }

    #[test]
    fn test_assess_pitch_without_criteria_scores_zero() {
        let assessment = assess_pitch(&bare_store(), &RuleTablePitchScorer, &PitchFacts::default());
        assert_eq!(assessment.score, 0.0);
        assert!(assessment.strengths.is_empty());
    }
}
