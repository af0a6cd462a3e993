use rand::Rng;
use serde::Serialize;

use crate::compose::tone::{choose_or, common_phrases, terminate_sentence, FALLBACK_STARTER};
use crate::persona::PersonaStore;

pub const PRIORITY_QUESTIONS_PATH: &str =
    "interaction_protocols.reaction_to_press_conference_protocol.priority_questions";
pub const QUESTION_TYPES_PATH: &str =
    "communication_linguistic_style.questioning_technique.typical_question_types";
pub const GENERAL_INQUIRY_TYPE: &str = "General Inquiry";

const PRESS_CONFERENCE: &str = "press conference";
const EXAMPLE_MARKER: &str = "e.g., ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedQuestion {
    pub question: String,
    /// The focus the question was built from, or "General Inquiry".
    pub question_type: String,
}

/// A question about `topic` in the persona's questioning style.
///
/// At a press conference the persona works from its priority questions; anywhere
/// else from its typical question types.
pub fn compose_question<R: Rng + ?Sized>(
    store: &PersonaStore,
    topic: &str,
    context: &str,
    rng: &mut R,
) -> ComposedQuestion {
    let focuses = if context.trim().eq_ignore_ascii_case(PRESS_CONFERENCE) {
        store.record_fields(PRIORITY_QUESTIONS_PATH, "focus")
    } else {
        store.record_fields(QUESTION_TYPES_PATH, "purpose")
    };

    let focus = choose_or(&focuses, "", rng);
    if focus.is_empty() {
        return ComposedQuestion {
            question: format!("Given the topic of '{topic}', what more can you tell me?"),
            question_type: GENERAL_INQUIRY_TYPE.to_string(),
        };
    }

    let phrases = common_phrases(store);
    let starter = terminate_sentence(choose_or(&phrases, FALLBACK_STARTER, rng));

    ComposedQuestion {
        question: format!(
            "{starter} Regarding '{topic}', {}",
            focus.replace(EXAMPLE_MARKER, "")
        ),
        question_type: focus.to_string(),
    }
}
