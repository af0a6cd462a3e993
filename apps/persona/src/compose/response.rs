use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::compose::tone::{
    calls_for_accountability, capitalize, choose_or, common_phrases, is_inquiry, principle_names,
    theme_names, tone_options, with_article, ContextFamily, FALLBACK_PRINCIPLE, FALLBACK_THEME, FALLBACK_TONE,
};
use crate::persona::PersonaStore;

const TOUGH_QUESTIONS_LINE: &str =
    "We must ask the tough questions here, demanding specifics and unearthing inconsistencies.";
const RIGOUR_LINE: &str =
    "This demands rigorous analysis and precise language. We must ensure accountability.";
const ACCOUNTABILITY_CONCLUSION: &str = "Ultimately, the focus must remain on holding power \
    accountable and amplifying voices that might otherwise be silenced.";
const GENERAL_CONCLUSION: &str =
    "Ultimately, it's about robust journalism that informs the public and fosters critical discourse.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedResponse {
    pub text: String,
    pub selected_tone: String,
    pub context_applied: String,
}

/// The persona's reply to `prompt`, framed for `context`.
pub fn compose_response<R: Rng + ?Sized>(
    store: &PersonaStore,
    prompt: &str,
    context: &str,
    rng: &mut R,
) -> ComposedResponse {
    let tones = tone_options(store);
    let tone = choose_or(&tones, FALLBACK_TONE, rng).to_string();
    let principles = principle_names(store);

    let mut sentences = vec![
        format!("({} Tone):", capitalize(&tone)),
        format!(
            "Regarding '{}', it's crucial to approach this with {} lens.",
            prompt.trim(),
            with_article(&tone.to_lowercase())
        ),
    ];

    let principle = choose_or(&principles, FALLBACK_PRINCIPLE, rng);
    let family = ContextFamily::detect(context);
    match family {
        ContextFamily::GroundLevel => {
            sentences.push(format!(
                "As an independent journalist, my commitment to {} brings the human element into focus.",
                principle.to_lowercase()
            ));
            sentences.push(
                "What does this truly mean on the ground? We need to go beyond the headlines \
                 to understand the real impact."
                    .to_string(),
            );
        }
        ContextFamily::General => {
            let themes = theme_names(store);
            let theme = choose_or(&themes, FALLBACK_THEME, rng);
            sentences.push(format!(
                "My focus here, as always, aligns with {}.",
                principle.to_lowercase()
            ));
            sentences.push(format!(
                "This falls squarely within the realm of {}.",
                theme.to_lowercase()
            ));
        }
    }

    if is_inquiry(prompt) {
        sentences.push(TOUGH_QUESTIONS_LINE.to_string());
    }

    let phrases = common_phrases(store);
    let phrase = choose_or(&phrases, "", rng);
    if !phrase.is_empty() {
        sentences.push(format!("To {}...", phrase.to_lowercase()));
    }

    sentences.push(RIGOUR_LINE.to_string());
    sentences.push(
        if calls_for_accountability(context) {
            ACCOUNTABILITY_CONCLUSION
        } else {
            GENERAL_CONCLUSION
        }
        .to_string(),
    );

    debug!("Composed response in {:?} framing with tone '{}'", family, tone);

    let (heading, body) = sentences.split_at(1);
    ComposedResponse {
        text: format!("{}\n{}", heading[0], body.join(" ")),
        selected_tone: tone,
        context_applied: context.to_string(),
    }
}
