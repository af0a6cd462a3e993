//! Tone and phrase selection shared by the composers.
//!
//! Every category read from the store has a fixed fallback, so a composer can
//! always produce text even from a persona that defines none of them.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::persona::PersonaStore;

pub const PRIMARY_TONE_PATH: &str = "communication_linguistic_style.overall_tone.primary_tone";
pub const PRINCIPLES_PATH: &str = "core_attributes.core_principles_and_values";
pub const THEMES_PATH: &str = "cognitive_information_processing.key_thematic_focus_areas";
pub const PHRASES_PATH: &str = "core_attributes.common_phrases_keywords";

pub const FALLBACK_TONE: &str = "Analytical";
pub const FALLBACK_PRINCIPLE: &str = "the pursuit of truth";
pub const FALLBACK_THEME: &str = "public interest reporting";
pub const FALLBACK_STARTER: &str = "Let me put this plainly.";

const GROUND_LEVEL_CONTEXTS: &[&str] = &["crisis", "human rights", "justice"];
const ACCOUNTABILITY_CONTEXTS: &[&str] = &["accountability", "power"];
const INQUIRY_PROMPTS: &[&str] = &["question", "ask"];

/// Which framing a context calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextFamily {
    /// Crisis, human rights and justice stories: lead with the human element.
    GroundLevel,
    General,
}

impl ContextFamily {
    pub fn detect(context: &str) -> Self {
        if mentions_any(context, GROUND_LEVEL_CONTEXTS) {
            ContextFamily::GroundLevel
        } else {
            ContextFamily::General
        }
    }
}

pub fn calls_for_accountability(context: &str) -> bool {
    mentions_any(context, ACCOUNTABILITY_CONTEXTS)
}

pub fn is_inquiry(prompt: &str) -> bool {
    mentions_any(prompt, INQUIRY_PROMPTS)
}

/// Case-insensitive substring test against each needle.
pub fn mentions_any(text: &str, needles: &[&str]) -> bool {
    let text = text.to_lowercase();
    needles.iter().any(|needle| text.contains(needle))
}

/// Uniform pick among the non-blank options, or `fallback` if there are none.
pub fn choose_or<'a, R: Rng + ?Sized>(options: &'a [String], fallback: &'a str, rng: &mut R) -> &'a str {
    let eligible: Vec<&str> = options
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    eligible.choose(rng).copied().unwrap_or(fallback)
}

/// Primary tone options; a lone string counts as one option.
pub fn tone_options(store: &PersonaStore) -> Vec<String> {
    store.strings(PRIMARY_TONE_PATH)
}

pub fn principle_names(store: &PersonaStore) -> Vec<String> {
    store.record_fields(PRINCIPLES_PATH, "name")
}

pub fn theme_names(store: &PersonaStore) -> Vec<String> {
    store.record_fields(THEMES_PATH, "theme")
}

pub fn common_phrases(store: &PersonaStore) -> Vec<String> {
    store.record_fields(PHRASES_PATH, "phrase")
}

/// First letter upper-cased, the rest lower-cased.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `word` preceded by "a" or "an".
pub fn with_article(word: &str) -> String {
    let starts_with_vowel = word
        .chars()
        .next()
        .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'));
    if starts_with_vowel {
        format!("an {word}")
    } else {
        format!("a {word}")
    }
}

/// Appends a full stop unless the text already ends a sentence.
pub fn terminate_sentence(text: &str) -> String {
    let text = text.trim_end();
    if text.ends_with(['.', '!', '?']) {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_context_family_detection() {
        assert_eq!(ContextFamily::detect("Flood CRISIS update"), ContextFamily::GroundLevel);
        assert_eq!(ContextFamily::detect("a human rights panel"), ContextFamily::GroundLevel);
        assert_eq!(ContextFamily::detect("general discussion"), ContextFamily::General);
    }

    #[test]
    fn test_accountability_and_inquiry_keywords() {
        assert!(calls_for_accountability("Power and the press"));
        assert!(!calls_for_accountability("sports"));
        assert!(is_inquiry("Can I ASK something?"));
        assert!(!is_inquiry("Tell me about it"));
    }

    #[test]
    fn test_choose_or_skips_blank_options() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = vec!["  ".to_string(), "Direct".to_string()];
        for _ in 0..20 {
            assert_eq!(choose_or(&options, FALLBACK_TONE, &mut rng), "Direct");
        }
    }

    #[test]
    fn test_choose_or_falls_back_when_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(choose_or(&[], FALLBACK_TONE, &mut rng), FALLBACK_TONE);
    }

    #[test]
    fn test_choose_or_is_deterministic_for_a_seed() {
        let options: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        let first: Vec<&str> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| choose_or(&options, "x", &mut rng)).collect()
        };
        let second: Vec<&str> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..10).map(|_| choose_or(&options, "x", &mut rng)).collect()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("eMPATHETIC"), "Empathetic");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_with_article() {
        assert_eq!(with_article("analytical"), "an analytical");
        assert_eq!(with_article("direct"), "a direct");
    }

    #[test]
    fn test_terminate_sentence() {
        assert_eq!(terminate_sentence("Go beyond the headlines"), "Go beyond the headlines.");
        assert_eq!(terminate_sentence("Why now?"), "Why now?");
    }
}
