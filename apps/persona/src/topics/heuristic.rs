//! Rule-based topic extraction. Fast, deterministic, no model.
//!
//! Topics are runs of capitalized words, broken at punctuation. Leading stopwords
//! are dropped, and a lone capitalized word at the start of a sentence is ignored
//! unless it is an acronym.

use crate::errors::CapabilityError;
use crate::topics::TopicExtractor;

const STOPWORDS: &[&str] = &[
    "a", "an", "the", "we", "our", "it", "its", "this", "that", "these", "those", "i", "you",
    "your", "he", "she", "they", "their", "my", "as", "in", "on", "at", "for", "and", "but",
    "or", "is", "are",
];

const SUMMARY_MAX_WORDS: usize = 32;

pub struct HeuristicTopicExtractor;

impl TopicExtractor for HeuristicTopicExtractor {
    fn extract_topics(&self, text: &str) -> Result<Vec<String>, CapabilityError> {
        Ok(extract_spans(text))
    }

    fn summarize(&self, text: &str) -> Result<String, CapabilityError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CapabilityError::EmptyContent);
        }
        let words: Vec<&str> = first_sentence(text).split_whitespace().collect();
        if words.len() > SUMMARY_MAX_WORDS {
            Ok(format!("{}...", words[..SUMMARY_MAX_WORDS].join(" ")))
        } else {
            Ok(words.join(" "))
        }
    }
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn is_acronym(word: &str) -> bool {
    word.chars().filter(|c| c.is_alphabetic()).count() >= 2 && !word.chars().any(char::is_lowercase)
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word.to_lowercase().as_str())
}

fn extract_spans(text: &str) -> Vec<String> {
    let mut spans: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_starts_sentence = false;
    let mut at_sentence_start = true;

    for raw in text.split_whitespace() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric());

        if is_capitalized(word) {
            if current.is_empty() {
                current_starts_sentence = at_sentence_start;
            }
            current.push(word);
        } else {
            flush(&mut spans, &mut current, current_starts_sentence);
        }

        if raw.ends_with(|c: char| matches!(c, '.' | '!' | '?' | ',' | ':' | ';')) {
            flush(&mut spans, &mut current, current_starts_sentence);
        }
        at_sentence_start = raw.ends_with(|c: char| matches!(c, '.' | '!' | '?'));
    }
    flush(&mut spans, &mut current, current_starts_sentence);

    let mut seen = std::collections::HashSet::new();
    spans.retain(|span| seen.insert(span.to_lowercase()));
    spans
}

fn flush(spans: &mut Vec<String>, current: &mut Vec<&str>, starts_sentence: bool) {
    let leading_stopwords = current.iter().take_while(|w| is_stopword(w)).count();
    let words = &current[leading_stopwords..];

    let sentence_initial_word =
        starts_sentence && leading_stopwords == 0 && words.len() == 1 && !is_acronym(words[0]);

    if !words.is_empty() && !sentence_initial_word {
        spans.push(words.join(" "));
    }
    current.clear();
}

fn first_sentence(text: &str) -> &str {
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            match chars.peek() {
                None => return text,
                Some((_, next)) if next.is_whitespace() => return &text[..i + c.len_utf8()],
                _ => {}
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(text: &str) -> Vec<String> {
        HeuristicTopicExtractor.extract_topics(text).unwrap()
    }

    #[test]
    fn test_multi_word_names_are_kept_together() {
        let found = topics("Our company, XYZ Tech, is launching an AI product. It's awesome.");
        assert_eq!(found, vec!["XYZ Tech", "AI"]);
    }

    #[test]
    fn test_sentence_initial_common_word_is_ignored() {
        assert!(topics("Documents show the money moved.").is_empty());
    }

    #[test]
    fn test_leading_article_is_dropped() {
        assert_eq!(topics("The Guardian reported it first."), vec!["Guardian"]);
    }

    #[test]
    fn test_sentence_initial_acronym_is_kept() {
        assert_eq!(topics("NASA confirmed the launch window."), vec!["NASA"]);
    }

    #[test]
    fn test_punctuation_breaks_spans() {
        let found = topics("Investigative Report: Hidden Costs of the policy");
        assert_eq!(found, vec!["Investigative Report", "Hidden Costs"]);
    }

    #[test]
    fn test_duplicates_removed_case_insensitively() {
        let found = topics("we met Alice Smith. later alice smith called, then ALICE SMITH wrote.");
        assert_eq!(found, vec!["Alice Smith"]);
    }

    #[test]
    fn test_lowercase_text_has_no_topics() {
        assert!(topics("nothing to see here").is_empty());
    }

    #[test]
    fn test_summary_is_first_sentence() {
        let summary = HeuristicTopicExtractor
            .summarize("Families were displaced. Documents prove it.")
            .unwrap();
        assert_eq!(summary, "Families were displaced.");
    }

    #[test]
    fn test_summary_keeps_decimal_points() {
        let summary = HeuristicTopicExtractor
            .summarize("Costs rose 3.5 percent this year")
            .unwrap();
        assert_eq!(summary, "Costs rose 3.5 percent this year");
    }

    #[test]
    fn test_long_summary_is_cut() {
        let text = vec!["word"; 40].join(" ");
        let summary = HeuristicTopicExtractor.summarize(&text).unwrap();
        assert!(summary.ends_with("..."));
        assert_eq!(summary.trim_end_matches("...").split_whitespace().count(), 32);
    }

    #[test]
    fn test_blank_text_cannot_be_summarized() {
        assert!(matches!(
            HeuristicTopicExtractor.summarize("   "),
            Err(CapabilityError::EmptyContent)
        ));
    }
}
