//! Topic extraction: the NLP capability boundary.
//!
//! Backends return `Result`; callers never see a failure, because the
//! `*_or_fallback` helpers below substitute a defined value at the call site.

use tracing::warn;

use crate::errors::CapabilityError;

pub mod heuristic;
pub mod llm;
pub mod prompts;

pub use heuristic::HeuristicTopicExtractor;
pub use llm::{LlmClient, LlmTopicExtractor};

pub const FALLBACK_TOPIC: &str = "your topic";
const FALLBACK_SUMMARY_CHARS: usize = 50;

/// Entity extraction and summarization, as consumed by the composers.
pub trait TopicExtractor: Send + Sync {
    /// Entity-like spans (organisations, products, people) mentioned in `text`.
    fn extract_topics(&self, text: &str) -> Result<Vec<String>, CapabilityError>;

    fn summarize(&self, text: &str) -> Result<String, CapabilityError>;
}

/// Extracted topics, or `["your topic"]` when extraction fails or finds nothing.
pub fn topics_or_fallback(extractor: &dyn TopicExtractor, text: &str) -> Vec<String> {
    match extractor.extract_topics(text) {
        Ok(topics) if !topics.is_empty() => topics,
        Ok(_) => vec![FALLBACK_TOPIC.to_string()],
        Err(e) => {
            warn!("Topic extraction failed, using fallback topic: {e}");
            vec![FALLBACK_TOPIC.to_string()]
        }
    }
}

/// Summary of `text`, or its first 50 characters when summarization fails.
pub fn summary_or_fallback(extractor: &dyn TopicExtractor, text: &str) -> String {
    match extractor.summarize(text) {
        Ok(summary) if !summary.trim().is_empty() => summary,
        Ok(_) => prefix_summary(text),
        Err(e) => {
            warn!("Summarization failed, using text prefix: {e}");
            prefix_summary(text)
        }
    }
}

pub fn prefix_summary(text: &str) -> String {
    let prefix: String = text.chars().take(FALLBACK_SUMMARY_CHARS).collect();
    format!("{prefix}...")
}
