use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const UNTITLED_PITCH: &str = "Untitled Pitch";

/// Structured summary of a PR pitch, supplied by the caller.
///
/// Missing fields take the same defaults as an absent key would in the JSON form:
/// zeroes and `false`, except `ethical_alignment`, which is assumed unless stated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchFacts {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    #[serde(default)]
    pub data_provided: bool,
    /// 0.0 – 1.0
    #[serde(default)]
    pub potential_impact: f64,
    /// 0.0 – 1.0
    #[serde(default)]
    pub source_reputation: f64,
    #[serde(default = "default_ethical_alignment")]
    pub ethical_alignment: bool,
}

fn default_ethical_alignment() -> bool {
    true
}

impl Default for PitchFacts {
    fn default() -> Self {
        Self {
            title: String::new(),
            summary: String::new(),
            keywords: BTreeSet::new(),
            data_provided: false,
            potential_impact: 0.0,
            source_reputation: 0.0,
            ethical_alignment: default_ethical_alignment(),
        }
    }
}

impl PitchFacts {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_PITCH
        } else {
            &self.title
        }
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_json_takes_defaults() {
        let pitch: PitchFacts = serde_json::from_str(r#"{"title": "Launch"}"#).unwrap();
        assert_eq!(pitch.title, "Launch");
        assert!(!pitch.data_provided);
        assert!(pitch.ethical_alignment);
        assert_eq!(pitch, PitchFacts { title: "Launch".into(), ..PitchFacts::default() });
    }

    #[test]
    fn test_keywords_deduplicate() {
        let pitch: PitchFacts =
            serde_json::from_str(r#"{"keywords": ["breaking", "breaking", "tech"]}"#).unwrap();
        assert_eq!(pitch.keywords.len(), 2);
        assert!(pitch.has_keyword("breaking"));
        assert!(!pitch.has_keyword("Breaking"));
    }

    #[test]
    fn test_blank_title_displays_placeholder() {
        let pitch = PitchFacts { title: "  ".into(), ..PitchFacts::default() };
        assert_eq!(pitch.display_title(), UNTITLED_PITCH);
    }
}
