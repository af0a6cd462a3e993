use serde::{Deserialize, Serialize};

/// Lightweight journalist persona used for quick pitch replies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalistProfile {
    pub name: String,
    pub interests: Vec<String>,
    pub style: String,
    #[serde(default)]
    pub sample_articles: Vec<String>,
}

impl JournalistProfile {
    /// Builds a profile from the flat text form: comma-separated interests and
    /// semicolon-separated article titles.
    pub fn from_text(name: &str, interests: &str, style: &str, sample_articles: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            interests: split_list(interests, ','),
            style: style.trim().to_string(),
            sample_articles: split_list(sample_articles, ';'),
        }
    }
}

fn split_list(text: &str, separator: char) -> Vec<String> {
    text.split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// The built-in profiles available without any external data.
pub fn seed_profiles() -> Vec<JournalistProfile> {
    vec![
        JournalistProfile::from_text(
            "Alice Smith",
            "tech, startups, AI",
            "inquisitive, neutral",
            "The Rise of AI Startups; How Technology is Shaping the Future",
        ),
        JournalistProfile::from_text(
            "Bob Johnson",
            "consumer electronics, gadgets, innovation",
            "formal, analytical",
            "The Next Big Thing in Consumer Electronics; In-Depth: Gadget Trends 2025",
        ),
        JournalistProfile::from_text(
            "Carol Lee",
            "marketing, branding, social media",
            "conversational, engaging",
            "Branding in the Digital Age; Social Media's Impact on PR",
        ),
    ]
}

pub fn find_seed_profile(name: &str) -> Option<JournalistProfile> {
    seed_profiles()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}
