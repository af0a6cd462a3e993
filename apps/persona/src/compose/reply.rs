use rand::Rng;
use tracing::debug;

use crate::compose::tone::{choose_or, with_article};
use crate::models::JournalistProfile;
use crate::topics::{summary_or_fallback, topics_or_fallback, TopicExtractor};

const FALLBACK_INTEREST: &str = "the beats I cover";
const FALLBACK_STYLE: &str = "straightforward";
const REPLY_TEMPLATES: usize = 4;

/// A journalist profile's quick reply to a raw pitch.
///
/// Opens with the extractor's summary, then picks one of four reply templates.
pub fn compose_pitch_reply<R: Rng + ?Sized>(
    profile: &JournalistProfile,
    pitch_text: &str,
    extractor: &dyn TopicExtractor,
    rng: &mut R,
) -> String {
    let topics = topics_or_fallback(extractor, pitch_text);
    let summary = summary_or_fallback(extractor, pitch_text);

    let template = rng.random_range(0..REPLY_TEMPLATES);
    debug!("{} replies with template {}", profile.name, template);

    let body = match template {
        0 => format!(
            "I'm interested in your pitch about {}. Could you elaborate on how this relates to {}?",
            topics.join(" and "),
            choose_or(&profile.interests, FALLBACK_INTEREST, rng)
        ),
        1 => {
            let style = profile.style.trim();
            format!(
                "As someone who writes in {} style, I find your product intriguing. \
                 What sets it apart from others?",
                with_article(if style.is_empty() { FALLBACK_STYLE } else { style })
            )
        }
        2 => "Thank you for reaching out. Can you provide more background on your target \
              audience for this launch?"
            .to_string(),
        _ => {
            let covered = if profile.interests.is_empty() {
                FALLBACK_INTEREST.to_string()
            } else {
                profile.interests.join(", ")
            };
            format!(
                "This sounds interesting, especially since I cover {covered}. \
                 What makes this newsworthy right now?"
            )
        }
    };

    format!("From what I understand: {summary}\n\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CapabilityError;
    use crate::models::seed_profiles;
    use crate::topics::HeuristicTopicExtractor;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PITCH: &str = "Our company, XYZ Tech, is launching an AI product. It's awesome.";

    struct BrokenExtractor;

    impl TopicExtractor for BrokenExtractor {
        fn extract_topics(&self, _text: &str) -> Result<Vec<String>, CapabilityError> {
            Err(CapabilityError::Unavailable("offline".to_string()))
        }

        fn summarize(&self, _text: &str) -> Result<String, CapabilityError> {
            Err(CapabilityError::EmptyContent)
        }
    }

    #[test]
    fn test_reply_opens_with_summary() {
        let profiles = seed_profiles();
        let alice = &profiles[0];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reply = compose_pitch_reply(alice, PITCH, &HeuristicTopicExtractor, &mut rng);
            assert!(reply.starts_with(
                "From what I understand: Our company, XYZ Tech, is launching an AI product.\n\n"
            ));
        }
    }

    #[test]
    fn test_every_template_is_reachable() {
        let profiles = seed_profiles();
        let alice = &profiles[0];
        let mut seen = [false; REPLY_TEMPLATES];
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reply = compose_pitch_reply(alice, PITCH, &HeuristicTopicExtractor, &mut rng);
            if reply.contains("your pitch about XYZ Tech and AI") {
                seen[0] = true;
            } else if reply.contains("writes in an inquisitive, neutral style") {
                seen[1] = true;
            } else if reply.contains("target audience") {
                seen[2] = true;
            } else if reply.contains("since I cover tech, startups, AI.") {
                seen[3] = true;
            }
        }
        assert_eq!(seen, [true; REPLY_TEMPLATES]);
    }

    #[test]
    fn test_broken_extractor_falls_back() {
        let profiles = seed_profiles();
        let carol = &profiles[2];
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reply = compose_pitch_reply(carol, "short pitch", &BrokenExtractor, &mut rng);
            assert!(reply.starts_with("From what I understand: short pitch...\n\n"));
            if reply.contains("your pitch about") {
                assert!(reply.contains("your pitch about your topic."));
            }
        }
    }

    #[test]
    fn test_empty_profile_still_replies() {
        let blank = JournalistProfile::from_text("Anon", "", "", "");
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reply = compose_pitch_reply(&blank, PITCH, &HeuristicTopicExtractor, &mut rng);
            assert!(!reply.contains("in a  style"));
            assert!(!reply.contains("relates to ?"));
            assert!(!reply.contains("cover ."));
        }
    }
}
