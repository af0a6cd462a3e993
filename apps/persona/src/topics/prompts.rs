// Prompts for the LLM topic backend.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

pub const SUMMARY_SYSTEM: &str = "You summarize press pitches for a busy journalist. \
    Reply with one plain sentence. No preamble, no quotation marks.";

/// `{pitch_text}` is replaced with the pitch body.
pub const TOPIC_PROMPT_TEMPLATE: &str = r#"List the named entities this pitch is about:
organisations, products, people, places and named events. Use the wording from the text.
Do not invent entities that are not mentioned.

PITCH:
{pitch_text}

Return JSON of the form: {"topics": ["Entity One", "Entity Two"]}
Return {"topics": []} if nothing qualifies."#;

/// `{pitch_text}` is replaced with the pitch body.
pub const SUMMARY_PROMPT_TEMPLATE: &str = "Summarize this pitch in at most 30 words.\n\nPITCH:\n{pitch_text}";

pub fn topic_prompt(pitch_text: &str) -> String {
    TOPIC_PROMPT_TEMPLATE.replace("{pitch_text}", pitch_text)
}

pub fn summary_prompt(pitch_text: &str) -> String {
    SUMMARY_PROMPT_TEMPLATE.replace("{pitch_text}", pitch_text)
}
