//! LLM-backed topic extraction over the Anthropic Messages API.
//!
//! All model calls in this crate go through `LlmClient`. Calls are blocking; the
//! engine has no async runtime.
//!
//! Model: claude-sonnet-4-5 (hardcoded, not configurable)
use std::time::Duration;

use reqwest::blocking::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::CapabilityError;
use crate::topics::prompts::{self, JSON_ONLY_SYSTEM, SUMMARY_SYSTEM};
use crate::topics::TopicExtractor;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 512;
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Text of the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TopicList {
    #[serde(default)]
    topics: Vec<String>,
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, CapabilityError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, api_key })
    }

    /// Raw call returning the full response. 429 and 5xx are retried with
    /// exponential backoff.
    pub fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, CapabilityError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<CapabilityError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                std::thread::sleep(delay);
            }

            let response = match self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(CapabilityError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(CapabilityError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(CapabilityError::Api {
                    status: status.as_u16(),
                    message: api_error_message(body),
                });
            }

            let llm_response: LlmResponse = response.json()?;
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );
            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(CapabilityError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Calls the model and parses its text as JSON. The prompt must ask for JSON.
    pub fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, CapabilityError> {
        let response = self.call(prompt, system)?;
        let text = response.text().ok_or(CapabilityError::EmptyContent)?;
        parse_json_reply(text)
    }
}

fn api_error_message(body: String) -> String {
    serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, CapabilityError> {
    serde_json::from_str(strip_json_fences(text)).map_err(CapabilityError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(stripped)
}

pub struct LlmTopicExtractor {
    llm: LlmClient,
}

impl LlmTopicExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

impl TopicExtractor for LlmTopicExtractor {
    fn extract_topics(&self, text: &str) -> Result<Vec<String>, CapabilityError> {
        let list: TopicList = self
            .llm
            .call_json(&prompts::topic_prompt(text), JSON_ONLY_SYSTEM)?;
        Ok(clean_topics(list.topics))
    }

    fn summarize(&self, text: &str) -> Result<String, CapabilityError> {
        let response = self.llm.call(&prompts::summary_prompt(text), SUMMARY_SYSTEM)?;
        response
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or(CapabilityError::EmptyContent)
    }
}

fn clean_topics(topics: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(topics.len());
    for topic in topics {
        let topic = topic.trim();
        if !topic.is_empty() && !cleaned.iter().any(|t| t.eq_ignore_ascii_case(topic)) {
            cleaned.push(topic.to_string());
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"topics\": []}\n```";
        assert_eq!(strip_json_fences(input), "{\"topics\": []}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"topics\": []}\n```";
        assert_eq!(strip_json_fences(input), "{\"topics\": []}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        assert_eq!(strip_json_fences("  {\"topics\": []} "), "{\"topics\": []}");
    }

    #[test]
    fn test_parse_fenced_topic_list() {
        let list: TopicList =
            parse_json_reply("```json\n{\"topics\": [\"XYZ Tech\", \"AI\"]}\n```").unwrap();
        assert_eq!(list.topics, vec!["XYZ Tech", "AI"]);
    }

    #[test]
    fn test_parse_non_json_reply_is_error() {
        let result: Result<TopicList, _> = parse_json_reply("Sure! Here are the topics.");
        assert!(matches!(result, Err(CapabilityError::Parse(_))));
    }

    #[test]
    fn test_response_text_picks_first_text_block() {
        let response: LlmResponse = serde_json::from_str(
            r#"{
                "content": [
                    {"type": "tool_use"},
                    {"type": "text", "text": "A short summary."}
                ],
                "usage": {"input_tokens": 10, "output_tokens": 4}
            }"#,
        )
        .unwrap();
        assert_eq!(response.text(), Some("A short summary."));
    }

    #[test]
    fn test_api_error_message_prefers_structured_body() {
        let body = r#"{"error": {"type": "invalid_request_error", "message": "bad key"}}"#;
        assert_eq!(api_error_message(body.to_string()), "bad key");
        assert_eq!(api_error_message("plain".to_string()), "plain");
    }

    #[test]
    fn test_clean_topics_trims_and_dedups() {
        let cleaned = clean_topics(vec![
            " XYZ Tech ".into(),
            "".into(),
            "xyz tech".into(),
            "AI".into(),
        ]);
        assert_eq!(cleaned, vec!["XYZ Tech", "AI"]);
    }
}
