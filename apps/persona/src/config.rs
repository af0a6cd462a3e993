use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_WEIGHTED_PERSONA_PATH: &str = "persona_weighted.json";
pub const DEFAULT_PROMPT_CONTEXT: &str = "general discussion";
pub const DEFAULT_QUESTION_CONTEXT: &str = "general";
pub const DEFAULT_JOURNALIST: &str = "Alice Smith";

/// Batch runner configuration loaded from environment variables.
/// Only `PERSONA_PATH` is required; every other step runs when its input is set.
#[derive(Debug, Clone)]
pub struct Config {
    pub persona_path: PathBuf,
    pub observations_path: Option<PathBuf>,
    pub weighted_persona_path: PathBuf,
    pub pitch_path: Option<PathBuf>,
    pub pitch_text: Option<String>,
    pub journalist_name: String,
    pub prompt: Option<String>,
    pub prompt_context: String,
    pub question_topic: Option<String>,
    pub question_context: String,
    pub anthropic_api_key: Option<String>,
    pub rng_seed: Option<u64>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            persona_path: get("PERSONA_PATH")
                .map(PathBuf::from)
                .context("Required environment variable 'PERSONA_PATH' is not set")?,
            observations_path: get("OBSERVATIONS_PATH").map(PathBuf::from),
            weighted_persona_path: get("WEIGHTED_PERSONA_PATH")
                .unwrap_or_else(|| DEFAULT_WEIGHTED_PERSONA_PATH.to_string())
                .into(),
            pitch_path: get("PITCH_PATH").map(PathBuf::from),
            pitch_text: get("PITCH_TEXT"),
            journalist_name: get("JOURNALIST_NAME").unwrap_or_else(|| DEFAULT_JOURNALIST.to_string()),
            prompt: get("PROMPT"),
            prompt_context: get("PROMPT_CONTEXT").unwrap_or_else(|| DEFAULT_PROMPT_CONTEXT.to_string()),
            question_topic: get("QUESTION_TOPIC"),
            question_context: get("QUESTION_CONTEXT")
                .unwrap_or_else(|| DEFAULT_QUESTION_CONTEXT.to_string()),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            rng_seed: get("RNG_SEED")
                .map(|s| s.trim().parse::<u64>())
                .transpose()
                .context("RNG_SEED must be an unsigned integer")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_applied() {
        let config = config_from(&[("PERSONA_PATH", "persona.json")]).unwrap();
        assert_eq!(config.persona_path, PathBuf::from("persona.json"));
        assert_eq!(config.weighted_persona_path, PathBuf::from(DEFAULT_WEIGHTED_PERSONA_PATH));
        assert_eq!(config.prompt_context, DEFAULT_PROMPT_CONTEXT);
        assert_eq!(config.question_context, DEFAULT_QUESTION_CONTEXT);
        assert_eq!(config.journalist_name, DEFAULT_JOURNALIST);
        assert_eq!(config.rust_log, "info");
        assert!(config.observations_path.is_none());
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn test_missing_persona_path_is_an_error() {
        let err = config_from(&[("PROMPT", "hello")]).unwrap_err();
        assert!(err.to_string().contains("PERSONA_PATH"));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config_from(&[("PERSONA_PATH", "p.json"), ("PROMPT", "  "), ("RNG_SEED", "")]).unwrap();
        assert!(config.prompt.is_none());
        assert!(config.rng_seed.is_none());
    }

    #[test]
    fn test_rng_seed_must_be_numeric() {
        assert_eq!(
            config_from(&[("PERSONA_PATH", "p.json"), ("RNG_SEED", " 42 ")]).unwrap().rng_seed,
            Some(42)
        );
        assert!(config_from(&[("PERSONA_PATH", "p.json"), ("RNG_SEED", "abc")]).is_err());
    }
}
