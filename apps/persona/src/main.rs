use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use persona::assessment::{PitchFacts, RuleTablePitchScorer};
use persona::compose::{assess_pitch, compose_pitch_reply, compose_question, compose_response};
use persona::config::Config;
use persona::learning::recalculate_weights;
use persona::models::find_seed_profile;
use persona::persona::PersonaStore;
use persona::topics::{llm, HeuristicTopicExtractor, LlmClient, LlmTopicExtractor, TopicExtractor};

fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting persona engine v{}", env!("CARGO_PKG_VERSION"));

    let mut rng = match config.rng_seed {
        Some(seed) => {
            info!("Using fixed RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let store = load_store(&config)?;
    info!(
        "Loaded persona '{}' ({})",
        store.identity().persona_name,
        store.identity().real_person_name
    );

    if let Some(pitch_path) = &config.pitch_path {
        let pitch_json = std::fs::read_to_string(pitch_path)
            .with_context(|| format!("Could not read pitch file {}", pitch_path.display()))?;
        let pitch: PitchFacts =
            serde_json::from_str(&pitch_json).context("Pitch file is not valid pitch JSON")?;
        emit(&assess_pitch(&store, &RuleTablePitchScorer, &pitch))?;
    }

    if let Some(prompt) = &config.prompt {
        emit(&compose_response(&store, prompt, &config.prompt_context, &mut rng))?;
    }

    if let Some(topic) = &config.question_topic {
        emit(&compose_question(&store, topic, &config.question_context, &mut rng))?;
    }

    if let Some(pitch_text) = &config.pitch_text {
        let profile = find_seed_profile(&config.journalist_name)
            .with_context(|| format!("No journalist profile named '{}'", config.journalist_name))?;
        let extractor = build_extractor(&config);
        println!("{}", compose_pitch_reply(&profile, pitch_text, extractor.as_ref(), &mut rng));
    }

    Ok(())
}

/// Learns weights first when observations are configured, then loads the result.
fn load_store(config: &Config) -> Result<PersonaStore> {
    let path = match &config.observations_path {
        Some(observations_path) => {
            let report = recalculate_weights(
                observations_path,
                &config.persona_path,
                &config.weighted_persona_path,
            )?;
            info!(
                "Weight recalculation: {} updated, {} skipped",
                report.updated_count,
                report.skipped.len()
            );
            &config.weighted_persona_path
        }
        None => &config.persona_path,
    };

    PersonaStore::from_path(path)
        .with_context(|| format!("Could not load persona from {}", path.display()))
}

fn build_extractor(config: &Config) -> Box<dyn TopicExtractor> {
    let Some(api_key) = &config.anthropic_api_key else {
        return Box::new(HeuristicTopicExtractor);
    };
    match LlmClient::new(api_key.clone()) {
        Ok(client) => {
            info!("LLM topic extractor initialized (model: {})", llm::MODEL);
            Box::new(LlmTopicExtractor::new(client))
        }
        Err(e) => {
            warn!("Could not build LLM client, using heuristic topics: {}", e);
            Box::new(HeuristicTopicExtractor)
        }
    }
}

fn emit<T: Serialize>(result: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
