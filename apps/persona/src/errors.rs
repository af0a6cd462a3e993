use std::path::PathBuf;

use thiserror::Error;

/// Failure to resolve an `AttributePath` against a persona tree.
///
/// Always recoverable: callers skip the offending attribute and carry on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("Attribute path is empty")]
    Empty,

    #[error("Attribute path '{path}' has an empty segment at position {index}")]
    EmptySegment { path: String, index: usize },

    #[error("Path '{path}': segment '{segment}' not found")]
    NotFound { path: String, segment: String },

    #[error("Path '{path}': segment '{segment}' cannot be resolved through a {found}")]
    TypeMismatch {
        path: String,
        segment: String,
        found: &'static str,
    },
}

/// Failure to build a `PersonaStore`. Fatal: the store is never partially built.
#[derive(Debug, Error)]
pub enum PersonaLoadError {
    #[error("Could not read persona file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid persona JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Persona document must be a JSON object at the top level")]
    NotAnObject,

    #[error("Persona document is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Duplicate record name '{name}' in sequence at '{location}'")]
    DuplicateName { location: String, name: String },
}

/// Failure of an external NLP capability. Never propagated past the call site.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Capability returned empty content")]
    EmptyContent,

    #[error("Capability unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error for file-backed engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Persona load error: {0}")]
    PersonaLoad(#[from] PersonaLoadError),

    #[error("Attribute path error: {0}")]
    Path(#[from] PathError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }
}
