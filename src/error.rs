/// Errors raised while generating or persisting jokes.
#[derive(Debug, thiserror::Error)]
pub enum MarkovError {
    #[error("generation exhausted after {attempts} attempts while producing {stage}")]
    GenerationExhausted { stage: &'static str, attempts: usize },

    #[error("SQLite error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("failed to encode or decode jokes: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
