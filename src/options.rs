use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Tunables for generation and where the binary keeps its data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// A first sentence this short or shorter gets a second sentence.
    pub minimum_words: usize,
    /// First sentences below this many words are thrown away.
    pub minimum_opening_words: usize,
    /// Retry bound for each regenerate loop in a single joke.
    pub max_attempts: usize,
    /// Hard cap on words in one sentence, for chains that cycle.
    pub max_sentence_words: usize,
    pub database_path: PathBuf,
    /// Seed corpus (a JSON list of jokes), used when the database is empty.
    pub corpus_path: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            minimum_words: 15,
            minimum_opening_words: 5,
            max_attempts: 1000,
            max_sentence_words: 200,
            database_path: PathBuf::from("jokes.db"),
            corpus_path: PathBuf::from("jokes.json"),
        }
    }
}

impl Options {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads options from `path`, falling back to defaults if the file doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }
}
