//! First-order Markov chain joke generator.
//!
//! A [`ChainGenerator`] is built from a corpus of jokes, walks the chain to
//! produce new ones and feeds each result back into its own corpus.

pub mod error;
pub mod generator;
pub mod logging;
pub mod markov_chain;
pub mod options;
pub mod store;
pub mod utils;

pub use error::{MarkovError, Result};
pub use generator::{ChainGenerator, Joke};
pub use markov_chain::{Chain, WeightedTable};
pub use options::Options;
pub use store::{JokeStore, MemoryStore, SqliteStore, STORED_JOKES};
