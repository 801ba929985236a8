use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{MarkovError, Result};
use crate::markov_chain::{Chain, WeightedTable};
use crate::options::Options;
use crate::store::{JokeStore, STORED_JOKES};
use crate::utils::{generate_id, is_question, should_end_sentence, strip_quotes};

/// One corpus entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Joke {
    pub id: String,
    pub joke: String,
}

impl Joke {
    pub fn new(id: impl Into<String>, joke: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            joke: joke.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Sentence {
    sentence: String,
    word_count: usize,
}

/// Generates jokes from a corpus and feeds every joke it makes back into
/// that corpus.
///
/// The generator owns the chain outright; callers that share one across
/// threads must serialise `generate_joke` themselves.
pub struct ChainGenerator<S, R = StdRng> {
    chain: Chain,
    jokes: Vec<Joke>,
    options: Options,
    store: S,
    rng: R,
    next_id: fn() -> String,
}

impl<S: JokeStore> ChainGenerator<S> {
    pub fn new(jokes: Vec<Joke>, store: S, options: Options) -> Self {
        Self::with_rng(jokes, store, options, StdRng::from_entropy())
    }
}

impl<S: JokeStore, R: Rng> ChainGenerator<S, R> {
    pub fn with_rng(jokes: Vec<Joke>, store: S, options: Options, rng: R) -> Self {
        let mut chain = Chain::new();
        chain.train(jokes.iter().map(|joke| joke.joke.as_str()));
        tracing::debug!(
            jokes = jokes.len(),
            start_words = chain.start_words().len(),
            words = chain.len(),
            "built chain"
        );

        Self {
            chain,
            jokes,
            options,
            store,
            rng,
            next_id: generate_id,
        }
    }

    /// Replaces the identifier source used for new jokes.
    pub fn with_id_source(mut self, next_id: fn() -> String) -> Self {
        self.next_id = next_id;
        self
    }

    pub fn ingest(&mut self, text: &str) {
        self.chain.ingest(text);
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn jokes(&self) -> &[Joke] {
        &self.jokes
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generates a joke of one or two sentences, saves the grown corpus and
    /// learns from the new joke.
    pub fn generate_joke(&mut self) -> Result<String> {
        let minimum_opening_words = self.options.minimum_opening_words;
        let first = self.generate_until("opening sentence", |sentence| {
            sentence.word_count >= minimum_opening_words
        })?;

        let second = if first.word_count <= self.options.minimum_words {
            self.generate_until("closing sentence", |sentence| {
                !is_question(&sentence.sentence)
            })?
        } else {
            Sentence::default()
        };

        let joke = format!("{} {}", first.sentence, second.sentence)
            .trim()
            .to_string();
        self.remember(&joke)?;

        Ok(joke)
    }

    /// Saves the joke and, once that succeeded, trains on it.
    fn remember(&mut self, joke: &str) -> Result<()> {
        let id = (self.next_id)();
        self.jokes.push(Joke::new(id.as_str(), joke));

        if let Err(err) = self.store.set(STORED_JOKES, &self.jokes) {
            self.jokes.pop();
            return Err(err);
        }

        self.chain.ingest(joke);
        tracing::info!(id = %id, corpus = self.jokes.len(), "stored generated joke");
        Ok(())
    }

    fn generate_until(
        &mut self,
        stage: &'static str,
        accept: impl Fn(&Sentence) -> bool,
    ) -> Result<Sentence> {
        let attempts = self.options.max_attempts;
        for attempt in 1..=attempts {
            let sentence = self.generate_sentence();
            if accept(&sentence) {
                return Ok(sentence);
            }
            tracing::debug!(stage, attempt, words = sentence.word_count, "rejected sentence");
        }

        Err(MarkovError::GenerationExhausted { stage, attempts })
    }

    /// Walks the chain from a start word until it runs into a dead end.
    fn generate_sentence(&mut self) -> Sentence {
        let mut current = self.pick_start_word();
        let mut sentence = current.clone();
        let mut word_count = 1;

        loop {
            if word_count >= self.options.max_sentence_words {
                tracing::debug!(words = word_count, "sentence hit the word cap");
                break;
            }

            let next = match self.pick_next_word(&current) {
                Some(word) => word,
                None => break,
            };

            sentence.push(' ');
            sentence.push_str(&next);
            word_count += 1;
            current = next;

            let length = sentence.chars().count();
            if should_end_sentence(&current, self.options.minimum_words, length)
                && !self.chain.has_transitions(&current)
            {
                break;
            }
        }

        let sentence = strip_quotes(&handle_sentence_end(&sentence))
            .trim()
            .to_string();

        Sentence {
            sentence,
            word_count,
        }
    }

    /// Picks a start word by weight, passing over words that have no
    /// transitions or only a single one as long as later words remain.
    fn pick_start_word(&mut self) -> String {
        let table = self.chain.start_words();
        if table.total() == 0 {
            return String::new();
        }

        let draw = self.rng.gen_range(1..=table.total());
        let chain = &self.chain;
        let word = weighted_scan(table, draw, |word| {
            chain
                .transitions(word)
                .is_some_and(|edges| edges.total() != 1)
        });

        word.unwrap_or_default().to_string()
    }

    /// Picks a follower of `word` in proportion to the edge weights.
    fn pick_next_word(&mut self, word: &str) -> Option<String> {
        let edges = self.chain.transitions(word)?;
        if edges.total() == 0 {
            return None;
        }

        let draw = self.rng.gen_range(1..=edges.total());
        weighted_scan(edges, draw, |_| true).map(str::to_string)
    }
}

/// Returns the first entry whose running weight reaches `draw` and which
/// `accept`s, or the last entry if none does.
fn weighted_scan<'a>(
    table: &'a WeightedTable,
    draw: u32,
    accept: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    let mut running = 0;
    let mut picked = None;

    for (word, weight) in table.iter() {
        running += weight;
        picked = Some(word);
        if running >= draw && accept(word) {
            break;
        }
    }

    picked
}

/// Fixes the final mark: questions end in `?`, and a sentence that has a
/// stray `?` somewhere ends in `.`.
fn handle_sentence_end(sentence: &str) -> String {
    if is_question(sentence) && !sentence.contains('?') {
        replace_final_mark(sentence, '?')
    } else if sentence.contains('?') {
        replace_final_mark(sentence, '.')
    } else {
        sentence.to_string()
    }
}

/// Swaps a trailing non-alphanumeric char for `mark`, or appends `mark` when
/// the sentence ends in a word character.
///
/// Appending is deliberate: replacing a letter would truncate the last word
/// ("road" into "roa?") and feed a word that never appeared in the corpus
/// back into the chain.
fn replace_final_mark(sentence: &str, mark: char) -> String {
    let mut chars = sentence.chars();
    match chars.next_back() {
        Some(last) if !last.is_alphanumeric() => format!("{}{}", chars.as_str(), mark),
        Some(_) => format!("{}{}", sentence, mark),
        None => String::new(),
    }
}
