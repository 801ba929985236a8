use std::collections::HashMap;

use crate::utils::{initial_is_capital, strip_quotes};

/// Word weights kept in the order the words were first seen.
///
/// Weighted picks scan the entries front to back, so the order is part of
/// the table's behaviour and must not depend on hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedTable {
    entries: Vec<(String, u32)>,
    positions: HashMap<String, usize>,
    total: u32,
}

impl WeightedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumps the weight of `word`, inserting it at weight 1 if it's new.
    pub fn increment(&mut self, word: &str) {
        match self.positions.get(word) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.positions.insert(word.to_string(), self.entries.len());
                self.entries.push((word.to_string(), 1));
            }
        }
        self.total += 1;
    }

    pub fn weight(&self, word: &str) -> Option<u32> {
        self.positions
            .get(word)
            .map(|&position| self.entries[position].1)
    }

    /// Sum of every weight, kept alongside the entries rather than recomputed.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries
            .iter()
            .map(|(word, weight)| (word.as_str(), *weight))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First-order chain: which words may open a sentence and which words
/// followed which.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    start_words: WeightedTable,
    chains: HashMap<String, WeightedTable>,
}

impl Chain {
    pub fn new() -> Self {
        Chain::default()
    }

    /// Builds a chain from a batch of texts, in order.
    pub fn train<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for text in texts {
            self.ingest(text.as_ref());
        }
    }

    /// Adds a single text to the chain.
    ///
    /// The text is split on single spaces. Its first token becomes a start
    /// word, as does any later token that begins with a capital letter; every
    /// other token is recorded as a transition from the token before it.
    ///
    /// Repeated spaces are not collapsed: they leave blank tokens behind,
    /// which never become start words and break the transition across them.
    pub fn ingest(&mut self, text: &str) {
        let text = strip_quotes(text);
        let words: Vec<&str> = text.split(' ').collect();

        let Some(start) = words.iter().position(|word| !word.is_empty()) else {
            return;
        };
        tracing::trace!(tokens = words.len(), "ingesting text");

        self.start_words.increment(words[start]);

        for window in words[start..].windows(2) {
            if let [first, second] = window {
                // Immediate repeats ("very very") would make the walk stutter.
                if second.is_empty() || first == second {
                    continue;
                }

                if initial_is_capital(second) {
                    self.start_words.increment(second);
                } else if !first.is_empty() {
                    self.chains
                        .entry(first.to_string())
                        .or_default()
                        .increment(second);
                }
            }
        }
    }

    pub fn start_words(&self) -> &WeightedTable {
        &self.start_words
    }

    /// Outgoing edges of `word`, if any were ever recorded.
    pub fn transitions(&self, word: &str) -> Option<&WeightedTable> {
        self.chains.get(word)
    }

    pub fn has_transitions(&self, word: &str) -> bool {
        self.chains.contains_key(word)
    }

    pub fn words(&self) -> impl Iterator<Item = (&str, &WeightedTable)> {
        self.chains.iter().map(|(word, edges)| (word.as_str(), edges))
    }

    /// Number of words with at least one outgoing transition.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start_words.is_empty() && self.chains.is_empty()
    }
}
