use std::sync::LazyLock;

use regex::Regex;

/// Rough number of characters a word takes up, space included.
pub const AVERAGE_WORD_LENGTH: usize = 5;

const QUESTION_WORDS: &[&str] = &[
    "who", "whom", "whose", "what", "when", "where", "why", "how", "which", "is", "are", "am",
    "was", "were", "do", "does", "did", "can", "could", "would", "should", "will",
];

static QUOTES: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r#"["“”‘]"#).ok());

/// Removes typographic and plain double quotes plus the left single quote.
/// Other punctuation, including the apostrophe in contractions, is kept.
pub fn strip_quotes(text: &str) -> String {
    match QUOTES.as_ref() {
        Some(quotes) => quotes.replace_all(text, "").into_owned(),
        None => text.to_string(),
    }
}

/// Whether the text reads like a question: it either carries a `?` or opens
/// with an interrogative or auxiliary verb.
pub fn is_question(text: &str) -> bool {
    if text.contains('?') {
        return true;
    }

    let stripped = strip_quotes(text);
    match stripped.split_whitespace().next() {
        Some(first) => {
            let first = first
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            QUESTION_WORDS.contains(&first.as_str())
        }
        None => false,
    }
}

pub fn initial_is_capital(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Whether a walk may stop after `word`, given the text built so far.
pub fn should_end_sentence(word: &str, minimum_words: usize, text_length: usize) -> bool {
    if word.ends_with(['.', '!', '?']) {
        return true;
    }

    text_length >= minimum_words * AVERAGE_WORD_LENGTH
}

/// Fresh identifier for a generated joke.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
