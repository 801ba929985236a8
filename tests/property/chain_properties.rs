use joke_markov::Chain;
use proptest::prelude::*;

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z “”\"‘]{0,6}", 0..12).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn totals_equal_edge_sums(texts in prop::collection::vec(text(), 0..8)) {
        let mut chain = Chain::new();
        for text in &texts {
            chain.ingest(text);

            for (word, edges) in chain.words() {
                let sum: u32 = edges.iter().map(|(_, weight)| weight).sum();
                prop_assert_eq!(sum, edges.total(), "edges of {:?}", word);
                prop_assert!(!edges.is_empty());
            }
        }
    }

    #[test]
    fn ingesting_twice_doubles_weights(text in text()) {
        let mut once = Chain::new();
        once.ingest(&text);
        let mut twice = Chain::new();
        twice.ingest(&text);
        twice.ingest(&text);

        prop_assert_eq!(once.len(), twice.len());
        prop_assert_eq!(once.start_words().total() * 2, twice.start_words().total());
        for (word, weight) in once.start_words().iter() {
            prop_assert_eq!(Some(weight * 2), twice.start_words().weight(word));
        }
        for (word, edges) in once.words() {
            let doubled = twice.transitions(word).unwrap();
            prop_assert_eq!(edges.total() * 2, doubled.total());
            for (next, weight) in edges.iter() {
                prop_assert_eq!(Some(weight * 2), doubled.weight(next));
            }
        }
    }

    #[test]
    fn start_words_only_grow(texts in prop::collection::vec(text(), 1..6)) {
        let mut chain = Chain::new();
        let mut previous = 0;
        for text in &texts {
            chain.ingest(text);
            prop_assert!(chain.start_words().total() >= previous);
            previous = chain.start_words().total();
        }
    }
}
