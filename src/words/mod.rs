//! Word Index: normalizes a raw word list and groups candidates by length.

use std::collections::HashMap;

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

/// Holds candidate words grouped by length, ready to seed every entry's
/// initial `possible_words`.
#[derive(Debug, Clone)]
pub struct WordIndex {
    words_by_length: HashMap<usize, Vec<String>>,
}

impl WordIndex {
    /// Runs the normalization pipeline from spec.md §4.2: uppercase, strip
    /// non-`A-Z` characters, keep only the requested lengths, dedupe, sort,
    /// then subsample down to `max_num_words` if needed.
    pub fn build(
        raw_words: impl IntoIterator<Item = String>,
        word_lengths: &[usize],
        max_num_words: usize,
        rng: &mut impl Rng,
    ) -> Self {
        let keep_length = |len: usize| word_lengths.contains(&len);

        let mut cleaned: Vec<String> = raw_words
            .into_iter()
            .map(|w| w.to_uppercase().chars().filter(|c| c.is_ascii_uppercase()).collect::<String>())
            .filter(|w| keep_length(w.chars().count()))
            .collect();

        cleaned.sort();
        cleaned.dedup();

        let sampled: Vec<String> = if cleaned.len() > max_num_words {
            cleaned
                .choose_multiple(rng, max_num_words)
                .cloned()
                .collect()
        } else {
            cleaned
        };

        let mut words_by_length: HashMap<usize, Vec<String>> = HashMap::new();
        for length in word_lengths {
            words_by_length.insert(*length, vec![]);
        }
        for word in sampled {
            words_by_length.entry(word.chars().count()).or_default().push(word);
        }

        info!(
            "Word index built: {} words across {} lengths",
            words_by_length.values().map(|v| v.len()).sum::<usize>(),
            words_by_length.len()
        );

        WordIndex { words_by_length }
    }

    /// The ordered, deduplicated candidate list for entries of length `L`.
    /// This is the initial `possible_words` for every empty entry of that
    /// length.
    pub fn candidates_for_length(&self, length: usize) -> &[String] {
        self.words_by_length
            .get(&length)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(strings: &[&str]) -> Vec<String> {
        strings.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalizes_case_and_strips_punctuation() {
        let mut rng = StdRng::seed_from_u64(1);
        let index = WordIndex::build(words(&["cat", "D-O-G", "a1b"]), &[3], 100, &mut rng);
        let mut candidates = index.candidates_for_length(3).to_vec();
        candidates.sort();
        assert_eq!(candidates, vec!["AB".to_string(), "CAT".to_string(), "DOG".to_string()]);
    }

    #[test]
    fn drops_words_of_unwanted_length() {
        let mut rng = StdRng::seed_from_u64(1);
        let index = WordIndex::build(words(&["cat", "tiger"]), &[3], 100, &mut rng);
        assert_eq!(index.candidates_for_length(3), &["CAT".to_string()]);
        assert!(index.candidates_for_length(5).is_empty());
    }

    #[test]
    fn deduplicates_and_sorts() {
        let mut rng = StdRng::seed_from_u64(1);
        let index = WordIndex::build(words(&["cat", "cat", "bat"]), &[3], 100, &mut rng);
        assert_eq!(index.candidates_for_length(3), &["BAT".to_string(), "CAT".to_string()]);
    }

    #[test]
    fn caps_to_max_num_words() {
        let mut rng = StdRng::seed_from_u64(42);
        let many = words(&["AAA", "BBB", "CCC", "DDD", "EEE"]);
        let index = WordIndex::build(many, &[3], 2, &mut rng);
        assert_eq!(index.candidates_for_length(3).len(), 2);
    }

    #[test]
    fn unknown_length_returns_empty_slice() {
        let mut rng = StdRng::seed_from_u64(1);
        let index = WordIndex::build(words(&["cat"]), &[3], 100, &mut rng);
        assert!(index.candidates_for_length(7).is_empty());
    }
}
