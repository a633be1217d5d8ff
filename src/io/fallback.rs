//! Bundled English word list used when no `--path_to_words` glob is given.
//! Stands in for the external dictionary collaborator mentioned in spec §6
//! (the reference implementation instead pulled an NLTK corpus at runtime).

const BUNDLED_WORDS: &str = include_str!("../../assets/words_alpha_sample.txt");

pub fn fallback_dictionary() -> Vec<String> {
    BUNDLED_WORDS
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
