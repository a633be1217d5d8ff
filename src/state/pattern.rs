use std::collections::HashMap;
use std::sync::Mutex;

use lazy_static::lazy_static;
use regex::Regex;

use crate::grid::Slot;

lazy_static! {
    /// Patterns recur heavily across a run (every candidate-filtering call
    /// for a given entry state reuses the same pattern), so compiled regexes
    /// are cached by their source string rather than rebuilt per call.
    static ref PATTERN_CACHE: Mutex<HashMap<String, Regex>> = Mutex::new(HashMap::new());
}

fn pattern_source(pattern: &[Slot]) -> String {
    let mut source = String::with_capacity(pattern.len() * 5 + 2);
    source.push('^');
    for slot in pattern {
        match slot {
            Slot::Empty => source.push_str("[A-Z]"),
            Slot::Letter(c) => source.push(*c),
        }
    }
    source.push('$');
    source
}

/// Builds (or fetches from cache) a regex that matches exactly the words
/// compatible with `pattern`: fixed slots are literal, empty slots become
/// `[A-Z]`. Mirrors the `re.fullmatch` approach of the reference
/// implementation this was distilled from.
pub fn pattern_regex(pattern: &[Slot]) -> Regex {
    let source = pattern_source(pattern);
    let mut cache = PATTERN_CACHE.lock().expect("pattern cache mutex poisoned");
    cache
        .entry(source.clone())
        .or_insert_with(|| Regex::new(&source).expect("pattern-derived regex is always well-formed"))
        .clone()
}

pub fn matches_pattern(word: &str, pattern: &[Slot]) -> bool {
    word.chars().count() == pattern.len() && pattern_regex(pattern).is_match(word)
}
