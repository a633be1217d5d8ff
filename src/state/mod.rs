//! Crossword State & Constraint Propagator: an immutable-by-convention
//! snapshot of all entries, and the logic that advances it one word at a
//! time.

mod pattern;

use std::collections::HashSet;
use std::rc::Rc;

use crate::error::CrosswordError;
use crate::grid::{Entry, Slot};
use crate::words::WordIndex;

pub use pattern::{matches_pattern, pattern_regex};

/// A snapshot of every entry's current pattern and candidate set. States are
/// never mutated once built: `take_action` returns a new state, sharing any
/// entry untouched by the action via `Rc`.
#[derive(Clone, Debug)]
pub struct CrosswordState {
    entries: Vec<Rc<Entry>>,
    words_already_used: HashSet<String>,
    next_entry_index: Option<usize>,
}

impl CrosswordState {
    pub fn new(entries: Vec<Rc<Entry>>) -> Self {
        let words_already_used: HashSet<String> = entries
            .iter()
            .filter(|e| e.word_fixed)
            .map(|e| e.word())
            .collect();

        let next_entry_index = entries
            .iter()
            .filter(|e| !e.word_fixed)
            .min_by_key(|e| (e.num_possible_words(), e.index))
            .map(|e| e.index);

        CrosswordState {
            entries,
            words_already_used,
            next_entry_index,
        }
    }

    pub fn entries(&self) -> &[Rc<Entry>] {
        &self.entries
    }

    pub fn filled_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.word_fixed).map(|e| e.as_ref())
    }

    pub fn empty_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.word_fixed).map(|e| e.as_ref())
    }

    pub fn words_already_used(&self) -> &HashSet<String> {
        &self.words_already_used
    }

    pub fn next_entry_to_be_filled(&self) -> Option<&Entry> {
        self.next_entry_index.map(|i| self.entries[i].as_ref())
    }

    /// The branching factor of the move that would follow this state, or
    /// `None` for a success-terminal state with nothing left to fill.
    pub fn num_options(&self) -> Option<usize> {
        self.next_entry_to_be_filled().map(|e| e.num_possible_words())
    }

    pub fn is_terminal(&self) -> bool {
        match self.next_entry_to_be_filled() {
            None => true,
            Some(entry) => entry.num_possible_words() == 0,
        }
    }

    /// Count of filled entries. Higher is better; equals the total entry
    /// count for a full solution.
    pub fn reward(&self) -> usize {
        self.entries.iter().filter(|e| e.word_fixed).count()
    }

    pub fn possible_actions(&self) -> &[String] {
        match self.next_entry_to_be_filled() {
            Some(entry) => &entry.possible_words,
            None => &[],
        }
    }

    /// Fills the current `next_entry_to_be_filled` with `action`, propagating
    /// the new letters to every crossing entry and narrowing their candidate
    /// lists. Returns a new state; `self` is left untouched.
    pub fn take_action(&self, action: &str) -> Result<CrosswordState, CrosswordError> {
        let next_index = self.next_entry_index.ok_or_else(|| {
            CrosswordError::InvalidState("take_action called on a terminal state".to_string())
        })?;
        let next_old = &self.entries[next_index];

        if !next_old.possible_words.iter().any(|w| w == action) {
            return Err(CrosswordError::InvalidState(format!(
                "action {} is not a possible word for entry #{}",
                action, next_old.index
            )));
        }

        let mut new_entries = self.entries.clone();

        let action_letters: Vec<char> = action.chars().collect();
        let next_new = Entry {
            index: next_old.index,
            direction: next_old.direction,
            length: next_old.length,
            coordinates: next_old.coordinates.clone(),
            dependencies: next_old.dependencies.clone(),
            pattern: action_letters.iter().map(|&c| Slot::Letter(c)).collect(),
            possible_words: vec![action.to_string()],
            num_letters_fixed: next_old.length,
            word_fixed: true,
        };

        for (position, dependency) in next_old.dependencies.iter().enumerate() {
            let (other_index, other_position) = match dependency {
                Some(dep) => *dep,
                None => continue,
            };
            let other_old = &self.entries[other_index];
            if other_old.word_fixed {
                continue;
            }

            let mut new_pattern = other_old.pattern.clone();
            new_pattern[other_position] = Slot::Letter(action_letters[position]);

            let possible_words: Vec<String> = other_old
                .possible_words
                .iter()
                .filter(|w| {
                    w.as_str() != action
                        && !self.words_already_used.contains(w.as_str())
                        && matches_pattern(w, &new_pattern)
                })
                .cloned()
                .collect();

            new_entries[other_index] = Rc::new(Entry {
                index: other_old.index,
                direction: other_old.direction,
                length: other_old.length,
                coordinates: other_old.coordinates.clone(),
                dependencies: other_old.dependencies.clone(),
                pattern: new_pattern,
                possible_words,
                num_letters_fixed: other_old.num_letters_fixed + 1,
                word_fixed: false,
            });
        }

        new_entries[next_index] = Rc::new(next_new);

        Ok(CrosswordState::new(new_entries))
    }
}

impl std::fmt::Display for CrosswordState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "State: {}/{}, {:?}",
            self.entries.iter().filter(|e| e.word_fixed).count(),
            self.entries.len(),
            self.next_entry_to_be_filled().map(|e| e.to_string())
        )
    }
}

/// Builds the initial state from the analyzer's entry list and a word index,
/// applying each entry's pre-filled pattern (if any) as an initial filter.
pub fn initial_state(entries: Vec<Entry>, word_index: &WordIndex) -> CrosswordState {
    let built: Vec<Rc<Entry>> = entries
        .into_iter()
        .map(|mut entry| {
            if entry.word_fixed {
                entry.possible_words = vec![entry.word()];
            } else if entry.num_letters_fixed > 0 {
                entry.possible_words = word_index
                    .candidates_for_length(entry.length)
                    .iter()
                    .filter(|w| matches_pattern(w, &entry.pattern))
                    .cloned()
                    .collect();
            } else {
                entry.possible_words = word_index.candidates_for_length(entry.length).to_vec();
            }
            Rc::new(entry)
        })
        .collect();

    CrosswordState::new(built)
}
