use std::fmt;

/// Orientation of an entry within the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Across,
    Down,
}

/// A single pattern slot: either fixed to a letter or still open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Empty,
    Letter(char),
}

impl Slot {
    pub fn is_fixed(&self) -> bool {
        matches!(self, Slot::Letter(_))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Slot::Empty => write!(f, "_"),
            Slot::Letter(c) => write!(f, "{}", c),
        }
    }
}

/// A maximal run of non-block cells of at least `MIN_WORD_LENGTH`, in one
/// orientation. See spec.md §3 for the field-level invariants.
#[derive(Clone, Debug)]
pub struct Entry {
    pub index: usize,
    pub direction: Direction,
    pub length: usize,
    pub coordinates: Vec<(usize, usize)>,
    /// One slot per coordinate: `Some((other_entry_index, position_in_other))`
    /// if another entry crosses this cell, `None` otherwise.
    pub dependencies: Vec<Option<(usize, usize)>>,
    pub pattern: Vec<Slot>,
    pub possible_words: Vec<String>,
    pub num_letters_fixed: usize,
    pub word_fixed: bool,
}

impl Entry {
    pub fn word(&self) -> String {
        self.pattern.iter().map(|s| char::from(*s)).collect()
    }

    pub fn num_possible_words(&self) -> usize {
        self.possible_words.len()
    }
}

impl From<Slot> for char {
    fn from(slot: Slot) -> char {
        match slot {
            Slot::Empty => '_',
            Slot::Letter(c) => c,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Entry: #{}, Position: {:?}, Word: {}({}/{}), Possible words: {}.",
            self.index,
            self.coordinates[0],
            self.word(),
            self.num_letters_fixed,
            self.length,
            self.num_possible_words()
        )
    }
}
