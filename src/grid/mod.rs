//! Grid Analyzer: turns a fixed cell grid into the ordered list of entries
//! (and their crossing dependencies) that the solver fills in.

mod analyzer;
mod cell;
mod display;
mod entry;
mod synth;

pub use analyzer::{analyze, get_coordinates, get_slice, summarize, GridSummary, SliceBound};
pub use cell::Cell;
pub use display::{render, rows_as_strings};
pub use entry::{Direction, Entry, Slot};
pub use synth::{add_random_blocks, synthesize_blank};

/// Default minimum entry length: shorter runs are treated as background, not
/// an entry to be filled.
pub const MIN_WORD_LENGTH: usize = 3;
