//! Solver Driver: wires the Grid Analyzer, Word Index, and MCTS Engine
//! together into a full fill attempt, with an optional grid pre-processor
//! retry loop for unsuccessful runs.

use ndarray::Array2;
use rand::rngs::StdRng;

use crate::error::CrosswordError;
use crate::grid::{self, Cell, Slot, MIN_WORD_LENGTH};
use crate::mcts::{Mcts, StatsTable};
use crate::state::{self, CrosswordState};
use crate::words::WordIndex;

/// Tuning knobs for a single solver run. Mirrors the reference
/// implementation's `DefaultArguments`: retries are opt-in (defaulting to a
/// single attempt with no extra blocks added).
#[derive(Clone, Debug)]
pub struct SolverConfig {
    pub min_word_length: usize,
    pub max_num_words: usize,
    pub max_mcts_iterations: usize,
    pub exploration_constant: Option<f64>,
    pub max_general_iterations: usize,
    pub num_blocks_to_add_if_unsuccessful: usize,
    pub symmetric_design: bool,
    /// Words applied to the initial state, in order, before any search runs.
    /// Each word fills whatever entry `next_entry_to_be_filled` names at the
    /// time it's applied, same as `optimizer.py`'s `words_to_fill` loop.
    /// Empty (skipped) by default.
    pub pre_committed_words: Vec<String>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            min_word_length: MIN_WORD_LENGTH,
            max_num_words: 20_000,
            max_mcts_iterations: 1000,
            exploration_constant: None,
            max_general_iterations: 1,
            num_blocks_to_add_if_unsuccessful: 0,
            symmetric_design: false,
            pre_committed_words: Vec::new(),
        }
    }
}

/// Result of one `run`: whether the grid was fully filled, the grid as
/// actually left (partial on failure), the sequence of committed words with
/// their statistics tables, and — on failure — the unfilled entry's
/// description.
#[derive(Debug)]
pub struct SolverOutcome {
    pub solved: bool,
    pub grid: Array2<Cell>,
    pub committed: Vec<(String, StatsTable)>,
    pub unresolved_entry: Option<String>,
}

pub fn run(
    initial_grid: Array2<Cell>,
    raw_words: Vec<String>,
    config: &SolverConfig,
    mut rng: StdRng,
) -> Result<SolverOutcome, CrosswordError> {
    if config.max_mcts_iterations < 1 {
        return Err(CrosswordError::Configuration(
            "max_mcts_iterations must be at least 1".to_string(),
        ));
    }

    let mut current_grid = initial_grid;

    for iteration in 1..=config.max_general_iterations.max(1) {
        let (solved, result_grid, committed, unresolved_entry, used_rng) =
            fill_current_layout(current_grid.clone(), &raw_words, config, rng)?;
        rng = used_rng;

        if solved || iteration == config.max_general_iterations {
            return Ok(SolverOutcome { solved, grid: result_grid, committed, unresolved_entry });
        }

        current_grid = if config.num_blocks_to_add_if_unsuccessful > 0 {
            grid::add_random_blocks(
                &current_grid,
                config.num_blocks_to_add_if_unsuccessful,
                config.min_word_length,
                config.symmetric_design,
                &mut rng,
            )
        } else {
            current_grid
        };
    }

    unreachable!("max_general_iterations is clamped to at least 1")
}

fn fill_current_layout(
    layout: Array2<Cell>,
    raw_words: &[String],
    config: &SolverConfig,
    mut rng: StdRng,
) -> Result<(bool, Array2<Cell>, Vec<(String, StatsTable)>, Option<String>, StdRng), CrosswordError> {
    let entries = grid::analyze(&layout, config.min_word_length);

    let mut word_lengths: Vec<usize> = entries.iter().map(|e| e.length).collect();
    word_lengths.sort_unstable();
    word_lengths.dedup();

    let word_index = WordIndex::build(raw_words.iter().cloned(), &word_lengths, config.max_num_words, &mut rng);
    let num_entries = entries.len();
    let mut initial = state::initial_state(entries, &word_index);
    for word in &config.pre_committed_words {
        initial = initial.take_action(word)?;
    }

    if initial.is_terminal() {
        let solved = initial.next_entry_to_be_filled().is_none();
        let final_grid = apply_state_to_grid(&layout, &initial);
        let unresolved_entry = if solved { None } else { initial.next_entry_to_be_filled().map(|e| e.to_string()) };
        return Ok((solved, final_grid, vec![], unresolved_entry, rng));
    }

    let exploration = config.exploration_constant.unwrap_or(num_entries as f64);
    let mut engine = Mcts::new(initial, config.max_mcts_iterations, exploration, rng)?;

    let mut committed = Vec::new();
    while !engine.root_is_terminal() {
        engine.search()?;
        let (word, stats) = engine.commit_best_child()?;
        committed.push((word, stats));
    }

    let final_state = engine.root_state();
    let solved = final_state.next_entry_to_be_filled().is_none();
    let final_grid = apply_state_to_grid(&layout, &final_state);
    let unresolved_entry = if solved { None } else { final_state.next_entry_to_be_filled().map(|e| e.to_string()) };

    Ok((solved, final_grid, committed, unresolved_entry, engine.into_rng()))
}

/// Writes every filled entry's letters back onto a copy of the base grid.
/// Cells never covered by any entry (blocks, or runs below the minimum
/// length) are left untouched.
fn apply_state_to_grid(base: &Array2<Cell>, state: &CrosswordState) -> Array2<Cell> {
    let mut grid = base.clone();
    for entry in state.filled_entries() {
        for (position, &(row, col)) in entry.coordinates.iter().enumerate() {
            if let Slot::Letter(c) = entry.pattern[position] {
                grid[[row, col]] = Cell::Letter(c);
            }
        }
    }
    grid
}
