//! Command-line surface: one entry point wiring the grid/word sources, the
//! solver, and the output writer together.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "crossword_mcts", about = "Fill a crossword grid with a constraint-guided MCTS solver")]
pub struct Args {
    /// Path to a layout CSV. When absent, a blank grid of `num_rows` x
    /// `num_cols` is synthesized instead.
    #[arg(long = "path_to_layout")]
    pub path_to_layout: Option<PathBuf>,

    /// Rows of the synthesized blank grid. Required when `path_to_layout`
    /// is absent.
    #[arg(long = "num_rows")]
    pub num_rows: Option<usize>,

    /// Columns of the synthesized blank grid. Required when
    /// `path_to_layout` is absent.
    #[arg(long = "num_cols")]
    pub num_cols: Option<usize>,

    /// Glob pattern resolving to word-list CSVs. When absent, the bundled
    /// fallback dictionary is used.
    #[arg(long = "path_to_words")]
    pub path_to_words: Option<String>,

    /// Maximum number of candidate words to retain per run.
    #[arg(long = "max_num_words", default_value_t = 20_000)]
    pub max_num_words: usize,

    /// MCTS search iterations spent per committed move.
    #[arg(long = "max_mcts_iterations", default_value_t = 500)]
    pub max_mcts_iterations: usize,

    /// Seed for the run's single shared RNG.
    #[arg(long = "random_seed", default_value_t = 0)]
    pub random_seed: u64,

    /// Directory to write the final grid and statistics CSVs into. Created
    /// if it doesn't already exist.
    #[arg(long = "output_path")]
    pub output_path: Option<PathBuf>,
}
