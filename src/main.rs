use std::process;

use chrono::Utc;
use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crossword_mcts::cli::Args;
use crossword_mcts::grid::{self, MIN_WORD_LENGTH};
use crossword_mcts::io;
use crossword_mcts::logging;
use crossword_mcts::solver::{self, SolverConfig};

fn main() {
    logging::init_logger(false);
    let args = Args::parse();

    if let Err(err) = run(args) {
        error!("{}", err);
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> crossword_mcts::Result<()> {
    let rng = StdRng::seed_from_u64(args.random_seed);

    let layout = match &args.path_to_layout {
        Some(path) => {
            info!("reading layout from {}", path.display());
            io::read_layout_csv(path)?
        }
        None => {
            let (rows, cols) = match (args.num_rows, args.num_cols) {
                (Some(rows), Some(cols)) => (rows, cols),
                _ => {
                    return Err(crossword_mcts::CrosswordError::Configuration(
                        "num_rows and num_cols are required when path_to_layout is absent".to_string(),
                    ))
                }
            };
            info!("synthesizing a blank {}x{} layout", rows, cols);
            grid::synthesize_blank(rows, cols)
        }
    };

    let summary_entries = grid::analyze(&layout, MIN_WORD_LENGTH);
    let summary = grid::summarize(&layout, &summary_entries);
    info!(
        "layout: {} cells ({} blocks, {:.1}% blocks), {} entries",
        summary.num_cells,
        summary.num_blocks,
        summary.share_of_blocks * 100.0,
        summary_entries.len()
    );

    let raw_words = match &args.path_to_words {
        Some(pattern) => {
            info!("reading words from glob {}", pattern);
            io::read_words_glob(pattern)?
        }
        None => {
            info!("no path_to_words given, using bundled fallback dictionary");
            io::fallback_dictionary()
        }
    };

    let config = SolverConfig {
        min_word_length: MIN_WORD_LENGTH,
        max_num_words: args.max_num_words,
        max_mcts_iterations: args.max_mcts_iterations,
        exploration_constant: None,
        max_general_iterations: 1,
        num_blocks_to_add_if_unsuccessful: 0,
        symmetric_design: false,
        pre_committed_words: Vec::new(),
    };

    let outcome = solver::run(layout, raw_words, &config, rng)?;

    println!("{}", grid::render(&outcome.grid));
    if outcome.solved {
        let final_entries = grid::analyze(&outcome.grid, MIN_WORD_LENGTH);
        let final_summary = grid::summarize(&outcome.grid, &final_entries);
        println!(
            "solved, found solution with {}/{} = {:.1}% blocks",
            final_summary.num_blocks,
            final_summary.num_cells,
            final_summary.share_of_blocks * 100.0
        );
    } else {
        println!(
            "unsolved: {}",
            outcome.unresolved_entry.as_deref().unwrap_or("<unknown entry>")
        );
    }

    if let Some(output_path) = &args.output_path {
        let written = io::write_run(output_path, &outcome.grid, &outcome.committed, Utc::now())?;
        for path in written {
            info!("wrote {}", path.display());
        }
    }

    Ok(())
}
