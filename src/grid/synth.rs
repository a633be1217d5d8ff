use log::{debug, info};
use ndarray::Array2;
use rand::Rng;

use super::cell::Cell;

/// Builds a blank `rows x cols` layout with no blocks, for runs started from
/// `--num_rows`/`--num_cols` instead of an existing layout file.
pub fn synthesize_blank(rows: usize, cols: usize) -> Array2<Cell> {
    Array2::from_elem((rows, cols), Cell::Empty)
}

fn run_length_between(grid: &Array2<Cell>, row: usize, col: usize, row_step: isize, col_step: isize) -> usize {
    let (nrows, ncols) = grid.dim();
    let mut length = 0;
    let mut r = row as isize + row_step;
    let mut c = col as isize + col_step;
    while r >= 0 && c >= 0 && (r as usize) < nrows && (c as usize) < ncols {
        if grid[[r as usize, c as usize]].is_block() {
            break;
        }
        length += 1;
        r += row_step;
        c += col_step;
    }
    length
}

/// A block placed at `(row, col)` is rejected if it would strand a neighbour
/// run with between 1 and `min_word_length - 1` open cells.
fn block_would_strand_a_run(grid: &Array2<Cell>, row: usize, col: usize, min_word_length: usize) -> bool {
    const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    NEIGHBOURS.iter().any(|&(dr, dc)| {
        let run = run_length_between(grid, row, col, dr, dc);
        (1..min_word_length).contains(&run)
    })
}

/// Adds up to `num_blocks` randomly placed blocks to `grid`, skipping any
/// placement that would leave a crossing run shorter than `min_word_length`.
/// When `symmetric` is set, every placed block is mirrored through the
/// grid's center, counting as two of the `num_blocks` budget.
pub fn add_random_blocks(
    grid: &Array2<Cell>,
    num_blocks: usize,
    min_word_length: usize,
    symmetric: bool,
    rng: &mut impl Rng,
) -> Array2<Cell> {
    let mut grid = grid.clone();
    let (nrows, ncols) = grid.dim();
    let mut blocks_filled = 0usize;

    while blocks_filled < num_blocks {
        let mut candidates: Vec<(usize, usize)> = Vec::new();
        for row in 0..nrows {
            for col in 0..ncols {
                if grid[[row, col]].is_block() {
                    continue;
                }
                if !block_would_strand_a_run(&grid, row, col, min_word_length) {
                    candidates.push((row, col));
                }
            }
        }

        if candidates.is_empty() {
            info!("Unable to add next block to current layout.");
            break;
        }

        let (row, col) = candidates[rng.gen_range(0, candidates.len())];
        debug!("Placing block at ({}, {})", row, col);
        grid[[row, col]] = Cell::Block;
        blocks_filled += 1;

        if symmetric {
            let (mirror_row, mirror_col) = (nrows - 1 - row, ncols - 1 - col);
            grid[[mirror_row, mirror_col]] = Cell::Block;
            blocks_filled += 1;
        }
    }

    grid
}
