use std::collections::HashMap;

use ndarray::Array2;

use super::cell::Cell;
use super::entry::{Direction, Entry, Slot};

/// One bound of a 2-D slice through the grid, mirroring Python's `slice(a, b)`
/// and `slice(a, None)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceBound {
    Exact(usize, usize),
    From(usize),
}

/// Returns the (row-range, col-range) that an entry starting at `(row, col)`
/// sweeps through before hitting the grid edge, before blocks are accounted
/// for. Used by the analyzer to read off a candidate run.
pub fn get_slice(row: usize, col: usize, direction: Direction) -> (SliceBound, SliceBound) {
    match direction {
        Direction::Across => (SliceBound::Exact(row, row + 1), SliceBound::From(col)),
        Direction::Down => (SliceBound::From(row), SliceBound::Exact(col, col + 1)),
    }
}

/// Returns the `length` consecutive cells an entry occupies, starting at
/// `(row, col)` and proceeding in `direction`.
pub fn get_coordinates(
    row: usize,
    col: usize,
    direction: Direction,
    length: usize,
) -> Vec<(usize, usize)> {
    match direction {
        Direction::Across => (0..length).map(|k| (row, col + k)).collect(),
        Direction::Down => (0..length).map(|k| (row + k, col)).collect(),
    }
}

fn is_block(grid: &Array2<Cell>, row: usize, col: usize) -> bool {
    grid[[row, col]].is_block()
}

fn run_length(grid: &Array2<Cell>, row: usize, col: usize, direction: Direction) -> usize {
    let (nrows, ncols) = grid.dim();
    let mut length = 0;
    loop {
        let (r, c) = match direction {
            Direction::Across => (row, col + length),
            Direction::Down => (row + length, col),
        };
        if r >= nrows || c >= ncols || is_block(grid, r, c) {
            break;
        }
        length += 1;
    }
    length
}

/// Enumerates entries and their crossing dependencies for a fixed cell grid.
///
/// Entries are assigned `index` in row-major order, preferring an across
/// entry over a down entry when both start at the same cell. Runs shorter
/// than `min_word_length` are dropped entirely, not shortened.
pub fn analyze(grid: &Array2<Cell>, min_word_length: usize) -> Vec<Entry> {
    let (nrows, ncols) = grid.dim();
    let mut entries: Vec<Entry> = Vec::new();

    for row in 0..nrows {
        for col in 0..ncols {
            if is_block(grid, row, col) {
                continue;
            }

            let starts_across = col == 0 || is_block(grid, row, col - 1);
            let starts_down = row == 0 || is_block(grid, row - 1, col);

            for (starts, direction) in [
                (starts_across, Direction::Across),
                (starts_down, Direction::Down),
            ] {
                if !starts {
                    continue;
                }
                let length = run_length(grid, row, col, direction);
                if length < min_word_length {
                    continue;
                }
                let coordinates = get_coordinates(row, col, direction, length);
                let pattern = coordinates
                    .iter()
                    .map(|&(r, c)| match grid[[r, c]] {
                        Cell::Letter(ch) => Slot::Letter(ch),
                        _ => Slot::Empty,
                    })
                    .collect::<Vec<_>>();
                let num_letters_fixed = pattern.iter().filter(|s| s.is_fixed()).count();

                entries.push(Entry {
                    index: entries.len(),
                    direction,
                    length,
                    coordinates,
                    dependencies: vec![None; length],
                    pattern,
                    possible_words: vec![],
                    num_letters_fixed,
                    word_fixed: num_letters_fixed == length,
                });
            }
        }
    }

    attach_dependencies(&mut entries);
    entries
}

/// Summary statistics over a grid, mirroring `LayoutHandler.__init__`'s
/// `num_cells`/`num_blocks`/`share_of_blocks`/`word_start_grid` fields.
#[derive(Debug, Clone)]
pub struct GridSummary {
    pub num_cells: usize,
    pub num_blocks: usize,
    pub share_of_blocks: f64,
    /// For each cell, the indices of the entries (0, 1 or 2) covering it.
    pub word_start_grid: Vec<Vec<Vec<usize>>>,
}

/// Computes `GridSummary` for `grid`, given the entries `analyze` already
/// extracted from it.
pub fn summarize(grid: &Array2<Cell>, entries: &[Entry]) -> GridSummary {
    let (nrows, ncols) = grid.dim();
    let num_cells = nrows * ncols;
    let num_blocks = grid.iter().filter(|cell| cell.is_block()).count();
    let share_of_blocks = num_blocks as f64 / num_cells as f64;

    let mut word_start_grid = vec![vec![Vec::new(); ncols]; nrows];
    for entry in entries {
        for &(row, col) in &entry.coordinates {
            word_start_grid[row][col].push(entry.index);
        }
    }

    GridSummary { num_cells, num_blocks, share_of_blocks, word_start_grid }
}

fn attach_dependencies(entries: &mut [Entry]) {
    let mut at_position: HashMap<(usize, usize, Direction), (usize, usize)> = HashMap::new();
    for entry in entries.iter() {
        for (pos, &coord) in entry.coordinates.iter().enumerate() {
            at_position.insert((coord.0, coord.1, entry.direction), (entry.index, pos));
        }
    }

    let opposite = |d: Direction| match d {
        Direction::Across => Direction::Down,
        Direction::Down => Direction::Across,
    };

    for entry in entries.iter_mut() {
        let other_direction = opposite(entry.direction);
        for (pos, &coord) in entry.coordinates.iter().enumerate() {
            if let Some(&(other_index, other_pos)) =
                at_position.get(&(coord.0, coord.1, other_direction))
            {
                entry.dependencies[pos] = Some((other_index, other_pos));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_rows(rows: &[&str]) -> Array2<Cell> {
        let nrows = rows.len();
        let ncols = rows[0].chars().count();
        let mut grid = Array2::from_elem((nrows, ncols), Cell::Empty);
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                grid[[r, c]] = match ch {
                    '#' => Cell::Block,
                    '_' => Cell::Empty,
                    letter => Cell::Letter(letter),
                };
            }
        }
        grid
    }

    #[test]
    fn get_slice_across() {
        assert_eq!(
            get_slice(1, 2, Direction::Across),
            (SliceBound::Exact(1, 2), SliceBound::From(2))
        );
    }

    #[test]
    fn get_slice_down() {
        assert_eq!(
            get_slice(7, 8, Direction::Down),
            (SliceBound::From(7), SliceBound::Exact(8, 9))
        );
    }

    #[test]
    fn get_coordinates_across() {
        assert_eq!(
            get_coordinates(5, 6, Direction::Across, 2),
            vec![(5, 6), (5, 7)]
        );
    }

    #[test]
    fn get_coordinates_down() {
        assert_eq!(
            get_coordinates(7, 8, Direction::Down, 3),
            vec![(7, 8), (8, 8), (9, 8)]
        );
    }

    #[test]
    fn drops_runs_below_minimum() {
        // A 1x2 run is too short to count as an entry.
        let grid = grid_from_rows(&["__#", "___"]);
        let entries = analyze(&grid, 3);
        // Row 0 has a 2-cell across run before the block: dropped.
        // Row 1 has a 3-cell across run: kept. Down runs are all length 2: dropped.
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].direction, Direction::Across);
        assert_eq!(entries[0].length, 3);
    }

    #[test]
    fn exact_minimum_length_kept() {
        let grid = grid_from_rows(&["___"]);
        let entries = analyze(&grid, 3);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].length, 3);
    }

    #[test]
    fn all_blocks_yields_no_entries() {
        let grid = grid_from_rows(&["###", "###"]);
        let entries = analyze(&grid, 3);
        assert!(entries.is_empty());
    }

    #[test]
    fn dependencies_are_symmetric() {
        let grid = grid_from_rows(&["___", "___", "___"]);
        let entries = analyze(&grid, 3);
        for entry in &entries {
            for (pos, dep) in entry.dependencies.iter().enumerate() {
                if let Some((other_index, other_pos)) = dep {
                    let other = &entries[*other_index];
                    assert_eq!(other.coordinates[*other_pos], entry.coordinates[pos]);
                    assert_eq!(
                        other.dependencies[*other_pos],
                        Some((entry.index, pos))
                    );
                }
            }
        }
    }

    #[test]
    fn summarize_counts_blocks_and_share() {
        let grid = grid_from_rows(&["_#_", "___"]);
        let entries = analyze(&grid, 2);
        let summary = summarize(&grid, &entries);
        assert_eq!(summary.num_cells, 6);
        assert_eq!(summary.num_blocks, 1);
        assert!((summary.share_of_blocks - 1.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn summarize_word_start_grid_lists_covering_entries() {
        let grid = grid_from_rows(&["___", "___"]);
        let entries = analyze(&grid, 2);
        let summary = summarize(&grid, &entries);
        // Cell (0, 0) is covered by one across entry and one down entry.
        assert_eq!(summary.word_start_grid[0][0].len(), 2);
    }

    #[test]
    fn preserves_prefilled_letters() {
        let grid = grid_from_rows(&["A__"]);
        let entries = analyze(&grid, 3);
        assert_eq!(entries[0].pattern[0], Slot::Letter('A'));
        assert_eq!(entries[0].num_letters_fixed, 1);
        assert!(!entries[0].word_fixed);
    }
}
