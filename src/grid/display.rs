use ndarray::Array2;

use super::cell::Cell;

/// Renders a grid as a newline-separated block of text, one character per
/// cell, in the teacher's `CrosswordGrid::to_string` style.
pub fn render(grid: &Array2<Cell>) -> String {
    let (nrows, ncols) = grid.dim();
    let mut out = String::with_capacity(nrows * (ncols + 1));
    for row in 0..nrows {
        for col in 0..ncols {
            out.push_str(&grid[[row, col]].to_string());
        }
        out.push('\n');
    }
    out
}

/// Renders the grid as rows of strings suitable for writing out as a CSV
/// table (one cell per column).
pub fn rows_as_strings(grid: &Array2<Cell>) -> Vec<Vec<String>> {
    let (nrows, ncols) = grid.dim();
    (0..nrows)
        .map(|row| (0..ncols).map(|col| grid[[row, col]].to_string()).collect())
        .collect()
}
