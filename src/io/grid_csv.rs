//! Reads a rectangular grid layout from a CSV file.

use std::path::Path;

use ndarray::Array2;

use crate::error::CrosswordError;
use crate::grid::Cell;

/// First row and first column are header/index and are ignored for cell
/// content. Empty string ⇒ `Block`. `_` ⇒ `Empty`. A single uppercase
/// letter ⇒ a pre-filled `Letter`. Anything else ⇒ `Empty`.
pub fn read_layout_csv(path: impl AsRef<Path>) -> Result<Array2<Cell>, CrosswordError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| CrosswordError::Io(format!("failed to open layout CSV {}: {}", path.display(), e)))?;

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (row_index, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| CrosswordError::Io(format!("bad row in layout CSV {}: {}", path.display(), e)))?;
        if row_index == 0 {
            continue;
        }
        let mut row = Vec::with_capacity(record.len());
        for (col_index, field) in record.iter().enumerate() {
            if col_index == 0 {
                continue;
            }
            row.push(parse_cell(field));
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(CrosswordError::Io(format!(
            "layout CSV {} contained no data rows",
            path.display()
        )));
    }
    let ncols = rows[0].len();
    if rows.iter().any(|r| r.len() != ncols) {
        return Err(CrosswordError::Io(format!(
            "layout CSV {} has rows of inconsistent width",
            path.display()
        )));
    }

    let nrows = rows.len();
    let flat: Vec<Cell> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|e| CrosswordError::Io(format!("could not assemble layout grid: {}", e)))
}

fn parse_cell(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        Cell::Block
    } else if trimmed == "_" {
        Cell::Empty
    } else {
        let upper = trimmed.to_uppercase();
        let mut chars = upper.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => Cell::Letter(c),
            _ => Cell::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile_like::TempCsv {
        tempfile_like::TempCsv::new(contents)
    }

    // Minimal self-contained temp-file helper: avoids adding a dev-dependency
    // purely for a handful of CSV round-trip tests.
    mod tempfile_like {
        use std::fs;
        use std::path::PathBuf;

        pub struct TempCsv {
            pub path: PathBuf,
        }

        impl TempCsv {
            pub fn new(contents: &str) -> Self {
                let mut path = std::env::temp_dir();
                path.push(format!("crossword_mcts_test_{}.csv", std::process::id()));
                fs::write(&path, contents).unwrap();
                TempCsv { path }
            }
        }

        impl Drop for TempCsv {
            fn drop(&mut self) {
                let _ = fs::remove_file(&self.path);
            }
        }
    }

    #[test]
    fn parses_blocks_letters_and_empties() {
        let temp = write_temp(",0,1,2\n0,_,_,A\n1,#,_,_\n");
        let grid = read_layout_csv(&temp.path).unwrap();
        assert_eq!(grid.dim(), (2, 3));
        assert_eq!(grid[[0, 0]], Cell::Empty);
        assert_eq!(grid[[0, 2]], Cell::Letter('A'));
    }

    #[test]
    fn empty_field_is_block() {
        let mut file = std::fs::File::create(std::env::temp_dir().join("crossword_mcts_block_test.csv")).unwrap();
        writeln!(file, ",0,1").unwrap();
        writeln!(file, "0,,_").unwrap();
        drop(file);
        let path = std::env::temp_dir().join("crossword_mcts_block_test.csv");
        let grid = read_layout_csv(&path).unwrap();
        assert_eq!(grid[[0, 0]], Cell::Block);
        assert_eq!(grid[[0, 1]], Cell::Empty);
        let _ = std::fs::remove_file(&path);
    }
}
