//! Writes a solved/unsolved run's grid and per-step statistics to disk as
//! timestamped CSVs, in both comma- and semicolon-separated variants.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ndarray::Array2;

use crate::error::CrosswordError;
use crate::grid::{rows_as_strings, Cell};
use crate::mcts::StatsTable;

const VARIANTS: [(u8, &str); 2] = [(b',', "csv"), (b';', "ssv")];

/// Writes `grid_<timestamp>.<ext>` and `stats_<timestamp>.<ext>` into
/// `output_dir` for both separator variants, creating the directory if it
/// does not already exist. `committed` is the full per-step history of the
/// run (one entry per committed word, in commit order), mirroring
/// `optimizer.py`'s `history_statistics_df`: the stats CSV gets one row per
/// step, not just the final move.
pub fn write_run(
    output_dir: impl AsRef<Path>,
    grid: &Array2<Cell>,
    committed: &[(String, StatsTable)],
    timestamp: DateTime<Utc>,
) -> Result<Vec<PathBuf>, CrosswordError> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)
        .map_err(|e| CrosswordError::Io(format!("could not create {}: {}", output_dir.display(), e)))?;

    let stamp = timestamp.format("%Y%m%dT%H%M%SZ");
    let mut written = Vec::new();

    for (separator, ext) in VARIANTS {
        let grid_path = output_dir.join(format!("grid_{}.{}", stamp, ext));
        write_grid_csv(&grid_path, grid, separator)?;
        written.push(grid_path);

        let stats_path = output_dir.join(format!("stats_{}.{}", stamp, ext));
        write_stats_csv(&stats_path, committed, separator)?;
        written.push(stats_path);
    }

    Ok(written)
}

fn write_grid_csv(path: &Path, grid: &Array2<Cell>, separator: u8) -> Result<(), CrosswordError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(separator)
        .from_path(path)
        .map_err(|e| CrosswordError::Io(format!("could not open {}: {}", path.display(), e)))?;

    for row in rows_as_strings(grid) {
        writer
            .write_record(&row)
            .map_err(|e| CrosswordError::Io(format!("could not write row to {}: {}", path.display(), e)))?;
    }
    writer
        .flush()
        .map_err(|e| CrosswordError::Io(format!("could not flush {}: {}", path.display(), e)))?;
    Ok(())
}

/// One row per committed step: the word chosen, and the candidate-table
/// entry that word had just before it was committed (its visits/reward/
/// options at commit time).
fn write_stats_csv(
    path: &Path,
    committed: &[(String, StatsTable)],
    separator: u8,
) -> Result<(), CrosswordError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(separator)
        .from_path(path)
        .map_err(|e| CrosswordError::Io(format!("could not open {}: {}", path.display(), e)))?;

    writer
        .write_record(["step", "word", "visits", "reward", "options"])
        .map_err(|e| CrosswordError::Io(format!("could not write header to {}: {}", path.display(), e)))?;
    for (step, (word, stats)) in committed.iter().enumerate() {
        let chosen = stats.get(word);
        writer
            .write_record(&[
                step.to_string(),
                word.clone(),
                chosen.map(|s| s.visits).unwrap_or(0).to_string(),
                chosen.map(|s| s.reward).unwrap_or(0).to_string(),
                chosen.map(|s| s.options).unwrap_or(0).to_string(),
            ])
            .map_err(|e| CrosswordError::Io(format!("could not write row to {}: {}", path.display(), e)))?;
    }
    writer
        .flush()
        .map_err(|e| CrosswordError::Io(format!("could not flush {}: {}", path.display(), e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcts::ActionStats;
    use chrono::TimeZone;

    #[test]
    fn writes_four_files() {
        let dir = std::env::temp_dir().join(format!("crossword_mcts_output_{}", std::process::id()));
        let grid = Array2::from_elem((2, 2), Cell::Empty);
        let mut stats = StatsTable::new();
        stats.insert(
            "CAT".to_string(),
            ActionStats { visits: 3, reward: 2, options: 1 },
        );
        let committed = vec![("CAT".to_string(), stats)];
        let timestamp = Utc.ymd(2024, 1, 2).and_hms(3, 4, 5);

        let written = write_run(&dir, &grid, &committed, timestamp).unwrap();
        assert_eq!(written.len(), 4);
        for path in &written {
            assert!(path.exists());
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn stats_csv_has_one_row_per_committed_step() {
        let dir = std::env::temp_dir().join(format!("crossword_mcts_output_history_{}", std::process::id()));
        let grid = Array2::from_elem((1, 3), Cell::Empty);

        let mut stats_a = StatsTable::new();
        stats_a.insert("CAT".to_string(), ActionStats { visits: 5, reward: 1, options: 2 });
        let mut stats_b = StatsTable::new();
        stats_b.insert("DOG".to_string(), ActionStats { visits: 4, reward: 2, options: 1 });
        let committed = vec![("CAT".to_string(), stats_a), ("DOG".to_string(), stats_b)];

        let timestamp = Utc.ymd(2024, 1, 2).and_hms(3, 4, 5);
        let written = write_run(&dir, &grid, &committed, timestamp).unwrap();
        let stats_csv_path = written.iter().find(|p| p.to_string_lossy().contains("stats_") && p.extension().unwrap() == "csv").unwrap();
        let contents = std::fs::read_to_string(stats_csv_path).unwrap();
        assert_eq!(contents.lines().count(), 3); // header + 2 steps
        assert!(contents.contains("CAT"));
        assert!(contents.contains("DOG"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
