//! Resolves a glob pattern to a unioned list of candidate words, read from
//! the `answer` column of each matched CSV file.

use std::path::Path;

use log::info;

use crate::error::CrosswordError;

const SEPARATOR_CANDIDATES: [u8; 3] = [b',', b';', b'\t'];

/// Globs `pattern`, drops any path containing `special`, reads the `answer`
/// column of every remaining file (autodetecting the separator) and unions
/// the values. Fails if the glob matches nothing.
pub fn read_words_glob(pattern: &str) -> Result<Vec<String>, CrosswordError> {
    let paths: Vec<_> = glob::glob(pattern)
        .map_err(|e| CrosswordError::Io(format!("invalid glob pattern {}: {}", pattern, e)))?
        .filter_map(Result::ok)
        .filter(|p| !p.to_string_lossy().contains("special"))
        .collect();

    if paths.is_empty() {
        return Err(CrosswordError::Io(format!(
            "glob pattern {} matched no word-list files",
            pattern
        )));
    }

    let mut words = Vec::new();
    for path in &paths {
        words.extend(read_answer_column(path)?);
    }
    info!("loaded {} words from {} file(s)", words.len(), paths.len());
    Ok(words)
}

fn read_answer_column(path: &Path) -> Result<Vec<String>, CrosswordError> {
    for separator in SEPARATOR_CANDIDATES {
        if let Some(words) = try_read_with_separator(path, separator)? {
            return Ok(words);
        }
    }
    Err(CrosswordError::Io(format!(
        "no `answer` column found in {} with any of the supported separators",
        path.display()
    )))
}

fn try_read_with_separator(path: &Path, separator: u8) -> Result<Option<Vec<String>>, CrosswordError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(separator)
        .from_path(path)
        .map_err(|e| CrosswordError::Io(format!("failed to open {}: {}", path.display(), e)))?;

    let headers = reader
        .headers()
        .map_err(|e| CrosswordError::Io(format!("failed to read headers of {}: {}", path.display(), e)))?
        .clone();
    let answer_index = match headers.iter().position(|h| h == "answer") {
        Some(i) => i,
        None => return Ok(None),
    };

    let mut words = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| CrosswordError::Io(format!("bad row in {}: {}", path.display(), e)))?;
        if let Some(value) = record.get(answer_index) {
            words.push(value.to_string());
        }
    }
    Ok(Some(words))
}
