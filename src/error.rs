use thiserror::Error;

/// Errors surfaced by the crossword solver and its IO collaborators.
///
/// `UnsolvedRun` is deliberately absent: failing to fill the grid is a normal
/// outcome of the search, not an error, and is reported via the driver's
/// return value instead (see `solver::SolverOutcome`).
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CrosswordError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("invalid solver state: {0}")]
    InvalidState(String),
}

pub type Result<T> = std::result::Result<T, CrosswordError>;
