use std::collections::BTreeMap;

/// Per-action row of the statistics table printed/written after each commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionStats {
    pub visits: u64,
    pub reward: usize,
    pub options: usize,
}

/// Keyed by action (the candidate word), in ascending alphabetical order so
/// the table is stable across runs.
pub type StatsTable = BTreeMap<String, ActionStats>;
