use std::{path::PathBuf, time::Duration};

use collections::MatchPolicy;

pub const DEFAULT_DIRECTORY: &str = "directory.txt";
pub const DEFAULT_FIND: &str = "find.txt";
pub const DEFAULT_SNAPSHOT: &str = "sorted_directory.txt";

/// The bubble sort budget is this many times the last linear search
pub const CALIBRATION_FACTOR: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory file, one `<phone> <name>` per line
    pub directory: PathBuf,
    /// Names to look up, one per line
    pub find: PathBuf,
    /// Where a completed sort saves the directory, `None` disables saving
    pub snapshot: Option<PathBuf>,
    pub factor: u32,
    /// Bubble sort budget until a linear run calibrates it
    pub initial_budget: Duration,
    pub policy: MatchPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: DEFAULT_DIRECTORY.into(),
            find: DEFAULT_FIND.into(),
            snapshot: Some(DEFAULT_SNAPSHOT.into()),
            factor: CALIBRATION_FACTOR,
            initial_budget: Duration::ZERO,
            policy: MatchPolicy::RawKey,
        }
    }
}
