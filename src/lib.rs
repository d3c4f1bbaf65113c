pub mod config;
pub mod harness;
pub mod loader;
pub mod report;
pub mod search;
pub mod sort;
pub mod storage;

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhonebookError {
    /// The directory or query file does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Derived IO error
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),

    /// A directory line without a name after the phone token
    #[error("Malformed record on line {line}: {content:?}")]
    MalformedRecord { line: usize, content: String },

    /// Bubble sort ran out of its time budget
    #[error("Sorting took longer than the allowed {budget:?}")]
    PreparationTimedOut { budget: Duration },

    /// Could not save the sorted directory
    #[error("Problem saving sorted directory to {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PhonebookError>;
