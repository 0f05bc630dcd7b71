use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that make a whole dataset unusable.
///
/// Per-row problems never surface here; they are recovered where the row is
/// decoded (see `table::io`).
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Cannot open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset {path} is missing required column(s): {columns}")]
    MissingColumns { path: PathBuf, columns: String },
}
