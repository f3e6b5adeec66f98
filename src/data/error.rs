//! Errors raised while loading or publishing a dataset.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or reloading the data file.
#[derive(Debug, Error)]
pub enum DataError {
    /// The data file could not be opened or read.
    #[error("read data {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON, or its top-level value is not an array.
    #[error("unmarshal data {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed as an array but holds no elements.
    #[error("no elements available")]
    Empty,

    /// The reload task died before it could report back.
    #[error("reload task failed: {0}")]
    Interrupted(String),
}
