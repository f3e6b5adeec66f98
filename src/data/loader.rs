//! Reading the data file into a snapshot.
//!
//! # Responsibilities
//! - Read the whole file into memory
//! - Require a top-level JSON array
//! - Keep every element as its original encoded bytes, in file order
//!
//! # Design Decisions
//! - No default content is ever synthesized; failures are returned as-is
//! - Empty arrays are not an error here; rejecting them is the
//!   coordinator's job

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::value::RawValue;

use crate::data::element::{Element, Snapshot};
use crate::data::error::DataError;

/// Source of dataset generations.
pub trait Loader: Send + Sync + 'static {
    fn load(&self) -> Result<Snapshot, DataError>;
}

/// Loads the dataset from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Loader for FileLoader {
    fn load(&self) -> Result<Snapshot, DataError> {
        load_elements(&self.path)
    }
}

/// Load a JSON file that contains an array of elements.
pub fn load_elements(path: &Path) -> Result<Snapshot, DataError> {
    let content = fs::read(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: Vec<Box<RawValue>> =
        serde_json::from_slice(&content).map_err(|source| DataError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(raw.iter().map(|value| Element::from_raw(value)).collect::<Vec<_>>().into())
}
