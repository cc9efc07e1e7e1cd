//! Loaded-file records and batch parsing.
//!
//! Files are independent, so a batch is parsed in parallel. A file that
//! fails is reported in [`BatchResult::errors`] and never aborts the batch.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::parsers::{parse_with, ParseError, SeriesStore};

/// A parsed log file
#[derive(Clone, Debug)]
pub struct LoadedFile {
    /// Path the file was read from
    pub path: PathBuf,
    /// Parsed series and metadata
    pub store: SeriesStore,
}

impl LoadedFile {
    /// Attach the caller-supplied display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.store.set_display_name(name);
        self
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Outcome of a batch: successes and failures, each in input order
#[derive(Debug, Default)]
pub struct BatchResult {
    pub files: Vec<LoadedFile>,
    pub errors: Vec<(PathBuf, LoadError)>,
}

impl BatchResult {
    fn collect(results: Vec<(PathBuf, Result<SeriesStore, LoadError>)>) -> Self {
        let mut batch = Self::default();
        for (path, result) in results {
            match result {
                Ok(store) => batch.files.push(LoadedFile { path, store }),
                Err(e) => {
                    tracing::warn!("{}: {}", path.display(), e);
                    batch.errors.push((path, e));
                }
            }
        }
        tracing::info!(
            "Batch finished: {} parsed, {} failed",
            batch.files.len(),
            batch.errors.len()
        );
        batch
    }
}

/// Parse already-read `(path, contents)` pairs in parallel
pub fn parse_batch(inputs: &[(PathBuf, String)], config: &EngineConfig) -> BatchResult {
    let results = inputs
        .par_iter()
        .map(|(path, contents)| {
            let result = parse_with(&path.to_string_lossy(), contents, config)
                .map_err(LoadError::from);
            (path.clone(), result)
        })
        .collect();
    BatchResult::collect(results)
}

/// Read a log file. Invalid UTF-8 is replaced, not rejected.
pub fn read_log(path: &Path) -> Result<String, std::io::Error> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read and parse files from disk in parallel
pub fn load_files(paths: &[PathBuf], config: &EngineConfig) -> BatchResult {
    let results = paths
        .par_iter()
        .map(|path| {
            let result = read_log(path).map_err(LoadError::from).and_then(|contents| {
                parse_with(&path.to_string_lossy(), &contents, config).map_err(LoadError::from)
            });
            (path.clone(), result)
        })
        .collect();
    BatchResult::collect(results)
}
