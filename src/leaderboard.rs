//! Persisted list of final scores.
//!
//! The backing file is a bare JSON array of integers, e.g. `[120, 80, 150]`.
//! Entries are kept as `i64` so values written by other programs survive.
//! Reads never fail: a missing file is an empty list and a malformed one is
//! logged and treated as empty. There is no locking, so two processes writing
//! the same file race and the last writer wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("failed to write scores to '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode scores: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Why a read produced no data. Both cases degrade to an empty list.
#[derive(Debug, Error)]
enum ReadError {
    #[error("score file not found")]
    Absent,
    #[error("score file unreadable: {0}")]
    Unreadable(io::Error),
    #[error("score file malformed: {0}")]
    Malformed(serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<i64>, ReadError> {
        let data = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ReadError::Absent,
            _ => ReadError::Unreadable(e),
        })?;
        serde_json::from_str(&data).map_err(ReadError::Malformed)
    }

    /// All stored scores in file order. Any read failure yields an empty list.
    #[must_use]
    pub fn load(&self) -> Vec<i64> {
        match self.read() {
            Ok(scores) => scores,
            Err(ReadError::Absent) => {
                log::debug!("no score file at {}", self.path.display());
                Vec::new()
            }
            Err(e) => {
                log::warn!("ignoring {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    /// Append one score and rewrite the whole file.
    pub fn append_score(&self, value: u32) -> Result<(), ScoreStoreError> {
        let mut scores = self.load();
        scores.push(i64::from(value));
        let json = serde_json::to_string(&scores)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| ScoreStoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, json).map_err(|source| ScoreStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::info!(
            "recorded score {value} ({} total) in {}",
            scores.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Highest `n` scores, descending. Equal scores keep their stored order.
    #[must_use]
    pub fn top_scores(&self, n: usize) -> Vec<i64> {
        let mut scores = self.load();
        scores.sort_by(|a, b| b.cmp(a));
        scores.truncate(n);
        scores
    }
}
