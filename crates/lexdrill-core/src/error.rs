//! Drill error types.
//!
//! A missing or corrupt progress store is not an error: it is replaced by
//! defaults and reported through [`crate::store::ProgressSource::Recovered`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while running the scheduling core.
#[derive(Debug, Error)]
pub enum DrillError {
    /// There are no vocabulary items to select from.
    #[error("vocabulary list is empty, nothing to drill")]
    EmptyCorpus,

    /// Fewer progress records than items to select from.
    #[error("progress set has {records} records for {items} items")]
    MissingRecords { items: usize, records: usize },

    /// The weighted sampler rejected the current weights.
    #[error("invalid item weights: {0}")]
    InvalidWeights(String),

    /// The progress store could not be written.
    #[error("failed to save progress to {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The progress set could not be serialized.
    #[error("failed to serialize progress: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DrillError {
    /// Returns `true` if the session can not start or continue at all.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DrillError::EmptyCorpus
                | DrillError::MissingRecords { .. }
                | DrillError::InvalidWeights(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DrillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_error_mentions_path() {
        let err = DrillError::Persistence {
            path: PathBuf::from("progress/hsk1-progress.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("hsk1-progress.json"), "got {msg}");
        assert!(msg.contains("denied"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn empty_corpus_is_fatal() {
        assert!(DrillError::EmptyCorpus.is_fatal());
        let missing = DrillError::MissingRecords {
            items: 3,
            records: 1,
        };
        assert!(missing.is_fatal());
        assert_eq!(missing.to_string(), "progress set has 1 records for 3 items");
    }
}
