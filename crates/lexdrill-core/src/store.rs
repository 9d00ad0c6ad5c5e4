//! Progress store: merging stored history into the current vocabulary list
//! and persisting it back to disk as JSON.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{DrillError, Result};
use crate::model::{ProgressRecord, VocabularyItem};

/// Where the records of a [`LoadedProgress`] came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressSource {
    /// No store existed; every record is new.
    Fresh,
    /// A store was merged; `matched` items kept their history.
    Restored { matched: usize },
    /// The store could not be read and was ignored.
    Recovered { reason: String },
}

/// A progress set aligned with a vocabulary list.
#[derive(Debug, Clone)]
pub struct LoadedProgress {
    pub records: Vec<ProgressRecord>,
    pub source: ProgressSource,
}

/// Build a progress set index-aligned with `items`.
///
/// Items with a prior record adopt it unchanged, the rest start from
/// [`ProgressRecord::new`]. Prior records for words no longer in `items` are
/// dropped. If `prior` holds a word more than once, the last entry wins.
pub fn merge_progress(items: &[VocabularyItem], prior: Option<Vec<ProgressRecord>>) -> Vec<ProgressRecord> {
    let Some(prior) = prior else {
        return items.iter().map(|i| ProgressRecord::new(i.word())).collect();
    };

    let by_word: HashMap<String, ProgressRecord> =
        prior.into_iter().map(|r| (r.word.clone(), r)).collect();

    items
        .iter()
        .map(|item| match by_word.get(item.word()) {
            Some(record) => record.clone(),
            None => ProgressRecord::new(item.word()),
        })
        .collect()
}

/// Parse a stored progress file.
///
/// The document must be a JSON array. Entries that are not valid records are
/// skipped with a warning so one bad entry does not cost the whole history.
pub fn parse_progress(content: &str) -> std::result::Result<Vec<ProgressRecord>, serde_json::Error> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(content)?;
    let mut records = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<ProgressRecord>(entry) {
            Ok(record) if record.is_consistent() => records.push(record),
            Ok(record) => {
                tracing::warn!("discarding inconsistent progress entry #{i} for '{}'", record.word);
            }
            Err(e) => {
                tracing::warn!("discarding unreadable progress entry #{i}: {e}");
            }
        }
    }
    Ok(records)
}

/// A JSON progress file for one vocabulary list.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored records, if any.
    ///
    /// `Ok(None)` means there is no store yet; `Err` carries a description of
    /// why an existing store could not be used.
    pub fn read(&self) -> std::result::Result<Option<Vec<ProgressRecord>>, String> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| format!("failed to read {}: {e}", self.path.display()))?;
        parse_progress(&content)
            .map(Some)
            .map_err(|e| format!("failed to parse {}: {e}", self.path.display()))
    }

    /// Load the store and merge it with `items`.
    ///
    /// Never fails: an unreadable store is reported as
    /// [`ProgressSource::Recovered`] and replaced by defaults.
    pub fn load(&self, items: &[VocabularyItem]) -> LoadedProgress {
        match self.read() {
            Ok(None) => {
                tracing::info!("no progress at {}, starting fresh", self.path.display());
                LoadedProgress {
                    records: merge_progress(items, None),
                    source: ProgressSource::Fresh,
                }
            }
            Ok(Some(prior)) => {
                let known: std::collections::HashSet<&str> =
                    prior.iter().map(|r| r.word.as_str()).collect();
                let matched = items.iter().filter(|i| known.contains(i.word())).count();
                tracing::info!(
                    "restored progress for {matched}/{} words from {}",
                    items.len(),
                    self.path.display()
                );
                LoadedProgress {
                    records: merge_progress(items, Some(prior)),
                    source: ProgressSource::Restored { matched },
                }
            }
            Err(reason) => {
                tracing::warn!("{reason}; starting fresh");
                LoadedProgress {
                    records: merge_progress(items, None),
                    source: ProgressSource::Recovered { reason },
                }
            }
        }
    }

    /// Overwrite the store with `records`.
    ///
    /// The file is written next to its final location and renamed into place.
    pub fn save(&self, records: &[ProgressRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        let persistence = |source| DrillError::Persistence {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(persistence)?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(persistence)?;
        tmp.write_all(json.as_bytes()).map_err(persistence)?;
        tmp.write_all(b"\n").map_err(persistence)?;
        tmp.persist(&self.path).map_err(|e| persistence(e.error))?;

        tracing::info!("saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Delete the store. Returns `false` if there was nothing to delete.
    pub fn remove(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(DrillError::Persistence {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
