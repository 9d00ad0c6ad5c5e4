//! Choosing the next item to present.

use std::fmt;
use std::str::FromStr;

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DrillError, Result};
use crate::model::ProgressRecord;

/// How the next item is picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Random draw proportional to weight, with replacement.
    #[default]
    Weighted,
    /// Walk the list in order, wrapping around.
    Sequential,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Weighted => write!(f, "weighted"),
            SelectionMode::Sequential => write!(f, "sequential"),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weighted" | "random" => Ok(SelectionMode::Weighted),
            "sequential" | "in-order" | "ordered" => Ok(SelectionMode::Sequential),
            other => Err(format!("unknown selection mode: {other}")),
        }
    }
}

/// Pick the next index out of the first `item_count` records.
///
/// Returns the chosen index and the cursor to pass on the next call. The
/// cursor only moves in sequential mode.
pub fn select_next<R: Rng + ?Sized>(
    item_count: usize,
    records: &[ProgressRecord],
    mode: SelectionMode,
    cursor: usize,
    rng: &mut R,
) -> Result<(usize, usize)> {
    if item_count == 0 {
        return Err(DrillError::EmptyCorpus);
    }
    if records.len() < item_count {
        return Err(DrillError::MissingRecords {
            items: item_count,
            records: records.len(),
        });
    }

    match mode {
        SelectionMode::Weighted => {
            let weights = records.iter().take(item_count).map(|r| r.weight);
            let dist =
                WeightedIndex::new(weights).map_err(|e| DrillError::InvalidWeights(e.to_string()))?;
            let index = dist.sample(rng);
            tracing::debug!(index, weight = records[index].weight, "weighted pick");
            Ok((index, cursor))
        }
        SelectionMode::Sequential => {
            let index = cursor % item_count;
            Ok((index, (index + 1) % item_count))
        }
    }
}

/// Stateful selector that owns the sequential cursor.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    mode: SelectionMode,
    cursor: usize,
}

impl Selector {
    pub fn new(mode: SelectionMode) -> Self {
        Self { mode, cursor: 0 }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pick the next index and advance the cursor.
    pub fn next<R: Rng + ?Sized>(&mut self, records: &[ProgressRecord], rng: &mut R) -> Result<usize> {
        let (index, cursor) = select_next(records.len(), records, self.mode, self.cursor, rng)?;
        self.cursor = cursor;
        Ok(index)
    }
}
