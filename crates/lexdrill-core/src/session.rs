//! Drill sessions.
//!
//! A [`Session`] owns the progress set for one vocabulary list. Each turn is
//! started with [`Session::begin_turn`], which hands out a [`Turn`] working on
//! a copy of the chosen record. Nothing is written back until the turn is
//! passed to [`Session::complete_turn`] with a final outcome, so a quit or an
//! interruption leaves the record untouched.

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{DrillError, Result};
use crate::model::{ProgressRecord, VocabularyItem};
use crate::outcome::{apply_outcome, Outcome};
use crate::quiz::{Direction, QuizCard};
use crate::selector::{SelectionMode, Selector};
use crate::statistics::{compute_stats, CorpusStats, ItemStats, SessionSummary, SessionTally};
use crate::store::{merge_progress, ProgressStore};

/// Display toggles. The core carries them but never looks at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    #[serde(default = "default_true")]
    pub show_romanization: bool,
    #[serde(default = "default_true")]
    pub show_written_form: bool,
    #[serde(default = "default_true")]
    pub show_metadata: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_romanization: true,
            show_written_form: true,
            show_metadata: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Settings fixed for the duration of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub selection: SelectionMode,
    #[serde(flatten)]
    pub display: DisplayOptions,
}

/// One presented item, from prompt to final outcome.
#[derive(Debug, Clone)]
pub struct Turn {
    index: usize,
    card: QuizCard,
    working: ProgressRecord,
    weight_before: f64,
    hinted: bool,
    elapsed_secs: f64,
}

impl Turn {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn card(&self) -> &QuizCard {
        &self.card
    }

    pub fn is_hinted(&self) -> bool {
        self.hinted
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Add time spent waiting for the learner.
    pub fn record_wait(&mut self, wait: Duration) {
        self.elapsed_secs += wait.as_secs_f64();
    }

    /// Apply the hint penalty. Only the first hint of a turn is penalized;
    /// returns whether this call applied it.
    pub fn hint(&mut self) -> bool {
        if self.hinted {
            return false;
        }
        self.working = apply_outcome(&self.working, Outcome::Hinted, 0.0);
        self.hinted = true;
        true
    }

    /// Judge a typed answer.
    pub fn judge(&self, input: &str) -> Outcome {
        if self.card.check(input) {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

/// The result of a completed turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub index: usize,
    pub outcome: Outcome,
    pub elapsed_secs: f64,
    pub record: ProgressRecord,
    pub stats: ItemStats,
}

/// A running drill over one vocabulary list.
#[derive(Debug)]
pub struct Session<R: Rng = StdRng> {
    items: Vec<VocabularyItem>,
    records: Vec<ProgressRecord>,
    config: SessionConfig,
    selector: Selector,
    rng: R,
    start: CorpusStats,
    tally: SessionTally,
}

impl Session<StdRng> {
    /// Start a session seeded from the operating system.
    pub fn new(
        items: Vec<VocabularyItem>,
        records: Vec<ProgressRecord>,
        config: SessionConfig,
    ) -> Result<Self> {
        Self::with_rng(items, records, config, StdRng::from_os_rng())
    }
}

impl<R: Rng> Session<R> {
    /// Start a session with an explicit random source.
    ///
    /// Fails with [`DrillError::EmptyCorpus`] if there is nothing to drill.
    /// Records that are not aligned with `items` are re-merged by word.
    pub fn with_rng(
        items: Vec<VocabularyItem>,
        records: Vec<ProgressRecord>,
        config: SessionConfig,
        rng: R,
    ) -> Result<Self> {
        if items.is_empty() {
            return Err(DrillError::EmptyCorpus);
        }

        let aligned = records.len() == items.len()
            && records.iter().zip(&items).all(|(r, i)| r.word == i.word());
        let records = if aligned {
            records
        } else {
            tracing::warn!("progress records out of line with vocabulary, re-merging by word");
            merge_progress(&items, Some(records))
        };

        let start = compute_stats(&records);
        Ok(Self {
            items,
            records,
            config,
            selector: Selector::new(config.selection),
            rng,
            start,
            tally: SessionTally::default(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> &VocabularyItem {
        &self.items[index]
    }

    pub fn records(&self) -> &[ProgressRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ProgressRecord> {
        self.records
    }

    pub fn tally(&self) -> SessionTally {
        self.tally
    }

    /// Stats of the progress set as it was when the session started.
    pub fn start_stats(&self) -> CorpusStats {
        self.start
    }

    /// Pick the next item and prepare its card.
    pub fn begin_turn(&mut self) -> Result<Turn> {
        let index = self.selector.next(&self.records, &mut self.rng)?;
        let working = self.records[index].clone();
        Ok(Turn {
            index,
            card: QuizCard::new(&self.items[index], self.config.direction),
            weight_before: working.weight,
            working,
            hinted: false,
            elapsed_secs: 0.0,
        })
    }

    /// Finish a turn.
    ///
    /// Correct, incorrect and skipped answers are written back to the progress
    /// set. Any other outcome discards the turn, hint penalty included, and
    /// returns `None`.
    pub fn complete_turn(&mut self, turn: Turn, outcome: Outcome) -> Option<TurnReport> {
        if !outcome.counts_as_attempt() {
            tracing::debug!(word = %turn.working.word, %outcome, "turn discarded");
            return None;
        }

        let updated = apply_outcome(&turn.working, outcome, turn.elapsed_secs);
        self.records[turn.index] = updated.clone();

        self.tally.attempts += 1;
        if outcome == Outcome::Correct {
            self.tally.correct += 1;
        }

        Some(TurnReport {
            index: turn.index,
            outcome,
            elapsed_secs: turn.elapsed_secs,
            stats: ItemStats::compute(&updated, turn.weight_before),
            record: updated,
        })
    }

    /// Summary of the session so far.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::compute(self.start, &self.records, self.tally)
    }
}

/// A session that saves its progress set exactly once: through
/// [`Autosave::finish`], or when dropped without finishing (early return,
/// panic unwinding).
#[derive(Debug)]
pub struct Autosave<R: Rng = StdRng> {
    session: Session<R>,
    store: ProgressStore,
    saved: bool,
}

impl<R: Rng> Autosave<R> {
    pub fn new(session: Session<R>, store: ProgressStore) -> Self {
        Self {
            session,
            store,
            saved: false,
        }
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// Save the progress set and return the session summary.
    pub fn finish(mut self) -> Result<SessionSummary> {
        let summary = self.session.summary();
        self.saved = true;
        self.store.save(self.session.records())?;
        Ok(summary)
    }
}

impl<R: Rng> Deref for Autosave<R> {
    type Target = Session<R>;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl<R: Rng> DerefMut for Autosave<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.session
    }
}

impl<R: Rng> Drop for Autosave<R> {
    fn drop(&mut self) {
        if self.saved {
            return;
        }
        tracing::warn!("session ended without finishing, saving progress");
        if let Err(e) = self.store.save(self.session.records()) {
            tracing::error!("{e}");
        }
    }
}
