//! lexdrill-core: adaptive scheduling core for vocabulary drills.
//!
//! Items carry a weight between [`model::MIN_WEIGHT`] and
//! [`model::MAX_WEIGHT`]; heavier items are drawn more often. Answers move the
//! weight down, misses and skips move it up, and the per-word history is
//! merged back into the vocabulary list every time it is loaded.

pub mod config;
pub mod error;
pub mod model;
pub mod outcome;
pub mod quiz;
pub mod selector;
pub mod session;
pub mod statistics;
pub mod store;
pub mod vocabulary;

pub use error::DrillError;
pub use model::{ProgressRecord, VocabularyItem};
pub use outcome::{apply_outcome, Outcome};
pub use selector::{select_next, SelectionMode};
pub use statistics::{compute_stats, CorpusStats};
pub use store::merge_progress;
