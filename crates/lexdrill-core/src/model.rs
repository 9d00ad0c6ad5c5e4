//! Core data model types for lexdrill.
//!
//! Vocabulary items are read-only input; progress records are the only state
//! the scheduling core mutates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest weight an item can reach (fully mastered).
pub const MIN_WEIGHT: f64 = 0.01;
/// Highest weight an item can reach (unseen or poorly known).
pub const MAX_WEIGHT: f64 = 10.0;

/// Shown in place of a vocabulary field that is missing.
pub const PLACEHOLDER: &str = "N/A";

/// A single entry of a vocabulary list.
///
/// Every field is optional in the source files. Missing fields only affect
/// what is displayed, never the weight arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyItem {
    /// Canonical written form; doubles as the progress key.
    #[serde(default)]
    pub simplified: Option<String>,
    #[serde(default)]
    pub pinyin: Option<Romanization>,
    #[serde(default)]
    pub english_concise: Option<String>,
    #[serde(default)]
    pub english_descriptive: Option<String>,
    #[serde(default)]
    pub example_cn: Option<String>,
    #[serde(default)]
    pub example_pinyin: Option<String>,
    #[serde(default)]
    pub example_en: Option<String>,
    #[serde(default)]
    pub categories: Option<CategoryTags>,
    #[serde(default)]
    pub measure_word: Option<MeasureWord>,
}

impl VocabularyItem {
    /// The key used to match this item against stored progress.
    pub fn word(&self) -> &str {
        self.simplified.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn concise(&self) -> &str {
        self.english_concise.as_deref().unwrap_or(PLACEHOLDER)
    }

    pub fn descriptive(&self) -> &str {
        self.english_descriptive.as_deref().unwrap_or(PLACEHOLDER)
    }

    /// Romanization as displayed, all variants joined.
    pub fn romanization_display(&self) -> String {
        self.pinyin
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}

/// A romanization field, which the vocabulary sources store either as a
/// plain string or as an ordered list of variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Romanization {
    Single(String),
    Variants(Vec<String>),
}

impl Romanization {
    /// The romanization accepted as an answer.
    ///
    /// With more than one variant the second one is used (the sources list
    /// the toned form first and the numbered form second).
    pub fn accepted(&self) -> &str {
        match self {
            Romanization::Single(s) => s,
            Romanization::Variants(v) if v.len() > 1 => &v[1],
            Romanization::Variants(v) => v.first().map(String::as_str).unwrap_or(""),
        }
    }
}

impl fmt::Display for Romanization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Romanization::Single(s) => write!(f, "{s}"),
            Romanization::Variants(v) => write!(f, "{}", v.join(" / ")),
        }
    }
}

/// Category tags, either a single tag or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryTags {
    Single(String),
    List(Vec<String>),
}

impl fmt::Display for CategoryTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryTags::Single(s) => write!(f, "{s}"),
            CategoryTags::List(v) => write!(f, "{}", v.join(", ")),
        }
    }
}

/// Classifier / measure word for a noun.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasureWord {
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub pinyin: String,
}

/// Per-word learning statistics.
///
/// Field order is the on-disk order of the progress store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub word: String,
    pub weight: f64,
    pub streak: u32,
    pub avg_time: f64,
    pub total_time: f64,
    pub attempts: u32,
    pub correct: u32,
}

impl ProgressRecord {
    /// A record for a word that has never been drilled.
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            weight: MAX_WEIGHT,
            streak: 0,
            avg_time: 0.0,
            total_time: 0.0,
            attempts: 0,
            correct: 0,
        }
    }

    /// Whether every invariant of a record holds.
    pub fn is_consistent(&self) -> bool {
        self.weight.is_finite()
            && (MIN_WEIGHT..=MAX_WEIGHT).contains(&self.weight)
            && self.correct <= self.attempts
            && self.total_time.is_finite()
            && self.total_time >= 0.0
            && self.avg_time.is_finite()
            && self.avg_time >= 0.0
    }

    /// Share of attempts answered correctly, in percent.
    pub fn accuracy_percent(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.correct as f64 / self.attempts as f64 * 100.0
        }
    }
}
