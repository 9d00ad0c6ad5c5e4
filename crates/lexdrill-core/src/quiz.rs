//! Quiz cards: what is asked, what is accepted, and answer matching.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{VocabularyItem, PLACEHOLDER};

/// Which side of a card the learner has to type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Shown the translation (and optionally the written form); type the
    /// written form or its romanization. Exact match.
    #[default]
    Recognize,
    /// Shown the written form; type any part of the concise translation.
    Produce,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Recognize => write!(f, "recognize"),
            Direction::Produce => write!(f, "produce"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recognize" => Ok(Direction::Recognize),
            "produce" | "reverse" => Ok(Direction::Produce),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// Lowercase and trim a typed answer.
pub fn normalize_input(input: &str) -> String {
    input.trim().to_lowercase()
}

/// A vocabulary item prepared for one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizCard {
    pub direction: Direction,
    /// Normalized answers. In [`Direction::Produce`] there is exactly one:
    /// the concise translation.
    pub answers: Vec<String>,
    /// Hint lines, most useful first.
    pub hints: Vec<String>,
}

impl QuizCard {
    pub fn new(item: &VocabularyItem, direction: Direction) -> Self {
        let mut hints = vec![item
            .example_cn
            .clone()
            .unwrap_or_else(|| "No example".to_string())];

        let answers = match direction {
            Direction::Recognize => {
                let written = item.simplified.as_deref().unwrap_or("").to_lowercase();
                let romanized = item
                    .pinyin
                    .as_ref()
                    .map(|p| p.accepted().replace(' ', "").to_lowercase())
                    .unwrap_or_default();
                vec![written, romanized]
            }
            Direction::Produce => {
                hints.push(
                    item.categories
                        .as_ref()
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "No category".to_string()),
                );
                vec![item
                    .english_concise
                    .as_deref()
                    .unwrap_or(PLACEHOLDER)
                    .to_lowercase()]
            }
        };

        Self {
            direction,
            answers,
            hints,
        }
    }

    /// The answer revealed after a skip.
    pub fn primary_answer(&self) -> &str {
        self.answers.first().map(String::as_str).unwrap_or("")
    }

    /// Check a typed answer.
    ///
    /// Recognize requires an exact match with one of the accepted forms;
    /// Produce accepts any substring of the concise translation.
    pub fn check(&self, input: &str) -> bool {
        let input = normalize_input(input);
        match self.direction {
            Direction::Recognize => self.answers.iter().any(|a| *a == input),
            Direction::Produce => self.primary_answer().contains(input.as_str()),
        }
    }
}
