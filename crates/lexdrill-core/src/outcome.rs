//! Outcome-driven updates of a single progress record.
//!
//! Every rule reads the record as it was before the update and clamps the
//! resulting weight into `[MIN_WEIGHT, MAX_WEIGHT]`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{ProgressRecord, MAX_WEIGHT, MIN_WEIGHT};

pub const PENALTY_HINT: f64 = 1.5;
pub const PENALTY_SKIP: f64 = 3.0;
pub const PENALTY_INCORRECT: f64 = 4.0;
/// Base reward for a correct answer.
pub const REWARD_CORRECT: f64 = 1.0;
/// Extra reward per item of the streak, counting the current answer.
pub const REWARD_STREAK: f64 = 0.25;
/// Extra reward for beating the item's average answer time.
pub const REWARD_TIME: f64 = 0.5;

/// What happened when an item was presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The learner asked for a hint; the turn goes on.
    Hinted,
    Correct,
    Incorrect,
    Skipped,
    /// The learner ended the session; the turn is discarded.
    Quit,
}

impl Outcome {
    /// Whether this outcome ends a turn and counts towards `attempts`.
    pub fn counts_as_attempt(self) -> bool {
        matches!(self, Outcome::Correct | Outcome::Incorrect | Outcome::Skipped)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Hinted => write!(f, "hinted"),
            Outcome::Correct => write!(f, "correct"),
            Outcome::Incorrect => write!(f, "incorrect"),
            Outcome::Skipped => write!(f, "skipped"),
            Outcome::Quit => write!(f, "quit"),
        }
    }
}

/// Reward for a correct answer.
///
/// `streak` is the streak after counting this answer; `old_avg_time` is the
/// average before this answer's time is folded in.
pub fn correct_reward(streak: u32, old_avg_time: f64, elapsed: f64) -> f64 {
    let mut reward = REWARD_CORRECT + REWARD_STREAK * streak as f64;
    if old_avg_time > 0.0 && elapsed < old_avg_time {
        reward += REWARD_TIME;
    }
    reward
}

/// Apply one outcome to a record and return the updated record.
pub fn apply_outcome(record: &ProgressRecord, outcome: Outcome, elapsed_secs: f64) -> ProgressRecord {
    let elapsed = if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
        elapsed_secs
    } else {
        0.0
    };
    let mut next = record.clone();

    match outcome {
        Outcome::Quit => return next,
        Outcome::Hinted => {
            next.weight = (record.weight + PENALTY_HINT).min(MAX_WEIGHT);
            return next;
        }
        Outcome::Skipped => {
            next.weight = (record.weight + PENALTY_SKIP).min(MAX_WEIGHT);
            next.streak = 0;
        }
        Outcome::Incorrect => {
            next.weight = (record.weight + PENALTY_INCORRECT).min(MAX_WEIGHT);
            next.streak = 0;
        }
        Outcome::Correct => {
            next.correct = record.correct + 1;
            next.streak = record.streak + 1;
            let reward = correct_reward(next.streak, record.avg_time, elapsed);
            next.weight = (record.weight - reward).max(MIN_WEIGHT);
        }
    }

    next.attempts = record.attempts + 1;
    next.total_time = record.total_time + elapsed;
    next.avg_time = next.total_time / next.attempts as f64;

    tracing::debug!(
        word = %next.word,
        %outcome,
        weight_before = record.weight,
        weight_after = next.weight,
        "applied outcome"
    );
    next
}
