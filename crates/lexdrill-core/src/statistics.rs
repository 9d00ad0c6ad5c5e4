//! Proficiency, accuracy and mastery statistics over a progress set.

use serde::{Deserialize, Serialize};

use crate::model::{ProgressRecord, MAX_WEIGHT, MIN_WEIGHT};

/// Share of the weight range, from the bottom, that counts as mastered.
pub const MASTERY_FRACTION: f64 = 0.05;

/// Weight at or below which an item counts as mastered.
pub fn mastery_threshold() -> f64 {
    MIN_WEIGHT + (MAX_WEIGHT - MIN_WEIGHT) * MASTERY_FRACTION
}

/// Proficiency of a single weight: 100% at `MIN_WEIGHT`, 0% at `MAX_WEIGHT`.
pub fn weight_proficiency(weight: f64) -> f64 {
    (MAX_WEIGHT - weight) / (MAX_WEIGHT - MIN_WEIGHT) * 100.0
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Corpus-wide proficiency and accumulated answer time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub proficiency_percent: f64,
    pub total_time_secs: f64,
}

/// Compute proficiency and total time for a progress set.
///
/// An empty set yields zeros.
pub fn compute_stats(records: &[ProgressRecord]) -> CorpusStats {
    if records.is_empty() {
        return CorpusStats::default();
    }

    let total_weight: f64 = records.iter().map(|r| r.weight).sum();
    let total_time_secs: f64 = records.iter().map(|r| r.total_time).sum();

    let avg_weight = total_weight / records.len() as f64;
    let normalized_difficulty = (avg_weight - MIN_WEIGHT) / (MAX_WEIGHT - MIN_WEIGHT);
    let proficiency_percent = ((1.0 - normalized_difficulty) * 100.0).clamp(0.0, 100.0);

    CorpusStats {
        proficiency_percent,
        total_time_secs,
    }
}

/// Correct answers and attempts counted during one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTally {
    pub correct: u32,
    pub attempts: u32,
}

impl SessionTally {
    pub fn accuracy_percent(&self) -> f64 {
        percent(self.correct as u64, self.attempts as u64)
    }
}

/// Progress over the whole vocabulary list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallProgress {
    pub proficiency_percent: f64,
    pub total_correct: u64,
    pub total_attempts: u64,
    pub accuracy_percent: f64,
    pub total_words: usize,
    pub words_seen: usize,
    pub words_mastered: usize,
    pub total_time_hours: f64,
}

impl OverallProgress {
    pub fn compute(records: &[ProgressRecord]) -> Self {
        let stats = compute_stats(records);
        let total_correct: u64 = records.iter().map(|r| r.correct as u64).sum();
        let total_attempts: u64 = records.iter().map(|r| r.attempts as u64).sum();
        let threshold = mastery_threshold();

        Self {
            proficiency_percent: stats.proficiency_percent,
            total_correct,
            total_attempts,
            accuracy_percent: percent(total_correct, total_attempts),
            total_words: records.len(),
            words_seen: records.iter().filter(|r| r.attempts > 0).count(),
            words_mastered: records.iter().filter(|r| r.weight <= threshold).count(),
            total_time_hours: stats.total_time_secs / 3600.0,
        }
    }
}

/// What changed during one session, plus where the list stands now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub tally: SessionTally,
    pub session_accuracy_percent: f64,
    pub proficiency_change: f64,
    /// Answer time added by this session.
    pub session_time_secs: f64,
    pub overall: OverallProgress,
}

impl SessionSummary {
    /// Summarize a session from the stats taken before it started and the
    /// records as they are now.
    pub fn compute(start: CorpusStats, records: &[ProgressRecord], tally: SessionTally) -> Self {
        let end = compute_stats(records);
        Self {
            tally,
            session_accuracy_percent: tally.accuracy_percent(),
            proficiency_change: end.proficiency_percent - start.proficiency_percent,
            session_time_secs: end.total_time_secs - start.total_time_secs,
            overall: OverallProgress::compute(records),
        }
    }

    pub fn session_time_minutes(&self) -> f64 {
        self.session_time_secs / 60.0
    }
}

/// Statistics for the item that was just answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    pub accuracy_percent: f64,
    pub correct: u32,
    pub attempts: u32,
    pub proficiency_percent: f64,
    pub proficiency_change: f64,
    pub streak: u32,
    pub avg_time_secs: f64,
}

impl ItemStats {
    pub fn compute(record: &ProgressRecord, weight_before: f64) -> Self {
        let proficiency_percent = weight_proficiency(record.weight);
        Self {
            accuracy_percent: record.accuracy_percent(),
            correct: record.correct,
            attempts: record.attempts,
            proficiency_percent,
            proficiency_change: proficiency_percent - weight_proficiency(weight_before),
            streak: record.streak,
            avg_time_secs: record.avg_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(word: &str, weight: f64, attempts: u32, correct: u32, total_time: f64) -> ProgressRecord {
        ProgressRecord {
            word: word.into(),
            weight,
            streak: 0,
            avg_time: if attempts > 0 {
                total_time / attempts as f64
            } else {
                0.0
            },
            total_time,
            attempts,
            correct,
        }
    }

    #[test]
    fn empty_set_is_zero() {
        assert_eq!(compute_stats(&[]), CorpusStats::default());
        let overall = OverallProgress::compute(&[]);
        assert_eq!(overall.total_words, 0);
        assert_eq!(overall.accuracy_percent, 0.0);
    }

    #[test]
    fn fresh_set_has_zero_proficiency() {
        let records: Vec<_> = (0..5).map(|i| ProgressRecord::new(format!("w{i}"))).collect();
        let stats = compute_stats(&records);
        assert!(stats.proficiency_percent.abs() < 1e-9);
        assert_eq!(stats.total_time_secs, 0.0);
    }

    #[test]
    fn fully_mastered_set_is_hundred_percent() {
        let records = vec![rec("a", MIN_WEIGHT, 3, 3, 6.0), rec("b", MIN_WEIGHT, 1, 1, 1.5)];
        let stats = compute_stats(&records);
        assert!((stats.proficiency_percent - 100.0).abs() < 1e-9);
        assert!((stats.total_time_secs - 7.5).abs() < 1e-9);
    }

    #[test]
    fn proficiency_is_linear_in_average_weight() {
        let mid = (MIN_WEIGHT + MAX_WEIGHT) / 2.0;
        let records = vec![rec("a", MIN_WEIGHT, 0, 0, 0.0), rec("b", MAX_WEIGHT, 0, 0, 0.0)];
        let stats = compute_stats(&records);
        assert!((stats.proficiency_percent - 50.0).abs() < 1e-9);
        assert!((weight_proficiency(mid) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn compute_stats_is_idempotent() {
        let records = vec![rec("a", 3.3, 4, 2, 9.1), rec("b", 7.7, 2, 0, 4.4)];
        assert_eq!(compute_stats(&records), compute_stats(&records));
    }

    #[test]
    fn overall_progress_counts() {
        let threshold = mastery_threshold();
        let records = vec![
            rec("a", MIN_WEIGHT, 10, 9, 20.0),
            rec("b", threshold, 4, 4, 3600.0),
            rec("c", threshold + 0.01, 2, 1, 0.0),
            rec("d", MAX_WEIGHT, 0, 0, 0.0),
        ];
        let overall = OverallProgress::compute(&records);
        assert_eq!(overall.total_words, 4);
        assert_eq!(overall.words_seen, 3);
        assert_eq!(overall.words_mastered, 2);
        assert_eq!(overall.total_correct, 14);
        assert_eq!(overall.total_attempts, 16);
        assert!((overall.accuracy_percent - 87.5).abs() < 1e-9);
        assert!((overall.total_time_hours - 3620.0 / 3600.0).abs() < 1e-9);
    }

    #[test]
    fn mastery_threshold_value() {
        assert!((mastery_threshold() - 0.5095).abs() < 1e-12);
    }

    #[test]
    fn session_summary_deltas() {
        let before = vec![rec("a", MAX_WEIGHT, 0, 0, 0.0), rec("b", MAX_WEIGHT, 0, 0, 0.0)];
        let start = compute_stats(&before);
        let after = vec![rec("a", 8.75, 1, 1, 2.0), rec("b", MAX_WEIGHT, 1, 0, 4.0)];
        let tally = SessionTally {
            correct: 1,
            attempts: 2,
        };

        let summary = SessionSummary::compute(start, &after, tally);
        assert!((summary.session_accuracy_percent - 50.0).abs() < 1e-9);
        assert!((summary.session_time_secs - 6.0).abs() < 1e-9);
        assert!((summary.session_time_minutes() - 0.1).abs() < 1e-9);
        assert!(summary.proficiency_change > 0.0);
        assert_eq!(summary.overall.words_seen, 2);
    }

    #[test]
    fn session_without_attempts_has_zero_accuracy() {
        assert_eq!(SessionTally::default().accuracy_percent(), 0.0);
    }

    #[test]
    fn item_stats_after_correct_answer() {
        let after = rec("a", 8.75, 1, 1, 2.0);
        let stats = ItemStats::compute(&after, MAX_WEIGHT);
        assert!((stats.accuracy_percent - 100.0).abs() < 1e-9);
        assert!(stats.proficiency_change > 0.0);
        assert!((stats.proficiency_percent - weight_proficiency(8.75)).abs() < 1e-12);
        assert!((stats.avg_time_secs - 2.0).abs() < 1e-9);
    }
}
