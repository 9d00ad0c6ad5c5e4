//! Terminal input and card rendering.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use comfy_table::{Cell, Table};
use tokio::sync::mpsc;

use lexdrill_core::model::VocabularyItem;
use lexdrill_core::quiz::Direction;
use lexdrill_core::session::{DisplayOptions, SessionConfig};
use lexdrill_core::statistics::{ItemStats, OverallProgress, SessionSummary};

/// What came back from waiting on the learner.
#[derive(Debug)]
pub enum Input {
    Line(String),
    /// Ctrl-C while waiting.
    Interrupted,
    /// Stdin closed or could not be read.
    Closed,
}

/// Reads stdin lines on a plain thread so a pending read never holds up
/// shutdown, and races each read against Ctrl-C.
pub struct LineReader {
    rx: mpsc::UnboundedReceiver<io::Result<String>>,
}

impl LineReader {
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    /// Print `prompt`, wait for a line, and time the wait.
    pub async fn prompt(&mut self, prompt: &str) -> io::Result<(Input, Duration)> {
        print!("{prompt}");
        io::stdout().flush()?;

        let started = Instant::now();
        let input = tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => Input::Interrupted,
            line = self.rx.recv() => match line {
                Some(Ok(line)) => Input::Line(line),
                Some(Err(e)) => {
                    tracing::warn!("failed to read input: {e}");
                    Input::Closed
                }
                None => Input::Closed,
            },
        };
        Ok((input, started.elapsed()))
    }
}

/// An in-quiz command typed instead of an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Skip,
    Hint,
    Quit,
    Answer(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "-s" => Command::Skip,
            "-h" => Command::Hint,
            "-q" => Command::Quit,
            _ => Command::Answer(line.to_string()),
        }
    }
}

pub fn print_settings(config: &SessionConfig) {
    let d = &config.display;
    println!(
        "{} | {} | {} | {} | {}",
        match config.direction {
            Direction::Recognize => "Translation -> Word",
            Direction::Produce => "Word -> Translation",
        },
        match config.selection {
            lexdrill_core::SelectionMode::Weighted => "Weighted",
            lexdrill_core::SelectionMode::Sequential => "In-Order",
        },
        if d.show_romanization { "Romanization" } else { "No Romanization" },
        if d.show_written_form { "Written Form" } else { "No Written Form" },
        if d.show_metadata { "Stats" } else { "No Stats" },
    );
}

pub fn print_quiz_options() {
    println!("#-- Options --#");
    println!("~ Skip   [-s]");
    println!("~ Hint   [-h]");
    println!("~ Quit   [-q]");
}

/// The text shown when a card is presented.
pub fn card_prompt(item: &VocabularyItem, direction: Direction, display: &DisplayOptions) -> String {
    match direction {
        Direction::Recognize => {
            let mut prompt = format!("〘 {} | {} 〙", item.concise(), item.descriptive());
            if display.show_written_form {
                prompt.push_str(&format!("\n〘 {} 〙", item.word()));
            }
            prompt
        }
        Direction::Produce => {
            let mut prompt = format!("〘 {}", item.word());
            if display.show_romanization {
                prompt.push_str(&format!(" ({})", item.romanization_display()));
            }
            prompt.push_str(" 〙");
            prompt
        }
    }
}

/// Full details of a word, shown after a miss.
pub fn reveal(item: &VocabularyItem) {
    let measure = item
        .measure_word
        .as_ref()
        .map(|m| format!(" ({} {})", m.character, m.pinyin))
        .unwrap_or_default();
    let or_na = |s: &Option<String>| s.clone().unwrap_or_else(|| "N/A".to_string());

    println!("╔");
    println!(
        "║ ⌜ {} | {}{measure}",
        item.word(),
        item.romanization_display()
    );
    println!("║ ⌞ {} | {}", item.concise(), item.descriptive());
    println!("║");
    println!(
        "║ ⌜ {} ({})",
        or_na(&item.example_cn),
        or_na(&item.example_pinyin)
    );
    println!("║ ⌞ {}", or_na(&item.example_en));
    println!("╚");
}

pub fn print_item_stats(stats: &ItemStats) {
    println!("╔");
    println!(
        "║ Accuracy {:.2}% ({} / {})",
        stats.accuracy_percent, stats.correct, stats.attempts
    );
    println!(
        "║ Proficiency {:.2}% ({}{:.2}%)",
        stats.proficiency_percent,
        if stats.proficiency_change > 0.0 { "+" } else { "" },
        stats.proficiency_change
    );
    println!("║ Streak {}", stats.streak);
    println!("║ Avg {:.2}s", stats.avg_time_secs);
    println!("╚");
}

fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.2}")
    } else {
        format!("{value:.2}")
    }
}

pub fn print_session_summary(label: &str, summary: &SessionSummary) {
    let mut table = Table::new();
    table.set_header(vec![format!("Session Summary ({label})"), String::new()]);
    table.add_row(vec![
        Cell::new("Time"),
        Cell::new(format!("+{:.2} minutes", summary.session_time_minutes())),
    ]);
    table.add_row(vec![
        Cell::new("Accuracy"),
        Cell::new(format!(
            "{:.1}% ({} / {})",
            summary.session_accuracy_percent, summary.tally.correct, summary.tally.attempts
        )),
    ]);
    table.add_row(vec![
        Cell::new("Change"),
        Cell::new(format!("{}%", signed(summary.proficiency_change))),
    ]);
    println!("\n{table}");

    print_overall(label, &summary.overall);
}

pub fn print_overall(label: &str, overall: &OverallProgress) {
    let mut table = Table::new();
    table.set_header(vec![format!("Overall Progress ({label})"), String::new()]);
    table.add_row(vec![
        Cell::new("Proficiency"),
        Cell::new(format!("{:.1}%", overall.proficiency_percent)),
    ]);
    table.add_row(vec![
        Cell::new("Accuracy"),
        Cell::new(format!(
            "{:.1}% ({}/{})",
            overall.accuracy_percent, overall.total_correct, overall.total_attempts
        )),
    ]);
    table.add_row(vec![
        Cell::new("Seen"),
        Cell::new(format!("{} / {} words", overall.words_seen, overall.total_words)),
    ]);
    table.add_row(vec![
        Cell::new("Mastered"),
        Cell::new(format!("{} / {} words", overall.words_mastered, overall.total_words)),
    ]);
    table.add_row(vec![
        Cell::new("Total Time"),
        Cell::new(format!("{:.2} hours", overall.total_time_hours)),
    ]);
    println!("\n{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexdrill_core::model::Romanization;

    fn item() -> VocabularyItem {
        VocabularyItem {
            simplified: Some("猫".into()),
            pinyin: Some(Romanization::Single("māo".into())),
            english_concise: Some("cat".into()),
            ..Default::default()
        }
    }

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(Command::parse(" -S "), Command::Skip);
        assert_eq!(Command::parse("-h"), Command::Hint);
        assert_eq!(Command::parse("-Q"), Command::Quit);
        assert_eq!(Command::parse("mao1"), Command::Answer("mao1".into()));
    }

    #[test]
    fn recognize_prompt_respects_written_form_toggle() {
        let mut display = DisplayOptions::default();
        let shown = card_prompt(&item(), Direction::Recognize, &display);
        assert_eq!(shown, "〘 cat | N/A 〙\n〘 猫 〙");

        display.show_written_form = false;
        let hidden = card_prompt(&item(), Direction::Recognize, &display);
        assert!(!hidden.contains('猫'));
    }

    #[test]
    fn produce_prompt_respects_romanization_toggle() {
        let mut display = DisplayOptions::default();
        assert_eq!(
            card_prompt(&item(), Direction::Produce, &display),
            "〘 猫 (māo) 〙"
        );
        display.show_romanization = false;
        assert_eq!(card_prompt(&item(), Direction::Produce, &display), "〘 猫 〙");
    }

    #[test]
    fn signed_formatting() {
        assert_eq!(signed(1.5), "+1.50");
        assert_eq!(signed(-0.25), "-0.25");
        assert_eq!(signed(0.0), "0.00");
    }
}
