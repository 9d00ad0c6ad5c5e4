//! The `lexdrill quiz` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use lexdrill_core::config::load_config_from;
use lexdrill_core::quiz::Direction;
use lexdrill_core::session::{Autosave, Session, SessionConfig, Turn};
use lexdrill_core::store::{ProgressSource, ProgressStore};
use lexdrill_core::vocabulary::load_vocabulary;
use lexdrill_core::{Outcome, SelectionMode};

use crate::console::{self, Command, Input, LineReader};

/// Command-line overrides for the configured session defaults.
#[derive(Debug, Clone, Default)]
pub struct QuizOptions {
    pub level: Option<u32>,
    pub reverse: bool,
    pub sequential: bool,
    pub no_romanization: bool,
    pub no_written_form: bool,
    pub no_metadata: bool,
}

impl QuizOptions {
    fn apply(&self, mut config: SessionConfig) -> SessionConfig {
        if self.reverse {
            config.direction = Direction::Produce;
        }
        if self.sequential {
            config.selection = SelectionMode::Sequential;
        }
        if self.no_romanization {
            config.display.show_romanization = false;
        }
        if self.no_written_form {
            config.display.show_written_form = false;
        }
        if self.no_metadata {
            config.display.show_metadata = false;
        }
        config
    }
}

/// How a turn ended, and whether the session goes on.
struct TurnEnd {
    outcome: Outcome,
    stop: bool,
}

pub async fn execute(options: QuizOptions, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let level = config.level(options.level)?;
    let label = format!("{}{level}", config.file_prefix);

    let vocab_path = config.vocab_path(level);
    let items = load_vocabulary(&vocab_path)?;

    let store = ProgressStore::new(config.progress_path(level));
    let loaded = store.load(&items);
    match &loaded.source {
        ProgressSource::Fresh => println!("No saved progress for {label}, starting fresh."),
        ProgressSource::Restored { matched } => {
            println!("Restored progress for {matched}/{} words.", items.len())
        }
        // already logged by the store
        ProgressSource::Recovered { .. } => {}
    }

    let session_config = options.apply(config.session);
    tracing::debug!(
        level,
        direction = %session_config.direction,
        selection = %session_config.selection,
        "starting quiz"
    );
    let session = Session::new(items, loaded.records, session_config)
        .with_context(|| format!("cannot drill {}", vocab_path.display()))?;
    let mut session = Autosave::new(session, store);

    console::print_settings(&session_config);
    console::print_quiz_options();

    let mut reader = LineReader::stdin();
    loop {
        let mut turn = session.begin_turn()?;
        println!(
            "\n{}",
            console::card_prompt(
                session.item(turn.index()),
                session_config.direction,
                &session_config.display,
            )
        );

        let end = ask(&mut reader, &mut turn).await?;
        let index = turn.index();
        if let Some(report) = session.complete_turn(turn, end.outcome) {
            match report.outcome {
                Outcome::Correct => println!("Correct!"),
                Outcome::Incorrect => {
                    println!("Incorrect.");
                    console::reveal(session.item(index));
                }
                _ => {}
            }
            if session_config.display.show_metadata {
                console::print_item_stats(&report.stats);
            }
        }
        if end.stop {
            break;
        }
    }

    let path = session.store().path().to_path_buf();
    let summary = session.finish()?;
    println!("\nProgress saved to {}", path.display());
    console::print_session_summary(&label, &summary);

    Ok(())
}

/// Read input until the turn has a final outcome.
async fn ask(reader: &mut LineReader, turn: &mut Turn) -> Result<TurnEnd> {
    loop {
        let (input, waited) = reader.prompt("> ").await?;
        turn.record_wait(waited);

        let line = match input {
            Input::Line(line) => line,
            Input::Interrupted => {
                println!("\nInterrupted.");
                return Ok(TurnEnd {
                    outcome: Outcome::Quit,
                    stop: true,
                });
            }
            Input::Closed => {
                return Ok(TurnEnd {
                    outcome: Outcome::Quit,
                    stop: true,
                });
            }
        };

        let outcome = match Command::parse(&line) {
            Command::Quit => {
                return Ok(TurnEnd {
                    outcome: Outcome::Quit,
                    stop: true,
                })
            }
            Command::Skip => {
                println!("Skipped. The answer was: {}", turn.card().primary_answer());
                Outcome::Skipped
            }
            Command::Hint => {
                if !turn.hint() {
                    println!("(already hinted)");
                }
                for hint in &turn.card().hints {
                    println!("Hint: {hint}");
                }
                continue;
            }
            Command::Answer(answer) => turn.judge(&answer),
        };

        return Ok(TurnEnd {
            outcome,
            stop: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_configured_defaults() {
        let options = QuizOptions {
            reverse: true,
            sequential: true,
            no_metadata: true,
            ..Default::default()
        };
        let config = options.apply(SessionConfig::default());
        assert_eq!(config.direction, Direction::Produce);
        assert_eq!(config.selection, SelectionMode::Sequential);
        assert!(config.display.show_romanization);
        assert!(config.display.show_written_form);
        assert!(!config.display.show_metadata);
    }

    #[test]
    fn absent_flags_keep_configured_values() {
        let base = SessionConfig {
            direction: Direction::Produce,
            ..Default::default()
        };
        assert_eq!(QuizOptions::default().apply(base), base);
    }
}
