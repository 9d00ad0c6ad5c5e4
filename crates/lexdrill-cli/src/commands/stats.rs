//! The `lexdrill stats` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use lexdrill_core::config::load_config_from;
use lexdrill_core::statistics::OverallProgress;
use lexdrill_core::store::ProgressStore;
use lexdrill_core::vocabulary::load_vocabulary;

use crate::console;

#[derive(Debug, Serialize)]
struct StatsReport {
    level: u32,
    vocabulary: PathBuf,
    progress_file: PathBuf,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    progress: OverallProgress,
}

pub fn execute(level: Option<u32>, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let level = config.level(level)?;

    let vocab_path = config.vocab_path(level);
    let items = load_vocabulary(&vocab_path)?;
    let store = ProgressStore::new(config.progress_path(level));
    let loaded = store.load(&items);

    let progress = OverallProgress::compute(&loaded.records);

    match format.as_str() {
        "text" => {
            console::print_overall(&format!("{}{level}", config.file_prefix), &progress);
        }
        "json" => {
            let report = StatsReport {
                level,
                vocabulary: vocab_path,
                progress_file: store.path().to_path_buf(),
                generated_at: Utc::now(),
                progress,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
