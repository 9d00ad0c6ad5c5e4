//! The `lexdrill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use lexdrill_core::config::load_config_from;
use lexdrill_core::vocabulary::{load_vocabulary, validate_vocabulary};

pub fn execute(
    level: Option<u32>,
    file: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let path = match file {
        Some(path) => path,
        None => {
            let config = load_config_from(config_path.as_deref())?;
            config.vocab_path(config.level(level)?)
        }
    };

    let items = load_vocabulary(&path)?;
    println!("Vocabulary: {} ({} items)", path.display(), items.len());

    let warnings = validate_vocabulary(&items);
    for w in &warnings {
        let prefix = w
            .index
            .map(|i| format!("  [#{i}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Vocabulary valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
