//! The `lexdrill reset` command.

use std::path::PathBuf;

use anyhow::Result;

use lexdrill_core::config::load_config_from;
use lexdrill_core::store::ProgressStore;

pub fn execute(level: Option<u32>, yes: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let level = config.level(level)?;
    let store = ProgressStore::new(config.progress_path(level));

    if !yes {
        anyhow::bail!(
            "refusing to delete {} without --yes",
            store.path().display()
        );
    }

    if store.remove()? {
        println!("Deleted {}", store.path().display());
    } else {
        println!("No progress at {}, nothing to reset.", store.path().display());
    }

    Ok(())
}
