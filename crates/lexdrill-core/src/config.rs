//! lexdrill configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::SessionConfig;

/// Top-level lexdrill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Directory holding the vocabulary lists.
    #[serde(default = "default_vocab_dir")]
    pub vocab_dir: PathBuf,
    /// Directory holding the progress stores.
    #[serde(default = "default_progress_dir")]
    pub progress_dir: PathBuf,
    /// File name prefix shared by lists and stores (`hsk` gives `hsk1.json`).
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    #[serde(default = "default_level")]
    pub default_level: u32,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    /// Session defaults, overridable per run.
    #[serde(default)]
    pub session: SessionConfig,
}

fn default_vocab_dir() -> PathBuf {
    PathBuf::from("json")
}
fn default_progress_dir() -> PathBuf {
    PathBuf::from("progress")
}
fn default_file_prefix() -> String {
    "hsk".to_string()
}
fn default_level() -> u32 {
    1
}
fn default_max_level() -> u32 {
    4
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            vocab_dir: default_vocab_dir(),
            progress_dir: default_progress_dir(),
            file_prefix: default_file_prefix(),
            default_level: default_level(),
            max_level: default_max_level(),
            session: SessionConfig::default(),
        }
    }
}

impl DrillConfig {
    /// Resolve the requested level, falling back to the default.
    pub fn level(&self, requested: Option<u32>) -> Result<u32> {
        let level = requested.unwrap_or(self.default_level);
        anyhow::ensure!(
            (1..=self.max_level).contains(&level),
            "invalid level {level}: must be between 1 and {}",
            self.max_level
        );
        Ok(level)
    }

    pub fn vocab_path(&self, level: u32) -> PathBuf {
        self.vocab_dir.join(format!("{}{level}.json", self.file_prefix))
    }

    pub fn progress_path(&self, level: u32) -> PathBuf {
        self.progress_dir
            .join(format!("{}{level}-progress.json", self.file_prefix))
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `lexdrill.toml` in the current directory
/// 2. `~/.config/lexdrill/config.toml`
///
/// Environment variable overrides: `LEXDRILL_VOCAB_DIR`, `LEXDRILL_PROGRESS_DIR`.
pub fn load_config() -> Result<DrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lexdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            config_home()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => DrillConfig::default(),
    };

    if let Ok(dir) = std::env::var("LEXDRILL_VOCAB_DIR") {
        config.vocab_dir = PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("LEXDRILL_PROGRESS_DIR") {
        config.progress_dir = PathBuf::from(dir);
    }

    Ok(config)
}

/// Parse a TOML configuration document.
pub fn parse_config(content: &str) -> Result<DrillConfig> {
    let config: DrillConfig = toml::from_str(content)?;
    anyhow::ensure!(config.max_level >= 1, "max_level must be at least 1");
    anyhow::ensure!(
        (1..=config.max_level).contains(&config.default_level),
        "default_level {} is outside 1..={}",
        config.default_level,
        config.max_level
    );
    Ok(config)
}

fn config_home() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lexdrill"))
}
