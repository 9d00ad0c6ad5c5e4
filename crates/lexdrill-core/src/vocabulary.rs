//! Vocabulary list loading and validation.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::VocabularyItem;

/// Parse a vocabulary JSON file.
pub fn load_vocabulary(path: &Path) -> Result<Vec<VocabularyItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read vocabulary file: {}", path.display()))?;

    parse_vocabulary_str(&content, path)
}

/// Parse a vocabulary JSON string (useful for testing).
pub fn parse_vocabulary_str(content: &str, source_path: &Path) -> Result<Vec<VocabularyItem>> {
    let items: Vec<VocabularyItem> = serde_json::from_str(content)
        .with_context(|| format!("invalid vocabulary JSON: {}", source_path.display()))?;
    tracing::debug!("loaded {} items from {}", items.len(), source_path.display());
    Ok(items)
}

/// A warning from vocabulary validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Position of the item in the list.
    pub index: Option<usize>,
    pub message: String,
}

/// Check a vocabulary list for entries that will drill badly.
pub fn validate_vocabulary(items: &[VocabularyItem]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if items.is_empty() {
        warnings.push(ValidationWarning {
            index: None,
            message: "vocabulary list is empty".into(),
        });
        return warnings;
    }

    // Duplicate words share one progress record on the next load.
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for (i, item) in items.iter().enumerate() {
        if let Some(word) = item.simplified.as_deref() {
            let first = *first_seen.entry(word).or_insert(i);
            if first != i {
                warnings.push(ValidationWarning {
                    index: Some(i),
                    message: format!("duplicate word '{word}' (first at #{first})"),
                });
            }
        }
    }

    for (i, item) in items.iter().enumerate() {
        if item.simplified.as_deref().map_or(true, |s| s.trim().is_empty()) {
            warnings.push(ValidationWarning {
                index: Some(i),
                message: "missing written form; progress will be keyed as N/A".into(),
            });
        }
        if item.english_concise.as_deref().map_or(true, |s| s.trim().is_empty()) {
            warnings.push(ValidationWarning {
                index: Some(i),
                message: "missing concise translation".into(),
            });
        }
        match &item.pinyin {
            None => warnings.push(ValidationWarning {
                index: Some(i),
                message: "missing romanization".into(),
            }),
            Some(p) if p.accepted().trim().is_empty() => warnings.push(ValidationWarning {
                index: Some(i),
                message: "romanization is empty".into(),
            }),
            Some(_) => {}
        }
    }

    warnings
}
