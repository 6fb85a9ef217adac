//! Subcommand handlers

pub mod completions;
pub mod config;
pub mod play;
pub mod resolve;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use readalong::{Config, TimeIndex, ValidationMode};

/// Load a time index, validating when `--strict` is set or configured.
pub fn load_index(path: &Path, strict: bool, config: &Config) -> Result<TimeIndex> {
    let mode = if strict {
        ValidationMode::Strict
    } else {
        config.index.validation
    };
    let index = TimeIndex::parse(path, mode)?;
    tracing::info!(
        path = %path.display(),
        sentences = index.len(),
        words = index.word_count(),
        "loaded time index"
    );
    Ok(index)
}
