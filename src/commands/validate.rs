//! Time index validation command

use std::path::Path;

use anyhow::{Context, Result};

use readalong::player::format_duration;
use readalong::{TimeIndex, ValidationMode};

pub fn handle(path: &Path) -> Result<()> {
    let index = TimeIndex::parse(path, ValidationMode::Trust)?;
    index
        .validate()
        .with_context(|| format!("{} is not a valid time index", path.display()))?;

    println!(
        "OK: {} sentence(s), {} word(s), {}",
        index.len(),
        index.word_count(),
        format_duration(index.duration_hint())
    );
    Ok(())
}
