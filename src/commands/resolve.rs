//! Offline position lookup

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use readalong::{resolve, Config, Position, TimeIndex};

#[derive(Serialize)]
struct Resolved<'a> {
    time: f64,
    #[serde(flatten)]
    position: Position,
    word_text: Option<&'a str>,
}

pub fn handle(path: &Path, times: &[f64], strict: bool, json: bool) -> Result<()> {
    let config = Config::load()?;
    let index = super::load_index(path, strict, &config)?;

    for &time in times {
        let position = resolve(&index, time, config.sync.snap_threshold);
        if json {
            let resolved = Resolved {
                time,
                position,
                word_text: word_text(&index, position),
            };
            println!("{}", serde_json::to_string(&resolved)?);
        } else {
            println!("{}", describe(&index, time, position));
        }
    }
    Ok(())
}

fn word_text(index: &TimeIndex, position: Position) -> Option<&str> {
    index
        .word(position.sentence?, position.word?)
        .map(|w| w.text.as_str())
}

/// One human-readable line per resolved time.
fn describe(index: &TimeIndex, time: f64, position: Position) -> String {
    match (position.sentence, position.word) {
        (None, _) => format!("{:>8.3}  -", time),
        (Some(s), None) => format!("{:>8.3}  sentence {}  word -", time, s),
        (Some(s), Some(w)) => format!(
            "{:>8.3}  sentence {}  word {}  {:?}",
            time,
            s,
            w,
            word_text(index, position).unwrap_or_default()
        ),
    }
}
