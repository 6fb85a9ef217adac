//! Sentence/word timestamp index
//!
//! A `TimeIndex` is the ordered Sentence → Word structure produced upstream by
//! TTS or forced alignment. It is immutable once built and carries no
//! behaviour beyond lookup; position resolution lives in [`crate::sync`].
//!
//! The on-disk form is JSON:
//!
//! ```json
//! {"sentences": [{"text": "Hello world.", "startTime": 0.0, "endTime": 2.5,
//!   "words": [{"text": "Hello", "start": 0.0, "end": 1.0}]}]}
//! ```
//!
//! A bare top-level array of sentences is accepted as well.

mod validate;

use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use validate::TimeIndexError;

/// A single timed word inside a sentence.
///
/// `end` is exclusive: a word covers `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Whether `time` falls inside `[start, end)`.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }

    /// Distance from `time` to the nearest edge of this word.
    ///
    /// Zero when `time` is inside the word.
    pub fn distance_to(&self, time: f64) -> f64 {
        if time < self.start {
            self.start - time
        } else if time >= self.end {
            time - self.end
        } else {
            0.0
        }
    }
}

/// A timed sentence with its words.
///
/// The `translation` payload is opaque to the engine and passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub text: String,
    #[serde(alias = "start_time")]
    pub start_time: f64,
    #[serde(alias = "end_time")]
    pub end_time: f64,
    #[serde(default)]
    pub words: Vec<Word>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<serde_json::Value>,
}

impl Sentence {
    pub fn new(text: impl Into<String>, start_time: f64, end_time: f64, words: Vec<Word>) -> Self {
        Self {
            text: text.into(),
            start_time,
            end_time,
            words,
            translation: None,
        }
    }

    /// Attach an opaque translation payload.
    pub fn with_translation(mut self, translation: serde_json::Value) -> Self {
        self.translation = Some(translation);
        self
    }

    /// Whether `time` falls inside the closed interval `[start_time, end_time]`.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time
    }
}

/// How strictly to check a TimeIndex when it is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Accept the data as delivered
    #[default]
    Trust,
    /// Fail on the first ordering or interval violation
    Strict,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IndexDocument {
    Wrapped { sentences: Vec<Sentence> },
    Bare(Vec<Sentence>),
}

/// Ordered, immutable collection of sentences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeIndex {
    sentences: Vec<Sentence>,
}

impl TimeIndex {
    /// Build an index from sentences without checking invariants.
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    /// Build an index and fail fast on the first invariant violation.
    pub fn validated(sentences: Vec<Sentence>) -> Result<Self, TimeIndexError> {
        let index = Self::new(sentences);
        index.validate()?;
        Ok(index)
    }

    /// Parse an index from a JSON file
    pub fn parse<P: AsRef<Path>>(path: P, mode: ValidationMode) -> Result<Self> {
        let path = path.as_ref();
        let file =
            fs::File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
        let reader = BufReader::new(file);

        Self::parse_reader(reader, mode)
            .with_context(|| format!("Failed to load time index from {:?}", path))
    }

    /// Parse an index from a reader
    pub fn parse_reader<R: Read>(reader: R, mode: ValidationMode) -> Result<Self> {
        let document: IndexDocument =
            serde_json::from_reader(reader).context("Failed to parse time index JSON")?;

        let sentences = match document {
            IndexDocument::Wrapped { sentences } => sentences,
            IndexDocument::Bare(sentences) => sentences,
        };

        let index = Self::new(sentences);
        if mode == ValidationMode::Strict {
            index.validate().context("Time index failed validation")?;
        }
        Ok(index)
    }

    /// Parse from a string
    pub fn parse_str(content: &str, mode: ValidationMode) -> Result<Self> {
        Self::parse_reader(content.as_bytes(), mode)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize time index")
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn sentence(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    pub fn word(&self, sentence: usize, word: usize) -> Option<&Word> {
        self.sentence(sentence).and_then(|s| s.words.get(word))
    }

    /// Total number of words across all sentences
    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(|s| s.words.len()).sum()
    }

    /// End of the last sentence, used when no media duration is known.
    pub fn duration_hint(&self) -> f64 {
        self.sentences.last().map(|s| s.end_time).unwrap_or(0.0)
    }
}
