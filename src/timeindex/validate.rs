//! Invariant checks for a TimeIndex.

use super::TimeIndex;

/// First ordering or interval violation found in a TimeIndex.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeIndexError {
    #[error("Sentence {sentence} has a non-finite timestamp")]
    NonFiniteTimestamp { sentence: usize },

    #[error("Sentence {sentence} ends ({end}) before it starts ({start})")]
    InvertedSentence { sentence: usize, start: f64, end: f64 },

    #[error("Word {word} of sentence {sentence} must start before it ends ({start} >= {end})")]
    InvertedWord {
        sentence: usize,
        word: usize,
        start: f64,
        end: f64,
    },

    #[error("Words {word} and {next} of sentence {sentence} are out of order")]
    UnsortedWords {
        sentence: usize,
        word: usize,
        next: usize,
    },

    #[error("Word {word} of sentence {sentence} overlaps the following word")]
    OverlappingWords { sentence: usize, word: usize },

    #[error("Sentences {sentence} and {next} are out of order")]
    UnsortedSentences { sentence: usize, next: usize },

    #[error("Sentence {sentence} overlaps sentence {next}")]
    OverlappingSentences { sentence: usize, next: usize },
}

impl TimeIndex {
    /// Check ordering and interval invariants.
    ///
    /// Words drifting outside their sentence bounds are tolerated; the
    /// resolver copes with minor drift.
    pub fn validate(&self) -> Result<(), TimeIndexError> {
        for (i, sentence) in self.sentences().iter().enumerate() {
            let timestamps_finite = sentence.start_time.is_finite()
                && sentence.end_time.is_finite()
                && sentence
                    .words
                    .iter()
                    .all(|w| w.start.is_finite() && w.end.is_finite());
            if !timestamps_finite {
                return Err(TimeIndexError::NonFiniteTimestamp { sentence: i });
            }

            if sentence.start_time > sentence.end_time {
                return Err(TimeIndexError::InvertedSentence {
                    sentence: i,
                    start: sentence.start_time,
                    end: sentence.end_time,
                });
            }

            for (j, word) in sentence.words.iter().enumerate() {
                if word.start >= word.end {
                    return Err(TimeIndexError::InvertedWord {
                        sentence: i,
                        word: j,
                        start: word.start,
                        end: word.end,
                    });
                }
                if word.start < sentence.start_time || word.end > sentence.end_time {
                    tracing::debug!(
                        sentence = i,
                        word = j,
                        "word drifts outside its sentence bounds"
                    );
                }
            }

            for (j, pair) in sentence.words.windows(2).enumerate() {
                if pair[1].start < pair[0].start {
                    return Err(TimeIndexError::UnsortedWords {
                        sentence: i,
                        word: j,
                        next: j + 1,
                    });
                }
                if pair[0].end > pair[1].start {
                    return Err(TimeIndexError::OverlappingWords {
                        sentence: i,
                        word: j,
                    });
                }
            }
        }

        for (i, pair) in self.sentences().windows(2).enumerate() {
            if pair[1].start_time < pair[0].start_time {
                return Err(TimeIndexError::UnsortedSentences {
                    sentence: i,
                    next: i + 1,
                });
            }
            if pair[0].end_time > pair[1].start_time {
                return Err(TimeIndexError::OverlappingSentences {
                    sentence: i,
                    next: i + 1,
                });
            }
        }

        Ok(())
    }
}
