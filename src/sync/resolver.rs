//! Boundary search over sentence and word intervals.

use serde::Serialize;

use crate::timeindex::{Sentence, TimeIndex};

/// Absorbs decimal representation error when comparing against the snap threshold.
const SNAP_EPSILON: f64 = 1e-9;

/// A resolved location in the index.
///
/// `sentence == None` means the time falls in an inter-sentence gap or outside
/// the index; `word` is then always `None`. A `Some` sentence with a `None`
/// word means the time sits in an unresolved intra-sentence gap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Position {
    pub sentence: Option<usize>,
    pub word: Option<usize>,
}

impl Position {
    pub const NONE: Position = Position {
        sentence: None,
        word: None,
    };

    pub fn new(sentence: usize, word: Option<usize>) -> Self {
        Self {
            sentence: Some(sentence),
            word,
        }
    }
}

/// Resolve `time` to the first sentence containing it and the word within.
///
/// Sentences are closed intervals, words are half-open. When no word contains
/// `time`, the nearest word is used if it is within `snap_threshold` seconds;
/// otherwise the word is left unresolved.
pub fn resolve(index: &TimeIndex, time: f64, snap_threshold: f64) -> Position {
    if index.is_empty() || !time.is_finite() {
        return Position::NONE;
    }

    let Some(sentence_idx) = index.sentences().iter().position(|s| s.contains(time)) else {
        return Position::NONE;
    };

    let sentence = &index.sentences()[sentence_idx];
    if let Some(word_idx) = sentence.words.iter().position(|w| w.contains(time)) {
        return Position::new(sentence_idx, Some(word_idx));
    }

    let word = nearest_word(sentence, time)
        .filter(|&(_, distance)| distance <= snap_threshold + SNAP_EPSILON)
        .map(|(word_idx, _)| word_idx);

    Position::new(sentence_idx, word)
}

/// Nearest word boundary to `time` within a sentence, as `(word index, distance)`.
///
/// Ties go to the earlier word.
pub fn nearest_word(sentence: &Sentence, time: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, word) in sentence.words.iter().enumerate() {
        let distance = word.distance_to(time);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((idx, distance)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::DEFAULT_SNAP_THRESHOLD;
    use crate::timeindex::Word;

    fn resolve_default(index: &TimeIndex, time: f64) -> Position {
        resolve(index, time, DEFAULT_SNAP_THRESHOLD)
    }

    fn two_sentences() -> TimeIndex {
        TimeIndex::new(vec![
            Sentence::new(
                "Hello world.",
                0.0,
                10.0,
                vec![Word::new("Hello", 0.0, 1.0), Word::new("world", 1.8, 2.5)],
            ),
            Sentence::new(
                "Bye now.",
                12.0,
                14.0,
                vec![Word::new("Bye", 12.0, 12.5), Word::new("now", 13.0, 14.0)],
            ),
        ])
    }

    #[test]
    fn empty_index_resolves_to_nothing() {
        assert_eq!(resolve_default(&TimeIndex::default(), 1.0), Position::NONE);
    }

    #[test]
    fn every_time_inside_a_sentence_resolves_to_it() {
        let index = two_sentences();
        for step in 0..=100 {
            let t = step as f64 / 10.0;
            assert_eq!(resolve_default(&index, t).sentence, Some(0), "t = {}", t);
        }
        for step in 0..=20 {
            let t = 12.0 + step as f64 / 10.0;
            assert_eq!(resolve_default(&index, t).sentence, Some(1), "t = {}", t);
        }
    }

    #[test]
    fn inter_sentence_gap_has_no_sentence() {
        let index = two_sentences();
        assert_eq!(resolve_default(&index, 11.0), Position::NONE);
        assert_eq!(resolve_default(&index, 10.0001), Position::NONE);
    }

    #[test]
    fn out_of_range_times_have_no_sentence() {
        let index = two_sentences();
        assert_eq!(resolve_default(&index, -1.0), Position::NONE);
        assert_eq!(resolve_default(&index, 99.0), Position::NONE);
        assert_eq!(resolve_default(&index, f64::NAN), Position::NONE);
    }

    #[test]
    fn exact_word_match() {
        let index = two_sentences();
        assert_eq!(resolve_default(&index, 0.0), Position::new(0, Some(0)));
        assert_eq!(resolve_default(&index, 0.99), Position::new(0, Some(0)));
        assert_eq!(resolve_default(&index, 2.0), Position::new(0, Some(1)));
        assert_eq!(resolve_default(&index, 13.5), Position::new(1, Some(1)));
    }

    #[test]
    fn word_end_is_exclusive() {
        let index = TimeIndex::new(vec![Sentence::new(
            "ab",
            0.0,
            2.0,
            vec![Word::new("a", 0.0, 1.0), Word::new("b", 1.0, 2.0)],
        )]);
        assert_eq!(resolve_default(&index, 1.0), Position::new(0, Some(1)));
    }

    #[test]
    fn gap_within_threshold_snaps_to_nearest_word() {
        let index = two_sentences();
        // 0.3 past "Hello", 0.5 before "world"
        assert_eq!(resolve_default(&index, 1.3), Position::new(0, Some(0)));
        // 0.1 before "world"
        assert_eq!(resolve_default(&index, 1.7), Position::new(0, Some(1)));
    }

    #[test]
    fn gap_beyond_threshold_leaves_word_unknown() {
        let index = two_sentences();
        // 0.4 from both words
        assert_eq!(resolve_default(&index, 1.4), Position::new(0, None));
        // trailing silence long after the last word
        assert_eq!(resolve_default(&index, 9.0), Position::new(0, None));
    }

    #[test]
    fn snap_threshold_is_tunable() {
        let index = two_sentences();
        assert_eq!(resolve(&index, 1.4, 0.5), Position::new(0, Some(0)));
        assert_eq!(resolve(&index, 1.3, 0.1), Position::new(0, None));
    }

    #[test]
    fn sentence_without_words_resolves_sentence_only() {
        let index = TimeIndex::new(vec![Sentence::new("...", 0.0, 3.0, vec![])]);
        assert_eq!(resolve_default(&index, 1.0), Position::new(0, None));
    }

    #[test]
    fn overlapping_sentences_pick_the_first() {
        let index = TimeIndex::new(vec![
            Sentence::new("a", 0.0, 5.0, vec![]),
            Sentence::new("b", 4.0, 8.0, vec![]),
        ]);
        assert_eq!(resolve_default(&index, 4.5).sentence, Some(0));
        assert_eq!(resolve_default(&index, 6.0).sentence, Some(1));
    }

    #[test]
    fn nearest_word_prefers_earlier_on_tie() {
        let sentence = Sentence::new(
            "ab",
            0.0,
            3.0,
            vec![Word::new("a", 0.0, 1.0), Word::new("b", 2.0, 3.0)],
        );
        let (idx, distance) = nearest_word(&sentence, 1.5).unwrap();
        assert_eq!(idx, 0);
        assert!((distance - 0.5).abs() < 1e-9);
        assert!(nearest_word(&Sentence::new("", 0.0, 1.0, vec![]), 0.5).is_none());
    }
}
