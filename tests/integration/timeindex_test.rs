//! Integration tests for time index loading

use super::helpers::{fixtures_dir, load_fixture, temp_fixture};
use readalong::timeindex::TimeIndexError;
use readalong::{resolve, Position, TimeIndex, ValidationMode};

#[test]
fn lesson_fixture_loads_and_validates() {
    let index = load_fixture("lesson.json");
    assert_eq!(index.len(), 2);
    assert_eq!(index.word_count(), 5);
    assert!(index.validate().is_ok());
    assert_eq!(index.duration_hint(), 5.0);
}

#[test]
fn translation_payload_survives_loading() {
    let index = load_fixture("lesson.json");
    let translation = index.sentence(0).unwrap().translation.as_ref().unwrap();
    assert_eq!(translation["text"], "Hola mundo.");
}

#[test]
fn overlapping_fixture_is_trusted_by_default() {
    let index = load_fixture("overlapping.json");
    // First containing sentence wins
    assert_eq!(resolve(&index, 1.75, 0.3).sentence, Some(0));
    assert_eq!(
        index.validate(),
        Err(TimeIndexError::OverlappingSentences {
            sentence: 0,
            next: 1
        })
    );
}

#[test]
fn strict_parse_rejects_overlapping_fixture() {
    let result = TimeIndex::parse(fixtures_dir().join("overlapping.json"), ValidationMode::Strict);
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("overlaps"));
}

#[test]
fn missing_file_reports_path() {
    let err = TimeIndex::parse("/nonexistent/index.json", ValidationMode::Trust).unwrap_err();
    assert!(format!("{:#}", err).contains("nonexistent"));
}

#[test]
fn index_written_back_reloads_identically() {
    let (temp_dir, path) = temp_fixture("lesson.json");
    let index = TimeIndex::parse(&path, ValidationMode::Strict).unwrap();

    let copy = temp_dir.path().join("copy.json");
    std::fs::write(&copy, index.to_json().unwrap()).unwrap();
    assert_eq!(TimeIndex::parse(&copy, ValidationMode::Strict).unwrap(), index);
}

#[test]
fn resolver_properties_hold_on_fixture() {
    let index = load_fixture("lesson.json");

    // Containment: every sampled time inside a sentence resolves to it
    for (i, sentence) in index.sentences().iter().enumerate() {
        let steps = 20;
        for step in 0..=steps {
            let t = sentence.start_time
                + (sentence.end_time - sentence.start_time) * step as f64 / steps as f64;
            assert_eq!(resolve(&index, t, 0.3).sentence, Some(i), "t = {}", t);
        }
        // Word exactness
        for (j, word) in sentence.words.iter().enumerate() {
            let mid = (word.start + word.end) / 2.0;
            assert_eq!(resolve(&index, word.start, 0.3), Position::new(i, Some(j)));
            assert_eq!(resolve(&index, mid, 0.3), Position::new(i, Some(j)));
        }
    }

    // Gap between sentences
    assert_eq!(resolve(&index, 2.75, 0.3), Position::NONE);
}
