//! Integration tests for the playback controller

use std::cell::RefCell;
use std::rc::Rc;

use super::helpers::{frame_at, load_fixture, loaded_player};
use readalong::player::{
    Callbacks, EventLog, FrameScheduler, PlaybackController, PlaybackError, Scheduler, SyncEvent,
};
use readalong::testing::{FakeAudio, Shared};
use readalong::SyncConfig;

#[test]
fn reads_along_through_a_lesson() {
    let mut player = loaded_player("lesson.json", 6.0);
    let log = EventLog::new();
    player.subscribe(log.clone());

    player.play();
    player.pump();

    assert_eq!(frame_at(&mut player, 0.2), (Some(0), Some(0)));
    assert_eq!(frame_at(&mut player, 1.4), (Some(0), Some(0))); // retained through the gap
    assert_eq!(frame_at(&mut player, 2.0), (Some(0), Some(1)));
    assert_eq!(frame_at(&mut player, 2.75), (None, None));
    assert_eq!(frame_at(&mut player, 3.1), (Some(1), Some(0)));
    assert_eq!(frame_at(&mut player, 3.5), (Some(1), Some(1)));
    assert_eq!(frame_at(&mut player, 4.2), (Some(1), Some(1))); // 0.3 past "cat"
    assert_eq!(frame_at(&mut player, 4.8), (Some(1), Some(2)));

    player.audio_mut().finish();
    player.pump();

    assert_eq!(
        log.drain(),
        vec![
            SyncEvent::SentenceChanged(0),
            SyncEvent::WordChanged(0),
            SyncEvent::WordChanged(1),
            SyncEvent::SentenceChanged(1),
            SyncEvent::WordChanged(0),
            SyncEvent::WordChanged(1),
            SyncEvent::WordChanged(2),
            SyncEvent::Ended,
        ]
    );
    assert!(!player.state().is_playing);
    assert_eq!(player.state().current_time, 0.0);
}

#[test]
fn closure_callbacks_receive_indices() {
    let mut player = loaded_player("lesson.json", 6.0);
    let words = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&words);
    player.subscribe(Callbacks::new().on_word_change(move |i| sink.borrow_mut().push(i)));

    player.seek_to_word(1, 2).unwrap();
    player.seek_to_word(0, 1).unwrap();

    assert_eq!(*words.borrow(), vec![2, 1]);
}

#[test]
fn lead_in_before_a_sentence_start_settles_on_the_next_tick() {
    let mut player = loaded_player("lesson.json", 6.0);
    player.seek_to_word(1, 0).unwrap();
    // 2.95 sits between the two sentences
    assert_eq!(player.state().current_sentence, None);

    player.play();
    player.pump();
    assert_eq!(frame_at(&mut player, 3.05), (Some(1), Some(0)));
}

#[test]
fn one_tick_per_frame_despite_repeated_play() {
    let mut player = loaded_player("lesson.json", 6.0);
    for _ in 0..5 {
        player.play();
    }
    player.pump();
    player.play();

    for frame in 1..=10 {
        frame_at(&mut player, frame as f64 * 0.1);
        assert_eq!(player.tick_count(), frame);
    }
    assert_eq!(player.audio().play_requests(), 1);
}

#[test]
fn autoplay_rejection_then_user_retry() {
    let mut player = loaded_player("lesson.json", 6.0);
    player.audio_mut().reject_next_play("NotAllowedError");
    player.play();
    player.pump();
    assert!(matches!(
        player.state().error,
        Some(PlaybackError::PlaybackRejected(_))
    ));

    player.play();
    player.pump();
    assert!(player.state().is_playing);
    assert!(player.state().error.is_none());
}

#[test]
fn rate_change_does_not_move_indices() {
    let mut player = loaded_player("lesson.json", 6.0);
    player.seek_to(3.5);
    let before = player.state().clone();

    player.set_playback_rate(2.0).unwrap();
    assert_eq!(player.state().current_sentence, before.current_sentence);
    assert_eq!(player.state().current_word, before.current_word);
    assert_eq!(player.state().playback_rate, 2.0);
}

#[test]
fn dropping_the_player_releases_the_resource() {
    let audio = Shared::new(FakeAudio::new(6.0));
    let scheduler = Shared::new(FrameScheduler::new());
    let mut player =
        PlaybackController::new(audio.clone(), scheduler.clone(), SyncConfig::default());
    player.load("lesson.mp3", load_fixture("lesson.json"));
    player.play();
    player.pump();
    assert!(audio.borrow().is_playing());
    assert_eq!(scheduler.borrow().pending(), 1);

    drop(player);

    assert!(!audio.borrow().is_playing());
    assert_eq!(scheduler.borrow().pending(), 0);
    assert!(scheduler.borrow_mut().take_due().is_empty());
}
