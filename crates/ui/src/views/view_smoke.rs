use std::time::Duration;

use quiz_core::REVEAL_DELAY;
use quiz_core::model::{QuestionBank, QuestionDraft};
use services::{AudioCall, MusicTrack};

use super::GameIntent;
use super::test_harness::{setup_view_harness, single_question_bank, stored_high_score};

#[tokio::test(flavor = "current_thread")]
async fn menu_smoke_renders_high_score_without_music() {
    let mut harness = setup_view_harness(single_question_bank(), 7).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("High score: 7"), "missing high score in {html}");
    assert!(html.contains("Start quiz"), "missing start button in {html}");
    assert!(harness.audio.calls().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_smoke_renders_question_timer_and_lives() {
    let mut harness = setup_view_harness(single_question_bank(), 0).await;
    harness.rebuild();
    harness.send(GameIntent::Start);

    let html = harness.render();
    for expected in [
        "Time: 15",
        "❤❤❤",
        "Question 1 of 1",
        "What is the capital of France?",
        "Paris",
        "Rome",
        "fade-in",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("disabled"), "options locked before answering in {html}");
    assert!(matches!(
        harness.audio.calls().first(),
        Some(AudioCall::PlayMusic {
            track: MusicTrack::Quiz,
            ..
        })
    ));
}

#[tokio::test(flavor = "current_thread")]
async fn wrong_answer_highlights_and_locks_options() {
    let mut harness = setup_view_harness(single_question_bank(), 0).await;
    harness.rebuild();
    harness.send(GameIntent::Start);
    harness.send(GameIntent::Answer("Rome".to_string()));

    let html = harness.render();
    assert!(html.contains("option correct"), "missing correct highlight in {html}");
    assert!(html.contains("option incorrect"), "missing incorrect highlight in {html}");
    assert!(html.contains("disabled"), "options not disabled in {html}");
    assert!(!html.contains("❤❤❤"), "life not lost in {html}");

    // A second answer while locked changes nothing.
    harness.send(GameIntent::Answer("Paris".to_string()));
    let controller = harness.controller();
    assert_eq!(controller.peek().session().map(|s| s.score()), Some(0));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn next_question_unlocks_options() {
    let drafts = (1..=2)
        .map(|n| QuestionDraft::new(format!("Question {n}?"), ["yes", "no"], "yes"))
        .collect();
    let bank = QuestionBank::from_drafts(drafts).expect("valid bank");
    let mut harness = setup_view_harness(bank, 0).await;
    harness.rebuild();
    harness.send(GameIntent::Start);
    harness.send(GameIntent::Answer("yes".to_string()));
    assert!(harness.render().contains("disabled"));

    tokio::time::sleep(REVEAL_DELAY + Duration::from_millis(100)).await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "did not advance in {html}");
    assert!(html.contains("Time: 15"), "timer not reset in {html}");
    assert!(!html.contains("disabled"), "options still locked in {html}");
    assert!(!html.contains("option correct"), "highlight kept in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn countdown_updates_the_timer() {
    let mut harness = setup_view_harness(single_question_bank(), 0).await;
    harness.rebuild();
    harness.send(GameIntent::Start);

    tokio::time::sleep(Duration::from_millis(1_010)).await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Time: 14"), "timer did not tick in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn result_smoke_shows_score_and_saves_high_score() {
    let mut harness = setup_view_harness(single_question_bank(), 0).await;
    harness.rebuild();
    harness.send(GameIntent::Start);
    let answer = harness.correct_answer();
    harness.send(GameIntent::Answer(answer));

    tokio::time::sleep(REVEAL_DELAY + Duration::from_millis(100)).await;
    harness.drive_async().await;

    let html = harness.render();
    for expected in ["Quiz finished!", "Your score: 1 of 1", "High score: 1", "Play again"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert_eq!(stored_high_score(&harness.repo).await, Some(1));
    assert!(matches!(
        harness.audio.calls().last(),
        Some(AudioCall::PlayMusic {
            track: MusicTrack::Results,
            ..
        })
    ));

    harness.send(GameIntent::Start);
    assert!(harness.render().contains("Time: 15"));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn running_out_of_lives_ends_early() {
    let drafts = (1..=5)
        .map(|n| QuestionDraft::new(format!("Question {n}?"), ["yes", "no"], "yes"))
        .collect();
    let bank = QuestionBank::from_drafts(drafts).expect("valid bank");
    let mut harness = setup_view_harness(bank, 4).await;
    harness.rebuild();
    harness.send(GameIntent::Start);

    for _ in 0..3 {
        harness.send(GameIntent::Answer("no".to_string()));
        tokio::time::sleep(REVEAL_DELAY + Duration::from_millis(100)).await;
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("You ran out of lives."), "missing message in {html}");
    assert!(html.contains("Your score: 0 of 5"), "missing score in {html}");
    assert!(html.contains("High score: 4"), "high score changed in {html}");
    assert_eq!(stored_high_score(&harness.repo).await, Some(4));
}

#[tokio::test(flavor = "current_thread")]
async fn audio_controls_toggle_mute_and_volume() {
    let mut harness = setup_view_harness(single_question_bank(), 0).await;
    harness.rebuild();
    assert!(!harness.render().contains("Music volume"));

    harness.send(GameIntent::ToggleAudioControls);
    let html = harness.render();
    assert!(html.contains("Music volume"), "controls hidden in {html}");
    assert!(html.contains("30%"), "missing default volume in {html}");
    assert!(!html.contains("disabled"), "slider disabled while unmuted in {html}");

    harness.send(GameIntent::ToggleMute);
    let html = harness.render();
    assert!(html.contains("Unmute"), "missing unmute label in {html}");
    assert!(html.contains("disabled"), "slider enabled while muted in {html}");
    assert!(html.contains(">0%<"), "muted slider not at zero in {html}");

    harness.send(GameIntent::SetVolume(0.5));
    let html = harness.render();
    assert!(html.contains("50%"), "volume not applied in {html}");
    assert!(!html.contains("Unmute"), "volume change did not unmute in {html}");

    harness.send(GameIntent::Start);
    assert!(!harness.render().contains("Music volume"));
}

#[tokio::test(flavor = "current_thread")]
async fn quitting_returns_to_silent_menu() {
    let mut harness = setup_view_harness(single_question_bank(), 0).await;
    harness.rebuild();
    harness.send(GameIntent::Start);
    harness.send(GameIntent::ReturnToMenu);

    assert!(harness.render().contains("Start quiz"));
    assert_eq!(harness.audio.calls().last(), Some(&AudioCall::StopMusic));
}
