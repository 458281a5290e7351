//! End-to-end behaviour of the exam view controller, driven on a paused clock

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use exam_ivr::app::{ExamController, Timing};
use exam_ivr::exam::{
    Action, Control, CountdownState, ExamPaper, QuestionSet, Screen, Session, TaskKind,
};
use exam_ivr::speech::{RecordingBackend, Speaker};
use std::time::Duration;
use tokio::time::Instant;

fn controller_with(paper: ExamPaper) -> (ExamController, RecordingBackend) {
    let recorder = RecordingBackend::new();
    let speaker = Speaker::new(Box::new(recorder.clone()));
    let mut controller = ExamController::new(paper, speaker, Timing::default());
    controller.mount();
    (controller, recorder)
}

fn controller() -> (ExamController, RecordingBackend) {
    controller_with(ExamPaper::default())
}

/// Paused-clock timers fire at their deadline, rounded to the timer resolution
fn assert_elapsed(since: Instant, expected: Duration) {
    let elapsed = since.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(5),
        "expected ~{:?}, got {:?}",
        expected,
        elapsed
    );
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[tokio::test(start_paused = true)]
async fn test_dictate_then_next_discards_answer() {
    let (mut c, recorder) = controller();

    c.handle_key(key(KeyCode::Char('1')));
    assert!(c.session().dictating);
    assert_eq!(c.session().active_control, Some(Control::Answer));
    assert!(!c.view().input_focused);

    // Focus arrives shortly after, well before the first tick
    let started = Instant::now();
    let event = c.next_scheduled().await.unwrap();
    assert_eq!(event.kind, TaskKind::Focus);
    assert_elapsed(started, Duration::from_millis(100));
    c.handle_scheduled(event);
    assert!(c.view().input_focused);

    for ch in "Paris".chars() {
        c.handle_key(key(KeyCode::Char(ch)));
    }
    assert_eq!(c.session().answer_text, "Paris");

    c.handle_key(key(KeyCode::F(3)));
    assert!(!c.session().dictating);
    assert_eq!(c.session().answer_text, "");
    assert_eq!(c.session().question_index, 2);
    assert!(!c.view().input_focused);

    assert_eq!(
        recorder.spoken(),
        vec!["Dictation mode started. Speak your answer.".to_string()]
    );
}

#[tokio::test(start_paused = true)]
async fn test_stop_keeps_answer_and_cancels_pending_focus() {
    let (mut c, recorder) = controller();

    c.dispatch(Action::Press(Control::Answer));
    c.dispatch(Action::Type('4'));
    c.dispatch(Action::Type('2'));
    c.dispatch(Action::Press(Control::Stop));

    assert!(!c.session().dictating);
    assert_eq!(c.session().answer_text, "42");
    assert_eq!(recorder.audible(), vec!["Answer saved.".to_string()]);

    // The focus request was cancelled; the next thing to fire is the countdown
    let event = c.next_scheduled().await.unwrap();
    assert_eq!(event.kind, TaskKind::Tick);
    c.handle_scheduled(event);
    assert!(!c.view().input_focused);
    assert_eq!(c.session().remaining_seconds, 299);
}

#[tokio::test(start_paused = true)]
async fn test_read_again_twice_is_never_overlapping() {
    let (mut c, recorder) = controller();

    c.handle_key(key(KeyCode::Char('2')));
    c.handle_key(key(KeyCode::Char('2')));

    assert_eq!(recorder.spoken().len(), 2);
    assert_eq!(
        recorder.audible(),
        vec!["What is the capital of France?".to_string()]
    );
    assert_eq!(c.session().active_control, Some(Control::ReadAgain));
}

#[tokio::test(start_paused = true)]
async fn test_submit_waits_fixed_delay_then_finishes() {
    let (mut c, _recorder) = controller();

    for _ in 0..4 {
        c.handle_key(key(KeyCode::Right));
    }
    assert_eq!(c.session().question_index, 5);
    assert!(!c.session().is_enabled(Control::Next, 5));

    let submitted_at = Instant::now();
    c.handle_key(key(KeyCode::Char('s')));
    assert_eq!(c.session().screen, Screen::Loading);
    assert!(!c.scheduler().is_pending(TaskKind::Tick));
    assert_eq!(c.countdown().state(), CountdownState::Idle);

    // Nothing the user presses changes the loading screen
    for code in [KeyCode::Enter, KeyCode::Char('1'), KeyCode::Char('s'), KeyCode::Left] {
        c.handle_key(key(code));
    }
    assert_eq!(c.session().screen, Screen::Loading);

    let event = c.next_scheduled().await.unwrap();
    assert_eq!(event.kind, TaskKind::SubmitComplete);
    assert_elapsed(submitted_at, Duration::from_millis(2000));
    c.handle_scheduled(event);
    assert_eq!(c.session().screen, Screen::Finish);
}

#[tokio::test(start_paused = true)]
async fn test_finish_resets_session_and_restarts_countdown() {
    let (mut c, _recorder) = controller();

    // Let some time pass and leave a tick queued but unapplied
    let event = c.next_scheduled().await.unwrap();
    c.handle_scheduled(event);
    let stale_tick = c.next_scheduled().await.unwrap();
    assert_eq!(stale_tick.kind, TaskKind::Tick);

    for _ in 0..4 {
        c.dispatch(Action::Press(Control::Next));
    }
    c.dispatch(Action::Press(Control::Answer));
    c.dispatch(Action::Submit);
    assert_eq!(c.session().remaining_seconds, 299);

    // A tick scheduled before submit must not count down anything
    c.handle_scheduled(stale_tick);
    assert_eq!(c.session().remaining_seconds, 299);

    let event = c.next_scheduled().await.unwrap();
    c.handle_scheduled(event);
    assert_eq!(c.session().screen, Screen::Finish);

    c.handle_key(key(KeyCode::Enter));
    assert_eq!(*c.session(), Session::new(300));
    assert_eq!(c.countdown().state(), CountdownState::Running);

    // Still stale after the reset
    c.handle_scheduled(stale_tick);
    assert_eq!(c.session().remaining_seconds, 300);

    let event = c.next_scheduled().await.unwrap();
    assert_eq!(event.kind, TaskKind::Tick);
    c.handle_scheduled(event);
    assert_eq!(c.session().remaining_seconds, 299);
}

#[tokio::test(start_paused = true)]
async fn test_countdown_expires_and_holds() {
    let (mut c, _recorder) = controller_with(ExamPaper::new(QuestionSet::builtin(), 3));

    for expected in [2, 1, 0] {
        let event = c.next_scheduled().await.unwrap();
        assert_eq!(event.kind, TaskKind::Tick);
        c.handle_scheduled(event);
        assert_eq!(c.session().remaining_seconds, expected);
    }

    assert_eq!(c.countdown().state(), CountdownState::Expired);
    assert!(!c.scheduler().is_pending(TaskKind::Tick));

    // No automatic submission; the exam stays open at 00:00
    c.dispatch(Action::Tick);
    assert_eq!(c.session().remaining_seconds, 0);
    assert_eq!(c.session().screen, Screen::Question);
}

#[tokio::test(start_paused = true)]
async fn test_quit_and_unmount() {
    let (mut c, recorder) = controller();

    c.handle_key(key(KeyCode::Char('1')));
    assert!(c.scheduler().is_pending(TaskKind::Focus));
    assert!(!recorder.audible().is_empty());

    c.handle_key(key(KeyCode::Char('q')));
    assert!(c.should_quit());

    c.unmount();
    assert!(!c.scheduler().is_pending(TaskKind::Tick));
    assert!(recorder.audible().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_unmount_cancels_pending_focus() {
    let (mut c, _recorder) = controller();

    c.dispatch(Action::Press(Control::Answer));
    assert!(c.scheduler().is_pending(TaskKind::Focus));

    c.unmount();
    assert!(!c.scheduler().is_pending(TaskKind::Focus));

    tokio::time::sleep(Duration::from_secs(5)).await;
    c.drain_scheduled();
    assert!(!c.view().input_focused);
    assert_eq!(c.session().remaining_seconds, 300);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_cancels_pending_submission() {
    let (mut c, recorder) = controller();

    for _ in 0..4 {
        c.dispatch(Action::Press(Control::Next));
    }
    c.dispatch(Action::Press(Control::Answer));
    c.dispatch(Action::Submit);
    assert_eq!(c.session().screen, Screen::Loading);
    assert!(c.scheduler().is_pending(TaskKind::SubmitComplete));

    c.unmount();
    assert!(!c.scheduler().is_pending(TaskKind::SubmitComplete));
    assert!(!c.scheduler().is_pending(TaskKind::Focus));
    assert!(recorder.audible().is_empty());

    // Well past the submission delay, nothing completes the submission
    tokio::time::sleep(Duration::from_secs(5)).await;
    c.drain_scheduled();
    assert_eq!(c.session().screen, Screen::Loading);
    assert!(!c.view().input_focused);
}
