use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dioxus::prelude::ReadableExt;
use quiz_core::model::{Answer, Difficulty, Question, QuizSettings, ResultsRecord};
use services::{QuestionRequest, QuestionSource, ResultsService, SourceError};
use storage::keys;
use storage::repository::Storage;

use super::test_harness::{FixedSource, ViewKind, setup_view_harness, setup_view_harness_with_storage};
use crate::vm::QuizIntent;

fn stored_record() -> ResultsRecord {
    let question = Question::new(
        "Largest planet?",
        vec!["Jupiter".into(), "Mars".into(), "Venus".into()],
        0,
    )
    .unwrap();
    ResultsRecord::from_answers(vec![
        Answer::new(question.clone(), Some(1)),
        Answer::new(question, Some(0)),
    ])
}

/// Serves fixed questions on the first fetch and times out afterwards.
struct FailsAfterFirst {
    calls: AtomicUsize,
}

#[async_trait]
impl QuestionSource for FailsAfterFirst {
    async fn fetch(&self, request: QuestionRequest) -> Result<Vec<Question>, SourceError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            FixedSource { count: 5 }.fetch(request).await
        } else {
            Err(SourceError::Timeout)
        }
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz { restart: false },
        Arc::new(FixedSource { count: 5 }),
    );
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question number 0?"), "missing prompt in {html}");
    assert!(html.contains("Question 1 of 5"), "missing position in {html}");
    assert!(html.contains("Time: 30s"), "missing timer in {html}");
    assert!(html.contains("Any difficulty"), "missing settings in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_insufficient_data() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz { restart: true },
        Arc::new(FixedSource { count: 3 }),
    );
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Not enough questions"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_advances_and_saves_results() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz { restart: true },
        Arc::new(FixedSource { count: 5 }),
    );
    harness.settle().await;

    let handles = harness.quiz_handles.clone().unwrap();
    let dispatch = handles.dispatch();
    let session = handles.session();
    harness.dom.in_runtime(|| {
        dispatch.call(QuizIntent::Select(0));
        dispatch.call(QuizIntent::Lock);
    });
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 5"), "did not advance in {html}");
    let answered = harness
        .dom
        .in_runtime(|| session.peek().as_ref().map(|s| s.answers().len()));
    assert_eq!(answered, Some(1));

    // Completing the quiz navigates away, so only storage is inspected afterwards.
    harness.dom.in_runtime(|| {
        for _ in 0..4 {
            dispatch.call(QuizIntent::Skip);
        }
    });
    for _ in 0..3 {
        harness.drive_async().await;
    }

    let record = harness.quiz_loop.results().load().await.unwrap();
    assert_eq!(record.total(), 5);
    assert_eq!(record.score(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_new_question_gets_full_countdown() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz { restart: true },
        Arc::new(FixedSource { count: 5 }),
    );
    harness.settle().await;
    let dispatch = harness.quiz_handles.clone().unwrap().dispatch();

    // Most of the first question's second has elapsed when it is answered.
    tokio::time::sleep(Duration::from_millis(700)).await;
    harness.dom.in_runtime(|| {
        dispatch.call(QuizIntent::Select(0));
        dispatch.call(QuizIntent::Lock);
    });
    harness.drive_async().await;
    harness.drive_async().await;

    tokio::time::sleep(Duration::from_millis(400)).await;
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Question 2 of 5"), "did not advance in {html}");
    assert!(html.contains("Time: 30s"), "countdown carried over in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_failed_restart_hides_old_questions() {
    let mut harness = setup_view_harness(
        ViewKind::Quiz { restart: true },
        Arc::new(FailsAfterFirst {
            calls: AtomicUsize::new(0),
        }),
    );
    harness.settle().await;
    assert!(harness.render().contains("Question number 0?"));

    let start_fresh = harness.quiz_handles.clone().unwrap().start_fresh();
    harness.dom.in_runtime(|| {
        start_fresh.call(QuizSettings {
            difficulty: Difficulty::Hard,
            ..QuizSettings::default()
        });
    });
    for _ in 0..3 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("Could not load questions"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(!html.contains("Question number 0?"), "stale question shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_resumes_stored_questions() {
    let storage = Storage::in_memory();
    ResultsService::new(Arc::clone(&storage.kv))
        .save(&stored_record())
        .await
        .unwrap();

    let mut harness = setup_view_harness_with_storage(
        ViewKind::Quiz { restart: false },
        Arc::new(FixedSource { count: 5 }),
        storage,
    );
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Largest planet?"), "missing stored prompt in {html}");
    assert!(html.contains("Question 1 of 2"), "missing position in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_marks_answers() {
    let storage = Storage::in_memory();
    ResultsService::new(Arc::clone(&storage.kv))
        .save(&stored_record())
        .await
        .unwrap();

    let mut harness =
        setup_view_harness_with_storage(ViewKind::Results, Arc::new(FixedSource { count: 5 }), storage);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("You scored 1/2"), "missing headline in {html}");
    assert!(html.contains("Q2."), "missing numbering in {html}");
    assert!(html.contains("option correct"), "missing correct mark in {html}");
    assert!(html.contains("option incorrect"), "missing wrong mark in {html}");
    assert!(html.contains("Take New Quiz"), "missing restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_corrupt_record_renders_empty_state() {
    let storage = Storage::in_memory();
    storage.kv.set(keys::RESULTS, "{not json").await.unwrap();

    let mut harness =
        setup_view_harness_with_storage(ViewKind::Results, Arc::new(FixedSource { count: 5 }), storage);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("You scored 0/0"), "missing headline in {html}");
    assert!(html.contains("No results yet."), "missing empty state in {html}");
}
