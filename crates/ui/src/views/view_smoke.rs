use services::{QuizIntent, SessionPhase};
use storage::repository::{InMemoryScoreStore, ScoreStore};

use super::test_harness::{ViewKind, drive_quiz, question, setup_view_harness, spawn_quiz};

#[tokio::test(flavor = "current_thread")]
async fn start_view_smoke_renders_difficulty_picker() {
    let store = InMemoryScoreStore::new();
    let quiz = spawn_quiz(vec![question("q1", "First?", 0)], &store);
    let mut harness = setup_view_harness(ViewKind::Start, quiz, store);

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Start Quiz"), "missing title in {html}");
    assert!(html.contains("Difficulty"), "missing label in {html}");
    assert!(html.contains("Medium"), "missing option in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_active_question() {
    let store = InMemoryScoreStore::new();
    let quiz = spawn_quiz(
        vec![
            question("q1", "Which letter comes first?", 0),
            question("q2", "Which letter comes second?", 1),
        ],
        &store,
    );
    drive_quiz(&quiz, &[QuizIntent::Start(None)], |snap| snap.is_active()).await;

    let mut harness = setup_view_harness(ViewKind::Quiz, quiz, store);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Which letter comes first?"), "missing prompt in {html}");
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");
    assert!(html.contains("Time left: 30s"), "missing timer in {html}");
    assert!(html.contains("Option 4: Delta"), "missing option label in {html}");
    assert!(html.contains("General"), "missing category in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_selection_and_finish() {
    let store = InMemoryScoreStore::new();
    let quiz = spawn_quiz(vec![question("q1", "Only question?", 2)], &store);
    drive_quiz(
        &quiz,
        &[QuizIntent::Start(None), QuizIntent::Select(1)],
        |snap| snap.selection == Some(1),
    )
    .await;

    let mut harness = setup_view_harness(ViewKind::Quiz, quiz, store);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Selected: Beta"), "missing selection in {html}");
    assert!(html.contains("Finish"), "missing finish button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_missing_questions() {
    let store = InMemoryScoreStore::new();
    let quiz = spawn_quiz(Vec::new(), &store);
    drive_quiz(&quiz, &[QuizIntent::Start(None)], |snap| {
        snap.phase == SessionPhase::Terminal
    })
    .await;

    let mut harness = setup_view_harness(ViewKind::Quiz, quiz, store);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No questions available."), "missing message in {html}");
    assert!(html.contains("Back to start"), "missing action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_breakdown() {
    let store = InMemoryScoreStore::with_raw("1");
    let quiz = spawn_quiz(
        vec![question("q1", "Pick alpha", 0), question("q2", "Pick beta", 1)],
        &store,
    );
    drive_quiz(
        &quiz,
        &[
            QuizIntent::Start(None),
            QuizIntent::Select(0),
            QuizIntent::Next,
            QuizIntent::Select(3),
            QuizIntent::Finish,
        ],
        |snap| snap.result.is_some(),
    )
    .await;

    let mut harness = setup_view_harness(ViewKind::Results, quiz, store);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("You scored 1/2 (50%)"), "missing score in {html}");
    assert!(html.contains("Best score: 1/2"), "missing best in {html}");
    assert!(
        html.contains("Your answer: Delta | Correct answer: Beta"),
        "missing breakdown in {html}"
    );
    assert!(html.contains("Restart Quiz"), "missing restart in {html}");
    assert_eq!(harness.store.read_best().await.unwrap(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_without_result() {
    let store = InMemoryScoreStore::new();
    let quiz = spawn_quiz(vec![question("q1", "First?", 0)], &store);
    let mut harness = setup_view_harness(ViewKind::Results, quiz, store);

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No results to show."), "missing empty state in {html}");
    assert_eq!(harness.quiz.snapshot().phase, SessionPhase::Idle);
}
