use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{Difficulty, Question};
use quiz_core::time::fixed_clock;
use services::error::SourceError;
use services::{
    AppServices, LocalQuestionSource, QuestionLoader, QuestionSource, QuizConfig, QuizIntent,
    QuizService, QuizSession, SessionPhase, spawn_runner,
};
use storage::repository::{InMemoryScoreStore, ScoreStore};

struct Unreachable;

#[async_trait]
impl QuestionSource for Unreachable {
    async fn fetch(
        &self,
        _count: usize,
        _difficulty: Option<Difficulty>,
    ) -> Result<Vec<Question>, SourceError> {
        Err(SourceError::Payload("connection refused".into()))
    }
}

fn bank(count: usize) -> LocalQuestionSource {
    LocalQuestionSource::new(
        (0..count)
            .map(|i| {
                Question::new(
                    format!("q{i}"),
                    format!("Question {i}"),
                    vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    i % 4,
                )
                .unwrap()
            })
            .collect(),
    )
}

fn quiz_service(count: usize, store: &InMemoryScoreStore) -> Arc<QuizService> {
    let loader = QuestionLoader::new(Arc::new(Unreachable), bank(count), 10);
    Arc::new(QuizService::new(loader, Arc::new(store.clone())).with_clock(fixed_clock()))
}

#[tokio::test]
async fn remote_failure_falls_back_without_user_visible_error() {
    let store = InMemoryScoreStore::new();
    let service = quiz_service(12, &store);
    let mut session = QuizSession::new();

    service.start(&mut session, Some(Difficulty::Hard)).await.unwrap();

    assert_eq!(session.phase(), SessionPhase::Active);
    assert_eq!(session.total(), 10);
    assert_eq!(session.error(), None);
    assert_eq!(session.current_question().unwrap().id().as_str(), "q0");
}

#[tokio::test(start_paused = true)]
async fn nine_correct_then_timeout_on_last_question() {
    let store = InMemoryScoreStore::with_raw("4");
    let handle = spawn_runner(quiz_service(10, &store));
    let mut updates = handle.subscribe();

    handle.send(QuizIntent::Start(None)).unwrap();
    for i in 0..9 {
        handle.send(QuizIntent::Select(i % 4)).unwrap();
        handle.send(QuizIntent::Next).unwrap();
    }
    updates
        .wait_for(|snap| snap.is_active() && snap.position == 9)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(30_500)).await;

    let snap = handle.snapshot();
    assert_eq!(snap.phase, SessionPhase::Terminal);
    let result = snap.result.expect("quiz finished on timeout");
    assert_eq!(result.score(), 9);
    assert_eq!(result.total(), 10);
    assert_eq!(result.best_score(), 9);

    let last = result.entries().last().unwrap();
    assert_eq!(last.question.id().as_str(), "q9");
    assert_eq!(last.answer.unwrap().selected(), None);
    assert!(!last.is_correct());

    assert_eq!(store.read_best().await.unwrap(), 9);
}

#[tokio::test(start_paused = true)]
async fn countdown_ticks_once_per_second() {
    let store = InMemoryScoreStore::new();
    let handle = spawn_runner(quiz_service(3, &store));
    let mut updates = handle.subscribe();

    handle.send(QuizIntent::Start(None)).unwrap();
    updates.wait_for(|snap| snap.is_active()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert_eq!(handle.snapshot().seconds_remaining, 27);
}

#[tokio::test(start_paused = true)]
async fn restart_while_armed_leaves_one_live_countdown() {
    let store = InMemoryScoreStore::new();
    let handle = spawn_runner(quiz_service(3, &store));
    let mut updates = handle.subscribe();

    handle.send(QuizIntent::Start(None)).unwrap();
    updates.wait_for(|snap| snap.is_active()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5_500)).await;
    assert_eq!(handle.snapshot().seconds_remaining, 25);

    handle.send(QuizIntent::Restart).unwrap();
    updates
        .wait_for(|snap| snap.phase == SessionPhase::Idle)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(handle.snapshot().phase, SessionPhase::Idle);

    handle.send(QuizIntent::Start(None)).unwrap();
    updates.wait_for(|snap| snap.is_active()).await.unwrap();
    assert_eq!(handle.snapshot().seconds_remaining, 30);

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert_eq!(handle.snapshot().seconds_remaining, 27);

    // Expiry moves exactly one question forward.
    tokio::time::sleep(Duration::from_secs(27)).await;
    let snap = handle.snapshot();
    assert_eq!(snap.position, 1);
    assert_eq!(snap.seconds_remaining, 30);
}

#[tokio::test(start_paused = true)]
async fn starting_again_while_armed_rearms_a_single_countdown() {
    let store = InMemoryScoreStore::new();
    let handle = spawn_runner(quiz_service(3, &store));
    let mut updates = handle.subscribe();

    handle.send(QuizIntent::Start(None)).unwrap();
    handle.send(QuizIntent::Select(2)).unwrap();
    handle.send(QuizIntent::Next).unwrap();
    updates
        .wait_for(|snap| snap.is_active() && snap.position == 1)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5_500)).await;
    assert_eq!(handle.snapshot().seconds_remaining, 25);

    handle.send(QuizIntent::Start(Some(Difficulty::Easy))).unwrap();
    let snap = updates
        .wait_for(|snap| snap.is_active() && snap.position == 0)
        .await
        .unwrap()
        .clone();
    assert_eq!(snap.seconds_remaining, 30);
    assert_eq!(snap.selection, None);

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert_eq!(handle.snapshot().seconds_remaining, 27);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.snapshot().seconds_remaining, 17);
    assert_eq!(handle.snapshot().position, 0);
}

#[tokio::test(start_paused = true)]
async fn offline_app_services_run_a_quiz_and_keep_the_best() {
    let config = QuizConfig::default().with_offline(true);
    let services = AppServices::in_memory(fixed_clock(), &config).unwrap();
    let handle = services.spawn_quiz();
    let mut updates = handle.subscribe();

    handle.send(QuizIntent::Start(None)).unwrap();
    let snap = updates
        .wait_for(|snap| snap.is_active())
        .await
        .unwrap()
        .clone();
    assert_eq!(snap.total, 10);
    assert_eq!(snap.error, None);

    let correct = snap.question.as_ref().unwrap().correct_index();
    handle.send(QuizIntent::Select(correct)).unwrap();
    handle.send(QuizIntent::Finish).unwrap();
    let snap = updates
        .wait_for(|snap| snap.result.is_some())
        .await
        .unwrap()
        .clone();

    assert_eq!(snap.result.unwrap().score(), 1);
    assert_eq!(services.scores().read_best().await.unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn navigation_keeps_answers_and_finish_scores() {
    let store = InMemoryScoreStore::new();
    let handle = spawn_runner(quiz_service(3, &store));
    let mut updates = handle.subscribe();

    handle.send(QuizIntent::Start(None)).unwrap();
    handle.send(QuizIntent::Select(0)).unwrap();
    handle.send(QuizIntent::Next).unwrap();
    handle.send(QuizIntent::Select(3)).unwrap();
    handle.send(QuizIntent::Prev).unwrap();
    updates
        .wait_for(|snap| snap.is_active() && snap.position == 0)
        .await
        .unwrap();
    assert_eq!(handle.snapshot().selection, Some(0));

    handle.send(QuizIntent::Finish).unwrap();
    let snap = updates
        .wait_for(|snap| snap.result.is_some())
        .await
        .unwrap()
        .clone();

    let result = snap.result.unwrap();
    assert_eq!(result.score(), 1);
    assert_eq!(result.answers().len(), 2);
    assert_eq!(snap.seconds_remaining, 30);
}

#[tokio::test(start_paused = true)]
async fn no_questions_is_surfaced() {
    let store = InMemoryScoreStore::new();
    let handle = spawn_runner(quiz_service(0, &store));
    let mut updates = handle.subscribe();

    handle.send(QuizIntent::Start(None)).unwrap();
    let snap = updates
        .wait_for(|snap| snap.phase == SessionPhase::Terminal)
        .await
        .unwrap()
        .clone();

    assert_eq!(snap.error.as_deref(), Some("No questions available."));
    assert!(snap.result.is_none());

    handle.send(QuizIntent::Next).unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(handle.snapshot().phase, SessionPhase::Terminal);
}
