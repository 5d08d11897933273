use std::sync::Arc;

use tracing::info;

use storage::repository::{ScoreStore, Storage};

use crate::config::QuizConfig;
use crate::error::AppServicesError;
use crate::sessions::{QuizHandle, QuizService, spawn_runner};
use crate::sources::{LocalQuestionSource, OpenTdbSource, QuestionLoader, QuestionSource};
use crate::Clock;

/// Assembles app-facing services from configuration.
#[derive(Clone)]
pub struct AppServices {
    quiz: Arc<QuizService>,
    scores: Arc<dyn ScoreStore>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// bundled question bank cannot be read.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: &QuizConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, clock, config)
    }

    /// Build services backed by in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the bundled question bank cannot be read.
    pub fn in_memory(clock: Clock, config: &QuizConfig) -> Result<Self, AppServicesError> {
        Self::from_storage(&Storage::in_memory(), clock, config)
    }

    fn from_storage(
        storage: &Storage,
        clock: Clock,
        config: &QuizConfig,
    ) -> Result<Self, AppServicesError> {
        let fallback = LocalQuestionSource::bundled()?;
        let loader = if config.offline {
            info!("offline mode, using the bundled question bank");
            QuestionLoader::offline(fallback, config.question_count)
        } else {
            let remote: Arc<dyn QuestionSource> =
                Arc::new(OpenTdbSource::new(config.trivia.clone()).with_clock(clock));
            QuestionLoader::new(remote, fallback, config.question_count)
        };

        let scores = Arc::clone(&storage.scores);
        let quiz = Arc::new(QuizService::new(loader, Arc::clone(&scores)).with_clock(clock));
        Ok(Self { quiz, scores })
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn scores(&self) -> Arc<dyn ScoreStore> {
        Arc::clone(&self.scores)
    }

    /// Start the quiz runner on the current tokio runtime.
    #[must_use]
    pub fn spawn_quiz(&self) -> QuizHandle {
        spawn_runner(self.quiz())
    }
}
