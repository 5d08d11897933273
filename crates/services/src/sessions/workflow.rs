use std::sync::Arc;

use tracing::{debug, info, warn};

use quiz_core::model::{Difficulty, QuizResult};
use quiz_core::Clock;
use storage::repository::ScoreStore;

use super::service::{QuizSession, Step};
use crate::countdown::{CountdownToken, Tick};
use crate::error::SessionError;
use crate::sources::QuestionLoader;

/// Result of a forward move that went through the service.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Moved(usize),
    Finished(Box<QuizResult>),
}

/// Result of delivering a countdown tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Ignored,
    Running(u32),
    TimedOut(Outcome),
}

/// Orchestrates question loading and best-score persistence around a
/// `QuizSession`.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    loader: QuestionLoader,
    scores: Arc<dyn ScoreStore>,
}

impl QuizService {
    #[must_use]
    pub fn new(loader: QuestionLoader, scores: Arc<dyn ScoreStore>) -> Self {
        Self {
            clock: Clock::default(),
            loader,
            scores,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Reset `session` and load a fresh question set into it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestionsAvailable` when no source has
    /// questions; the session is left terminal with the message set.
    pub async fn start(
        &self,
        session: &mut QuizSession,
        difficulty: Option<Difficulty>,
    ) -> Result<(), SessionError> {
        session.begin_loading(difficulty);
        self.load(session).await
    }

    /// Load questions for a session that is already `Loading`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestionsAvailable` when no source has
    /// questions.
    pub async fn load(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        match self.loader.load(session.difficulty()).await {
            Ok(questions) => {
                session.activate(questions)?;
                info!(
                    total = session.total(),
                    difficulty = ?session.difficulty(),
                    "quiz started"
                );
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "quiz could not start");
                session.fail(&err);
                Err(err)
            }
        }
    }

    /// Next question, finishing after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` if the session is not running.
    pub async fn advance(&self, session: &mut QuizSession) -> Result<Outcome, SessionError> {
        let step = session.advance()?;
        self.follow(session, step).await
    }

    /// Deliver a tick, auto-advancing when the countdown expires.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the timeout could not be applied.
    pub async fn on_tick(
        &self,
        session: &mut QuizSession,
        token: CountdownToken,
    ) -> Result<TickOutcome, SessionError> {
        match session.tick(token) {
            Tick::Stale => Ok(TickOutcome::Ignored),
            Tick::Running(remaining) => Ok(TickOutcome::Running(remaining)),
            Tick::Expired => {
                debug!(position = session.position(), "question timed out");
                let step = session.auto_advance_on_timeout()?;
                let outcome = self.follow(session, step).await?;
                Ok(TickOutcome::TimedOut(outcome))
            }
        }
    }

    /// Score the session, update the best score and return the result.
    ///
    /// Store failures are logged; a failed read counts as a previous best of 0.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` if the session is not running.
    pub async fn finish(&self, session: &mut QuizSession) -> Result<QuizResult, SessionError> {
        if !session.is_active() {
            return Err(SessionError::NotActive);
        }
        session.stop_countdown();

        let previous_best = match self.scores.read_best().await {
            Ok(best) => best,
            Err(err) => {
                warn!(error = %err, "failed to read best score");
                0
            }
        };

        let result = session.complete(previous_best, self.clock.now())?;

        if let Err(err) = self.scores.write_best(result.best_score()).await {
            warn!(error = %err, "failed to store best score");
        }

        info!(
            score = result.score(),
            total = result.total(),
            best = result.best_score(),
            "quiz finished"
        );
        Ok(result)
    }

    async fn follow(&self, session: &mut QuizSession, step: Step) -> Result<Outcome, SessionError> {
        match step {
            Step::Moved { position } => Ok(Outcome::Moved(position)),
            Step::Finish => {
                let result = self.finish(session).await?;
                Ok(Outcome::Finished(Box::new(result)))
            }
        }
    }
}
