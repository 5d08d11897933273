use std::sync::Arc;

use tracing::{info, warn};

use quiz_core::model::{Difficulty, Question};

use super::{LocalQuestionSource, QuestionSource};
use crate::error::SessionError;

/// Loads a session's questions, preferring the remote source.
#[derive(Clone)]
pub struct QuestionLoader {
    remote: Option<Arc<dyn QuestionSource>>,
    fallback: LocalQuestionSource,
    count: usize,
}

impl QuestionLoader {
    #[must_use]
    pub fn new(
        remote: Arc<dyn QuestionSource>,
        fallback: LocalQuestionSource,
        count: usize,
    ) -> Self {
        Self {
            remote: Some(remote),
            fallback,
            count,
        }
    }

    /// Loader that never contacts the remote source.
    #[must_use]
    pub fn offline(fallback: LocalQuestionSource, count: usize) -> Self {
        Self {
            remote: None,
            fallback,
            count,
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.remote.is_none()
    }

    /// Fetch questions, falling back to the bundled bank on any remote failure.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestionsAvailable` if both sources come up empty.
    pub async fn load(
        &self,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Question>, SessionError> {
        if let Some(remote) = &self.remote {
            match remote.fetch(self.count, difficulty).await {
                Ok(mut questions) if !questions.is_empty() => {
                    questions.truncate(self.count);
                    info!(count = questions.len(), "loaded remote questions");
                    return Ok(questions);
                }
                Ok(_) => warn!("remote source returned no questions, using local bank"),
                Err(err) => warn!(error = %err, "remote source unavailable, using local bank"),
            }
        }

        let questions = self.fallback.take(self.count);
        if questions.is_empty() {
            warn!("local bank has no usable questions");
            return Err(SessionError::NoQuestionsAvailable);
        }
        info!(count = questions.len(), "loaded local questions");
        Ok(questions)
    }
}
