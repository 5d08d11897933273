use quiz_core::model::{Difficulty, Question, QuizResult};

use super::service::{QuizSession, SessionPhase};
use crate::config::QUESTION_COUNT;
use crate::countdown::QUESTION_TIME_SECS;

/// Presentation-agnostic copy of the session state.
///
/// This is what the UI renders; it never reaches back into the session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSnapshot {
    pub phase: SessionPhase,
    pub difficulty: Option<Difficulty>,
    pub question: Option<Question>,
    pub position: usize,
    pub total: usize,
    pub seconds_remaining: u32,
    pub selection: Option<usize>,
    pub error: Option<String>,
    pub result: Option<QuizResult>,
}

impl Default for QuizSnapshot {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            difficulty: None,
            question: None,
            position: 0,
            total: 0,
            seconds_remaining: QUESTION_TIME_SECS,
            selection: None,
            error: None,
            result: None,
        }
    }
}

impl QuizSnapshot {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        Self {
            phase: session.phase(),
            difficulty: session.difficulty(),
            question: session.current_question().cloned(),
            position: session.position(),
            total: session.total(),
            seconds_remaining: session.seconds_remaining(),
            selection: session.current_selection(),
            error: session.error().map(str::to_owned),
            result: session.result().cloned(),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.total > 0 && self.position + 1 >= self.total
    }

    /// "Question X of N", with N falling back to the default count before
    /// questions are loaded.
    #[must_use]
    pub fn progress_label(&self) -> String {
        let total = if self.total == 0 {
            QUESTION_COUNT
        } else {
            self.total
        };
        let current = (self.position + 1).min(self.total);
        format!("Question {current} of {total}")
    }

    /// Share of questions already passed, 0..=100.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.position as f64 / self.total as f64 * 100.0)
            .round()
            .clamp(0.0, 100.0) as u32
    }
}
