use chrono::{DateTime, Utc};

use quiz_core::model::{Answer, AnswerSheet, Difficulty, OPTION_COUNT, Question, QuizResult};

use crate::countdown::{Countdown, CountdownToken, Tick};
use crate::error::SessionError;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Loading,
    Active,
    Terminal,
}

/// Where a forward move landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Now showing the question at `position`, with a freshly armed countdown.
    Moved { position: usize },
    /// The last question was left; the caller must finish the session.
    Finish,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session.
///
/// Owns the questions, the current position, the recorded answers and the
/// countdown. Every position change re-arms the countdown and every exit from
/// `Active` cancels it before anything else changes.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    phase: SessionPhase,
    difficulty: Option<Difficulty>,
    questions: Vec<Question>,
    position: usize,
    answers: AnswerSheet,
    countdown: Countdown,
    error: Option<String>,
    result: Option<QuizResult>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom per-question time limit.
    #[must_use]
    pub fn with_time_limit(seconds: u32) -> Self {
        Self {
            countdown: Countdown::new(seconds),
            ..Self::default()
        }
    }

    /// Reset everything and wait for questions.
    pub fn begin_loading(&mut self, difficulty: Option<Difficulty>) {
        self.countdown.cancel();
        self.questions.clear();
        self.position = 0;
        self.answers.clear();
        self.error = None;
        self.result = None;
        self.difficulty = difficulty;
        self.phase = SessionPhase::Loading;
    }

    /// Install loaded questions and arm the countdown for the first one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestionsAvailable` for an empty list; the
    /// session is then terminal with the error recorded.
    pub fn activate(&mut self, questions: Vec<Question>) -> Result<CountdownToken, SessionError> {
        if questions.is_empty() {
            let err = SessionError::NoQuestionsAvailable;
            self.fail(&err);
            return Err(err);
        }
        self.questions = questions;
        self.position = 0;
        self.answers.clear();
        self.error = None;
        self.result = None;
        self.phase = SessionPhase::Active;
        Ok(self.countdown.arm())
    }

    /// Stop in a non-progressing terminal state carrying `err`.
    pub fn fail(&mut self, err: &SessionError) {
        self.countdown.cancel();
        self.result = None;
        self.error = Some(err.to_string());
        self.phase = SessionPhase::Terminal;
    }

    /// Record or replace the answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside `Active` and
    /// `SessionError::OptionOutOfRange` for an index past the last option.
    pub fn select_answer(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= OPTION_COUNT {
            return Err(SessionError::OptionOutOfRange(index));
        }
        let question = self.require_current()?;
        let answer = Answer::for_question(question, Some(index));
        self.answers.record(answer);
        Ok(())
    }

    /// Move to the next question, or report that the quiz should finish.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside `Active`.
    pub fn advance(&mut self) -> Result<Step, SessionError> {
        self.require_active()?;
        if self.position + 1 < self.questions.len() {
            self.position += 1;
            self.countdown.arm();
            Ok(Step::Moved {
                position: self.position,
            })
        } else {
            Ok(Step::Finish)
        }
    }

    /// Move to the previous question. Returns `false` at the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside `Active`.
    pub fn retreat(&mut self) -> Result<bool, SessionError> {
        self.require_active()?;
        if self.position == 0 {
            return Ok(false);
        }
        self.position -= 1;
        self.countdown.arm();
        Ok(true)
    }

    /// Deliver a countdown tick. Ticks outside `Active` are stale.
    pub fn tick(&mut self, token: CountdownToken) -> Tick {
        if self.phase != SessionPhase::Active {
            return Tick::Stale;
        }
        self.countdown.tick(token)
    }

    /// Lock in a timeout for the current question and move on.
    ///
    /// An answer already recorded for the question is kept.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside `Active`.
    pub fn auto_advance_on_timeout(&mut self) -> Result<Step, SessionError> {
        let question = self.require_current()?;
        let timed_out = Answer::timed_out(question);
        self.answers.record_if_absent(timed_out);
        self.advance()
    }

    /// Cancel the countdown without leaving the current phase.
    pub fn stop_countdown(&mut self) {
        self.countdown.cancel();
    }

    /// Score the run and become terminal.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside `Active`.
    pub fn complete(
        &mut self,
        previous_best: u32,
        completed_at: DateTime<Utc>,
    ) -> Result<QuizResult, SessionError> {
        self.require_active()?;
        self.countdown.cancel();
        let result = QuizResult::new(
            self.answers.clone(),
            self.questions.clone(),
            previous_best,
            completed_at,
        );
        self.result = Some(result.clone());
        self.phase = SessionPhase::Terminal;
        Ok(result)
    }

    /// Back to the pre-start state.
    pub fn restart(&mut self) {
        self.countdown.cancel();
        self.questions.clear();
        self.position = 0;
        self.answers.clear();
        self.error = None;
        self.result = None;
        self.difficulty = None;
        self.phase = SessionPhase::Idle;
    }

    fn require_active(&self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Active {
            Ok(())
        } else {
            Err(SessionError::NotActive)
        }
    }

    fn require_current(&self) -> Result<&Question, SessionError> {
        self.require_active()?;
        self.questions
            .get(self.position)
            .ok_or(SessionError::NotActive)
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// Selection recorded for the current question.
    #[must_use]
    pub fn current_selection(&self) -> Option<usize> {
        self.current_question()
            .and_then(|question| self.answers.selection_for(question.id()))
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.answers.score()
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Token of the live countdown, `None` when nothing is counting.
    #[must_use]
    pub fn countdown_token(&self) -> Option<CountdownToken> {
        self.countdown.token()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::QUESTION_TIME_SECS;
    use quiz_core::time::fixed_now;

    fn questions(count: usize) -> Vec<Question> {
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
            .collect()
    }

    fn active(count: usize) -> QuizSession {
        let mut session = QuizSession::new();
        session.begin_loading(None);
        session.activate(questions(count)).unwrap();
        session
    }

    #[test]
    fn activation_starts_at_first_question_with_armed_countdown() {
        let session = active(3);
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.position(), 0);
        assert!(session.answers().is_empty());
        assert!(session.countdown_token().is_some());
        assert_eq!(session.seconds_remaining(), QUESTION_TIME_SECS);
    }

    #[test]
    fn empty_activation_is_terminal_without_result() {
        let mut session = QuizSession::new();
        session.begin_loading(None);

        let err = session.activate(Vec::new()).unwrap_err();
        assert!(matches!(err, SessionError::NoQuestionsAvailable));
        assert_eq!(session.phase(), SessionPhase::Terminal);
        assert_eq!(session.error(), Some("No questions available."));
        assert!(session.result().is_none());
        assert!(session.countdown_token().is_none());
        assert!(matches!(session.advance(), Err(SessionError::NotActive)));
    }

    #[test]
    fn reselecting_replaces_the_answer() {
        let mut session = active(2);
        session.select_answer(1).unwrap();
        session.select_answer(0).unwrap();

        assert_eq!(session.answers().len(), 1);
        assert_eq!(session.current_selection(), Some(0));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut session = active(1);
        assert!(matches!(
            session.select_answer(4),
            Err(SessionError::OptionOutOfRange(4))
        ));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn selecting_outside_active_fails() {
        let mut session = QuizSession::new();
        assert!(matches!(session.select_answer(0), Err(SessionError::NotActive)));
    }

    #[test]
    fn advance_rearms_and_finishes_at_last() {
        let mut session = active(2);
        let first = session.countdown_token();

        assert_eq!(session.advance().unwrap(), Step::Moved { position: 1 });
        assert_ne!(session.countdown_token(), first);
        assert_eq!(session.advance().unwrap(), Step::Finish);
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn retreat_is_noop_at_start_and_keeps_answers() {
        let mut session = active(3);
        let token = session.countdown_token();
        assert!(!session.retreat().unwrap());
        assert_eq!(session.countdown_token(), token);

        session.select_answer(2).unwrap();
        session.advance().unwrap();
        assert!(session.retreat().unwrap());
        assert_eq!(session.position(), 0);
        assert_eq!(session.current_selection(), Some(2));
    }

    #[test]
    fn timeout_records_none_only_when_unanswered() {
        let mut session = active(3);
        session.auto_advance_on_timeout().unwrap();
        let first = session.questions()[0].id().clone();
        assert_eq!(session.answers().get(&first).unwrap().selected(), None);

        session.select_answer(1).unwrap();
        session.auto_advance_on_timeout().unwrap();
        let second = session.questions()[1].id().clone();
        assert_eq!(session.answers().get(&second).unwrap().selected(), Some(1));
        assert_eq!(session.position(), 2);
    }

    #[test]
    fn stale_ticks_do_not_touch_the_new_question() {
        let mut session = active(2);
        let old = session.countdown_token().unwrap();
        session.advance().unwrap();

        assert_eq!(session.tick(old), Tick::Stale);
        assert_eq!(session.seconds_remaining(), QUESTION_TIME_SECS);
    }

    #[test]
    fn countdown_expires_once_per_question() {
        let mut session = QuizSession::with_time_limit(2);
        session.begin_loading(None);
        let token = session.activate(questions(2)).unwrap();

        assert_eq!(session.tick(token), Tick::Running(1));
        assert_eq!(session.tick(token), Tick::Expired);
        assert_eq!(session.tick(token), Tick::Stale);
    }

    #[test]
    fn complete_scores_and_keeps_best() {
        let mut session = active(2);
        session.select_answer(0).unwrap();

        let result = session.complete(5, fixed_now()).unwrap();
        assert_eq!(result.score(), 1);
        assert_eq!(result.total(), 2);
        assert_eq!(result.best_score(), 5);
        assert_eq!(session.phase(), SessionPhase::Terminal);
        assert!(session.countdown_token().is_none());
        assert!(session.complete(0, fixed_now()).is_err());
    }

    #[test]
    fn restart_clears_everything() {
        let mut session = active(2);
        session.select_answer(0).unwrap();
        session.restart();

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.total(), 0);
        assert!(session.answers().is_empty());
        assert!(session.countdown_token().is_none());
        assert!(session.result().is_none());
    }
}
