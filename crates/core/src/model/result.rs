use chrono::{DateTime, Utc};

use crate::model::answer::{Answer, AnswerSheet};
use crate::model::question::Question;

/// Snapshot of a finished quiz run.
///
/// Carries the questions alongside the answers so a results view can render
/// prompts and options without going back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    score: u32,
    total: u32,
    answers: Vec<Answer>,
    best_score: u32,
    questions: Vec<Question>,
    completed_at: DateTime<Utc>,
}

/// One row of the per-question breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultEntry<'a> {
    pub question: &'a Question,
    pub answer: Option<&'a Answer>,
}

impl ResultEntry<'_> {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.answer.is_some_and(Answer::is_correct)
    }

    /// Text of the selected option, `None` when unanswered or timed out.
    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        self.answer
            .and_then(Answer::selected)
            .and_then(|index| self.question.option(index))
    }
}

impl QuizResult {
    /// Score the sheet and fold in the previously stored best score.
    #[must_use]
    pub fn new(
        answers: AnswerSheet,
        questions: Vec<Question>,
        previous_best: u32,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let score = u32::try_from(answers.score()).unwrap_or(u32::MAX);
        let total = u32::try_from(questions.len()).unwrap_or(u32::MAX);
        Self {
            score,
            total,
            answers: answers.into(),
            best_score: score.max(previous_best),
            questions,
            completed_at,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Score as a whole percentage of the question count.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        // score <= total, so the rounded value stays within 0..=100
        (f64::from(self.score) / f64::from(self.total) * 100.0).round() as u32
    }

    /// Questions in session order, each joined with its answer by id.
    pub fn entries(&self) -> impl Iterator<Item = ResultEntry<'_>> {
        self.questions.iter().map(|question| ResultEntry {
            question,
            answer: self
                .answers
                .iter()
                .find(|answer| answer.question_id() == question.id()),
        })
    }
}
