use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// The user's response to a single question.
///
/// `selected` is `None` when the question timed out without a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    question_id: QuestionId,
    selected: Option<usize>,
    is_correct: bool,
    correct_index: usize,
}

impl Answer {
    /// Build an answer for `question`, deriving correctness from its correct index.
    #[must_use]
    pub fn for_question(question: &Question, selected: Option<usize>) -> Self {
        Self {
            question_id: question.id().clone(),
            selected,
            is_correct: selected.is_some_and(|index| question.is_correct(index)),
            correct_index: question.correct_index(),
        }
    }

    /// Answer recorded when the countdown runs out.
    #[must_use]
    pub fn timed_out(question: &Question) -> Self {
        Self::for_question(question, None)
    }

    #[must_use]
    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }
}

/// Ordered answers for a session, holding at most one entry per question.
///
/// Re-answering a question replaces its entry in place, so iteration order is
/// the order in which questions were first answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    entries: Vec<Answer>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the answer for its question.
    ///
    /// Returns the replaced answer, if any.
    pub fn record(&mut self, answer: Answer) -> Option<Answer> {
        match self.position_of(answer.question_id()) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index], answer)),
            None => {
                self.entries.push(answer);
                None
            }
        }
    }

    /// Insert the answer only when its question has no entry yet.
    ///
    /// Returns `true` if the answer was inserted.
    pub fn record_if_absent(&mut self, answer: Answer) -> bool {
        if self.position_of(answer.question_id()).is_some() {
            return false;
        }
        self.entries.push(answer);
        true
    }

    #[must_use]
    pub fn get(&self, question_id: &QuestionId) -> Option<&Answer> {
        self.entries
            .iter()
            .find(|answer| answer.question_id() == question_id)
    }

    /// Selected option for a question, `None` if unanswered or timed out.
    #[must_use]
    pub fn selection_for(&self, question_id: &QuestionId) -> Option<usize> {
        self.get(question_id).and_then(Answer::selected)
    }

    /// Number of correct answers.
    #[must_use]
    pub fn score(&self) -> usize {
        self.entries.iter().filter(|answer| answer.is_correct()).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.entries.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Answer] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position_of(&self, question_id: &QuestionId) -> Option<usize> {
        self.entries
            .iter()
            .position(|answer| answer.question_id() == question_id)
    }
}

impl From<AnswerSheet> for Vec<Answer> {
    fn from(sheet: AnswerSheet) -> Self {
        sheet.entries
    }
}
