use quiz_core::model::QuizResult;

use crate::vm::time_fmt::format_datetime;

const NO_ANSWER: &str = "—";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub number: usize,
    pub prompt: String,
    pub is_correct: bool,
    pub verdict: &'static str,
    pub tone: &'static str,
    pub your_answer: String,
    pub correct_answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_line: String,
    pub best_line: String,
    pub completed_at: String,
    pub rows: Vec<ResultRowVm>,
}

impl From<&QuizResult> for ResultsVm {
    fn from(result: &QuizResult) -> Self {
        let rows = result
            .entries()
            .enumerate()
            .map(|(idx, entry)| {
                let is_correct = entry.is_correct();
                ResultRowVm {
                    number: idx + 1,
                    prompt: entry.question.prompt().to_string(),
                    is_correct,
                    verdict: if is_correct { "Correct" } else { "Incorrect" },
                    tone: if is_correct { "correct" } else { "incorrect" },
                    your_answer: entry.selected_option().unwrap_or(NO_ANSWER).to_string(),
                    correct_answer: entry.question.correct_option().to_string(),
                }
            })
            .collect();

        Self {
            score_line: format!(
                "You scored {}/{} ({}%)",
                result.score(),
                result.total(),
                result.percentage()
            ),
            best_line: format!("Best score: {}/{}", result.best_score(), result.total()),
            completed_at: format_datetime(result.completed_at()),
            rows,
        }
    }
}
