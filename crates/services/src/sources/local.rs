use async_trait::async_trait;
use serde::Deserialize;

use quiz_core::model::{Difficulty, Question};

use super::QuestionSource;
use crate::error::SourceError;

const BUNDLED_QUESTIONS: &str = include_str!("../../data/questions.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocalRecord {
    id: String,
    question: String,
    options: Vec<String>,
    correct_index: usize,
    #[serde(default)]
    difficulty: Option<Difficulty>,
    #[serde(default)]
    category: Option<String>,
}

/// Fallback source over a fixed list of pre-shaped questions.
///
/// Order is kept as bundled and the difficulty hint is ignored.
#[derive(Debug, Clone, Default)]
pub struct LocalQuestionSource {
    questions: Vec<Question>,
}

impl LocalQuestionSource {
    /// Build from caller-provided questions.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Load the question bank compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Bundle` if the bundled JSON cannot be parsed.
    pub fn bundled() -> Result<Self, SourceError> {
        Self::from_json(BUNDLED_QUESTIONS)
    }

    /// Parse a JSON list of question records, skipping invalid ones.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Bundle` if `json` is not a list.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let raw: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let questions = raw
            .into_iter()
            .filter_map(|value| serde_json::from_value::<LocalRecord>(value).ok())
            .filter_map(|record| {
                Question::new(
                    record.id,
                    record.question,
                    record.options,
                    record.correct_index,
                )
                .ok()
                .map(|question| {
                    question
                        .with_difficulty(record.difficulty)
                        .with_category(record.category)
                })
            })
            .collect();
        Ok(Self { questions })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// First `count` questions, in bundled order.
    #[must_use]
    pub fn take(&self, count: usize) -> Vec<Question> {
        self.questions.iter().take(count).cloned().collect()
    }
}

#[async_trait]
impl QuestionSource for LocalQuestionSource {
    async fn fetch(
        &self,
        count: usize,
        _difficulty: Option<Difficulty>,
    ) -> Result<Vec<Question>, SourceError> {
        Ok(self.take(count))
    }
}
