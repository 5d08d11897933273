use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use quiz_core::model::{Difficulty, Question};
use quiz_core::text::decode_html_entities;
use quiz_core::Clock;

use super::QuestionSource;
use crate::config::OpenTdbConfig;
use crate::error::SourceError;
use crate::shuffle::{OptionShuffler, RandomShuffler, shuffle_with};

/// Remote source backed by an Open Trivia Database compatible endpoint.
#[derive(Clone)]
pub struct OpenTdbSource {
    client: Client,
    config: OpenTdbConfig,
    shuffler: Arc<dyn OptionShuffler>,
    clock: Clock,
}

impl OpenTdbSource {
    #[must_use]
    pub fn new(config: OpenTdbConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            shuffler: Arc::new(RandomShuffler),
            clock: Clock::default(),
        }
    }

    #[must_use]
    pub fn with_shuffler(mut self, shuffler: Arc<dyn OptionShuffler>) -> Self {
        self.shuffler = shuffler;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/api.php", self.config.base_url.trim_end_matches('/'))
    }

    fn request(&self, count: usize, difficulty: Option<Difficulty>) -> RequestBuilder {
        let request = self
            .client
            .get(self.endpoint())
            .timeout(self.config.timeout)
            .query(&[("amount", count.to_string().as_str()), ("type", "multiple")]);
        match difficulty {
            Some(difficulty) => request.query(&[("difficulty", difficulty.as_str())]),
            None => request,
        }
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    async fn fetch(
        &self,
        count: usize,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Question>, SourceError> {
        let response = self.request(count, difficulty).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus(status));
        }

        let payload: Value = response.json().await?;
        let stamp = self.clock.unix_millis();
        let mut questions = map_payload(&payload, self.shuffler.as_ref(), stamp)?;
        questions.truncate(count);
        debug!(count = questions.len(), "fetched remote questions");
        Ok(questions)
    }
}

#[derive(Debug, Deserialize)]
struct TriviaRecord {
    question: String,
    correct_answer: String,
    #[serde(default)]
    incorrect_answers: Vec<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
}

/// Turn a trivia payload into questions.
///
/// Records that are malformed or do not yield exactly four options are
/// skipped. Ids are stamped as `api-{stamp}-{idx}`.
///
/// # Errors
///
/// Returns `SourceError` if the payload has no result list, reports a
/// non-zero response code, or no record survives.
pub fn map_payload(
    payload: &Value,
    shuffler: &dyn OptionShuffler,
    stamp: i64,
) -> Result<Vec<Question>, SourceError> {
    match payload.get("response_code").and_then(Value::as_i64) {
        Some(0) | None => {}
        Some(code) => return Err(SourceError::ResponseCode(code)),
    }

    let results = payload
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| SourceError::Payload("missing results list".into()))?;

    let questions: Vec<Question> = results
        .iter()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let record = TriviaRecord::deserialize(raw).ok()?;
            map_record(record, idx, shuffler, stamp)
        })
        .collect();

    if questions.is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(questions)
}

fn map_record(
    record: TriviaRecord,
    idx: usize,
    shuffler: &dyn OptionShuffler,
    stamp: i64,
) -> Option<Question> {
    let mut options = Vec::with_capacity(1 + record.incorrect_answers.len());
    options.push(decode_html_entities(&record.correct_answer));
    options.extend(
        record
            .incorrect_answers
            .iter()
            .map(|answer| decode_html_entities(answer)),
    );
    let (options, correct_index) = shuffle_with(shuffler, options, 0);

    let difficulty = record
        .difficulty
        .as_deref()
        .and_then(|raw| raw.parse::<Difficulty>().ok());
    let category = record.category.as_deref().map(decode_html_entities);

    Question::new(
        format!("api-{stamp}-{idx}"),
        decode_html_entities(&record.question),
        options,
        correct_index,
    )
    .ok()
    .map(|question| question.with_difficulty(difficulty).with_category(category))
}
