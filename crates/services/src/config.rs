use std::env;
use std::time::Duration;

/// Number of questions requested per session.
pub const QUESTION_COUNT: usize = 10;

/// Default remote trivia endpoint.
pub const DEFAULT_TRIVIA_URL: &str = "https://opentdb.com";

/// Timeout applied to every trivia request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct OpenTdbConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for OpenTdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TRIVIA_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl OpenTdbConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("QUIZ_TRIVIA_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TRIVIA_URL.into());
        Self {
            base_url,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Settings for assembling a quiz.
#[derive(Clone, Debug)]
pub struct QuizConfig {
    pub question_count: usize,
    pub offline: bool,
    pub trivia: OpenTdbConfig,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: QUESTION_COUNT,
            offline: false,
            trivia: OpenTdbConfig::default(),
        }
    }
}

impl QuizConfig {
    /// Read `QUIZ_TRIVIA_URL` and `QUIZ_OFFLINE` from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let offline = env::var("QUIZ_OFFLINE").is_ok_and(|value| is_truthy(&value));
        Self {
            question_count: QUESTION_COUNT,
            offline,
            trivia: OpenTdbConfig::from_env(),
        }
    }

    #[must_use]
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    #[must_use]
    pub fn with_trivia_url(mut self, base_url: impl Into<String>) -> Self {
        self.trivia = self.trivia.with_base_url(base_url);
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
