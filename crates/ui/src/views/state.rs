use services::SessionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unavailable,
    NoQuestions,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unavailable => "The quiz engine stopped. Please restart the app.",
            ViewError::NoQuestions => "No questions available.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<SessionError> for ViewError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::RunnerClosed => ViewError::Unavailable,
            SessionError::NoQuestionsAvailable => ViewError::NoQuestions,
            _ => ViewError::Unknown,
        }
    }
}
