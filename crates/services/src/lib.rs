#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod countdown;
pub mod error;
pub mod sessions;
pub mod shuffle;
pub mod sources;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use config::{OpenTdbConfig, QuizConfig};
pub use countdown::{Countdown, CountdownToken, QUESTION_TIME_SECS, Tick, Ticker};
pub use error::{AppServicesError, SessionError, SourceError};
pub use shuffle::{OptionShuffler, RandomShuffler, SeededShuffler};
pub use sources::{LocalQuestionSource, OpenTdbSource, QuestionLoader, QuestionSource};

pub use sessions::{
    Outcome, QuizHandle, QuizIntent, QuizService, QuizSession, QuizSnapshot, SessionPhase,
    TickOutcome, spawn_runner,
};
