mod runner;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use runner::{QuizHandle, QuizIntent, spawn_runner, spawn_runner_with_period};
pub use service::{QuizSession, SessionPhase, Step};
pub use view::QuizSnapshot;
pub use workflow::{Outcome, QuizService, TickOutcome};
