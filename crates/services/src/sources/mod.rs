//! Question sources: the remote trivia service, the bundled bank and the
//! loader that falls back from one to the other.

use async_trait::async_trait;

use quiz_core::model::{Difficulty, Question};

use crate::error::SourceError;

mod loader;
mod local;
mod open_tdb;

pub use loader::QuestionLoader;
pub use local::LocalQuestionSource;
pub use open_tdb::{OpenTdbSource, map_payload};

/// Supplies an ordered list of at most `count` questions.
///
/// Options of every returned question are already in their final display
/// order.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch up to `count` questions, optionally restricted to a difficulty.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the source cannot produce questions.
    async fn fetch(
        &self,
        count: usize,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Question>, SourceError>;
}
