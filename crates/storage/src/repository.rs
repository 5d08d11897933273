use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key under which the best score is persisted.
pub const BEST_SCORE_KEY: &str = "best_score";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Interpret a persisted best-score value.
///
/// Missing or unparseable values count as zero.
#[must_use]
pub fn parse_score(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

/// Persistence contract for the single best-score value.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Read the stored best score, `0` if nothing usable is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached.
    async fn read_best(&self) -> Result<u32, StorageError>;

    /// Overwrite the stored best score.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn write_best(&self, score: u32) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
///
/// Keeps the raw string form, like the persistent backends, so unparseable
/// values behave the same everywhere.
#[derive(Clone, Default)]
pub struct InMemoryScoreStore {
    raw: Arc<Mutex<Option<String>>>,
}

impl InMemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary stored value.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The raw stored value, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn raw(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .raw
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    async fn read_best(&self) -> Result<u32, StorageError> {
        let guard = self
            .raw
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(parse_score(guard.as_deref()))
    }

    async fn write_best(&self, score: u32) -> Result<(), StorageError> {
        let mut guard = self
            .raw
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(score.to_string());
        Ok(())
    }
}

/// Aggregates stores behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub scores: Arc<dyn ScoreStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let scores: Arc<dyn ScoreStore> = Arc::new(InMemoryScoreStore::new());
        Self { scores }
    }
}
