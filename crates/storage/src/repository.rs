use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key under which the best finished score is stored.
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Small key/value store for persisted integer scores.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or holds a value
    /// that is not a non-negative integer.
    async fn get_score(&self, key: &str) -> Result<Option<u32>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn set_score(&self, key: &str, value: u32) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    scores: Arc<Mutex<HashMap<String, u32>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scores: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Repository pre-populated with a single value.
    #[must_use]
    pub fn with_score(key: &str, value: u32) -> Self {
        let repo = Self::new();
        if let Ok(mut guard) = repo.scores.lock() {
            guard.insert(key.to_string(), value);
        }
        repo
    }
}

#[async_trait]
impl ScoreRepository for InMemoryRepository {
    async fn get_score(&self, key: &str) -> Result<Option<u32>, StorageError> {
        let guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).copied())
    }

    async fn set_score(&self, key: &str, value: u32) -> Result<(), StorageError> {
        let mut guard = self
            .scores
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub scores: Arc<dyn ScoreRepository>,
}
