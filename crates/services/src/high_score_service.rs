use std::sync::Arc;

use storage::{HIGH_SCORE_KEY, ScoreRepository};

use crate::controller::FinishedQuiz;
use crate::error::HighScoreError;

/// Reads and writes the persisted best score.
///
/// Storage failures never reach the player: `load` falls back to zero and
/// `record_finished` keeps the previous best.
#[derive(Clone)]
pub struct HighScoreService {
    repo: Arc<dyn ScoreRepository>,
}

impl HighScoreService {
    #[must_use]
    pub fn new(repo: Arc<dyn ScoreRepository>) -> Self {
        Self { repo }
    }

    /// Load the persisted high score.
    ///
    /// # Errors
    ///
    /// Returns `HighScoreError` on storage failures.
    pub async fn try_load(&self) -> Result<u32, HighScoreError> {
        let stored = self.repo.get_score(HIGH_SCORE_KEY).await?;
        Ok(stored.unwrap_or(0))
    }

    /// Load the persisted high score, or zero if it cannot be read.
    pub async fn load(&self) -> u32 {
        match self.try_load().await {
            Ok(score) => score,
            Err(err) => {
                log::warn!("could not load high score: {err}");
                0
            }
        }
    }

    /// Persist `score` if it beats `previous_best`.
    ///
    /// # Errors
    ///
    /// Returns `HighScoreError` if the write fails.
    pub async fn try_record(&self, previous_best: u32, score: u32) -> Result<bool, HighScoreError> {
        if score <= previous_best {
            return Ok(false);
        }
        self.repo.set_score(HIGH_SCORE_KEY, score).await?;
        Ok(true)
    }

    /// Persist a finished session's score when it is a new best.
    ///
    /// Returns the new best once it has been written; `None` when the score did
    /// not beat the previous best or the write failed.
    pub async fn record_finished(&self, finished: FinishedQuiz) -> Option<u32> {
        match self.try_record(finished.previous_best, finished.score).await {
            Ok(true) => {
                log::info!("new high score: {}", finished.score);
                Some(finished.score)
            }
            Ok(false) => None,
            Err(err) => {
                log::warn!("could not save high score {}: {err}", finished.score);
                None
            }
        }
    }
}
