//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;

/// Errors reported by an `AudioBackend`.
///
/// The mixer logs and swallows these; they never reach the player.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AudioError {
    #[error("no audio output available: {0}")]
    Device(String),
    #[error("failed to load {name}: {reason}")]
    Load { name: &'static str, reason: String },
    #[error("playback failed: {0}")]
    Playback(String),
    #[error("audio thread is gone")]
    Disconnected,
}

/// Errors emitted by `HighScoreService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HighScoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
