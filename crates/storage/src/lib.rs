#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{HIGH_SCORE_KEY, InMemoryRepository, ScoreRepository, Storage, StorageError};
