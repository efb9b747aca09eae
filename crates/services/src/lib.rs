#![forbid(unsafe_code)]

pub mod audio;
pub mod controller;
pub mod error;
pub mod high_score_service;
pub mod scheduler;

pub use audio::{
    AudioBackend, AudioCall, AudioMixer, MusicTrack, RecordingAudio, SilentAudio, SoundEffect,
};
pub use controller::{FinishedQuiz, QuizController};
pub use error::{AudioError, HighScoreError};
pub use high_score_service::HighScoreService;
pub use scheduler::{QuizEvent, Scheduler, TICK_PERIOD};
