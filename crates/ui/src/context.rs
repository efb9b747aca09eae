use std::sync::Arc;

use quiz_core::model::QuestionBank;
use services::{AudioMixer, HighScoreService};

/// Collaborators the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn question_bank(&self) -> Arc<QuestionBank>;
    fn high_scores(&self) -> Arc<HighScoreService>;
    fn audio(&self) -> AudioMixer;

    /// Best score loaded at startup.
    fn initial_high_score(&self) -> u32;
}

#[derive(Clone)]
pub struct AppContext {
    question_bank: Arc<QuestionBank>,
    high_scores: Arc<HighScoreService>,
    audio: AudioMixer,
    initial_high_score: u32,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            question_bank: app.question_bank(),
            high_scores: app.high_scores(),
            audio: app.audio(),
            initial_high_score: app.initial_high_score(),
        }
    }

    #[must_use]
    pub fn question_bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.question_bank)
    }

    #[must_use]
    pub fn high_scores(&self) -> Arc<HighScoreService> {
        Arc::clone(&self.high_scores)
    }

    #[must_use]
    pub fn audio(&self) -> AudioMixer {
        self.audio.clone()
    }

    #[must_use]
    pub fn initial_high_score(&self) -> u32 {
        self.initial_high_score
    }
}

// Provided by the composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
