use std::sync::Arc;

use quiz_core::model::QuestionBank;
use quiz_core::{GamePhase, QuizGame, QuizSession, Resolution, TickOutcome};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::UnboundedSender;

use crate::audio::{AudioMixer, MusicTrack, SoundEffect};
use crate::scheduler::{QuizEvent, Scheduler};

/// Emitted when a session ends, so the owner can persist a new best score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinishedQuiz {
    pub score: u32,
    pub previous_best: u32,
}

impl FinishedQuiz {
    #[must_use]
    pub fn is_new_best(&self) -> bool {
        self.score > self.previous_best
    }
}

/// Single owner of the game state.
///
/// Player intents (`start`, `submit`, ...) and scheduled `QuizEvent`s are the
/// only ways in. Every transition cancels and re-arms the scheduled work that
/// belongs to the new state.
pub struct QuizController {
    bank: Arc<QuestionBank>,
    game: QuizGame,
    high_score: u32,
    audio: AudioMixer,
    scheduler: Scheduler,
    rng: StdRng,
}

impl QuizController {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, audio: AudioMixer, events: UnboundedSender<QuizEvent>) -> Self {
        Self {
            bank,
            game: QuizGame::new(),
            high_score: 0,
            audio,
            scheduler: Scheduler::new(events),
            rng: StdRng::from_os_rng(),
        }
    }

    #[must_use]
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn phase(&self) -> &GamePhase {
        self.game.phase()
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.game.session()
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn audio(&self) -> &AudioMixer {
        &self.audio
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_ticking()
    }

    /// Start a new shuffled session from the menu or the results screen.
    pub fn start(&mut self) -> bool {
        if !self.game.start(&self.bank, &mut self.rng) {
            log::debug!("start ignored: a session is already running");
            return false;
        }
        self.on_started();
        true
    }

    /// Start with a prepared session (fixed question order).
    pub fn start_with(&mut self, session: QuizSession) -> bool {
        if !self.game.start_with(session) {
            return false;
        }
        self.on_started();
        true
    }

    fn on_started(&mut self) {
        if let Some(session) = self.game.session() {
            log::info!("quiz started with {} questions", session.total_questions());
        }
        self.scheduler.cancel_all();
        self.rearm_ticker();
        self.audio.play_music(MusicTrack::Quiz);
    }

    /// Answer the current question.
    ///
    /// Returns whether the answer was correct, or `None` if input is locked or
    /// no session is running.
    pub fn submit(&mut self, option: &str) -> Option<bool> {
        let submission = self.game.submit(option)?;
        self.scheduler.cancel_ticker();
        self.scheduler.schedule_reveal(submission.ticket);
        self.audio.play_effect(if submission.correct {
            SoundEffect::Correct
        } else {
            SoundEffect::Incorrect
        });
        log::debug!("answer submitted (correct: {})", submission.correct);
        Some(submission.correct)
    }

    /// Apply a scheduled event. Returns the final numbers when it ended the session.
    pub fn handle(&mut self, event: QuizEvent) -> Option<FinishedQuiz> {
        match event {
            QuizEvent::Tick { generation } => match self.game.tick(generation) {
                TickOutcome::Ignored | TickOutcome::Counting { .. } => None,
                TickOutcome::TimedOut(resolution) => {
                    log::debug!("question timed out");
                    self.after_resolution(resolution)
                }
            },
            QuizEvent::Reveal(ticket) => {
                let resolution = self.game.resolve(ticket)?;
                self.scheduler.cancel_reveal();
                self.after_resolution(resolution)
            }
        }
    }

    fn after_resolution(&mut self, resolution: Resolution) -> Option<FinishedQuiz> {
        match resolution {
            Resolution::Advanced { index } => {
                log::debug!("advanced to question {}", index + 1);
                self.rearm_ticker();
                None
            }
            Resolution::Finished { score } => {
                self.scheduler.cancel_all();
                self.audio.play_music(MusicTrack::Results);
                log::info!("quiz finished with score {score}");
                Some(FinishedQuiz {
                    score,
                    previous_best: self.high_score,
                })
            }
        }
    }

    fn rearm_ticker(&mut self) {
        match self.game.session().and_then(QuizSession::timer_generation) {
            Some(generation) => self.scheduler.arm_ticker(generation),
            None => self.scheduler.cancel_ticker(),
        }
    }

    /// Mirror a score that was successfully persisted as the new best.
    pub fn apply_high_score(&mut self, best: u32) {
        if best > self.high_score {
            self.high_score = best;
        }
    }

    /// Abandon the current session (if any) and show the menu, which has no music.
    pub fn return_to_menu(&mut self) {
        self.scheduler.cancel_all();
        self.game.return_to_menu();
        self.audio.stop_music();
    }

    pub fn toggle_mute(&mut self) {
        self.audio.toggle_mute();
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.audio.set_music_volume(volume);
    }
}
