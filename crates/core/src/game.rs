use rand::Rng;

use crate::model::QuestionBank;
use crate::session::{AnswerTicket, QuizSession, Resolution, Submission, TickOutcome};

/// Final numbers of a finished session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizResult {
    pub score: u32,
    pub total_questions: usize,
    pub lives_left: u8,
}

/// Top-level screen state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing(QuizSession),
    Finished(QuizResult),
}

/// Menu → playing → finished state machine.
///
/// Generations keep increasing across sessions: a new session starts above
/// every generation the previous one handed out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizGame {
    phase: GamePhase,
    next_generation: u64,
}

impl QuizGame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.phase {
            GamePhase::Playing(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        match &self.phase {
            GamePhase::Finished(result) => Some(*result),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, GamePhase::Playing(_))
    }

    /// Start (or restart from the results screen) with a freshly shuffled session.
    ///
    /// Returns `false` and leaves the running session alone when already playing.
    pub fn start<R: Rng + ?Sized>(&mut self, bank: &QuestionBank, rng: &mut R) -> bool {
        if self.is_playing() {
            return false;
        }
        let session = QuizSession::shuffled(bank, rng);
        self.phase = GamePhase::Playing(session.with_generation_floor(self.next_generation));
        true
    }

    /// Start with an already built session. Used for fixed question orders.
    pub fn start_with(&mut self, session: QuizSession) -> bool {
        if self.is_playing() {
            return false;
        }
        self.phase = GamePhase::Playing(session.with_generation_floor(self.next_generation));
        true
    }

    pub fn submit(&mut self, option: &str) -> Option<Submission> {
        match &mut self.phase {
            GamePhase::Playing(session) => session.submit(option),
            _ => None,
        }
    }

    pub fn resolve(&mut self, ticket: AnswerTicket) -> Option<Resolution> {
        let GamePhase::Playing(session) = &mut self.phase else {
            return None;
        };
        let resolution = session.resolve(ticket)?;
        self.finish_if_done(resolution);
        Some(resolution)
    }

    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        let GamePhase::Playing(session) = &mut self.phase else {
            return TickOutcome::Ignored;
        };
        let outcome = session.tick(generation);
        if let TickOutcome::TimedOut(resolution) = outcome {
            self.finish_if_done(resolution);
        }
        outcome
    }

    /// Abandon any session and go back to the menu.
    pub fn return_to_menu(&mut self) {
        self.retire_session();
        self.phase = GamePhase::Menu;
    }

    fn retire_session(&mut self) {
        if let GamePhase::Playing(session) = &self.phase {
            self.next_generation = self.next_generation.max(session.generation() + 1);
        }
    }

    fn finish_if_done(&mut self, resolution: Resolution) {
        if !matches!(resolution, Resolution::Finished { .. }) {
            return;
        }
        self.retire_session();
        if let GamePhase::Playing(session) = &self.phase {
            self.phase = GamePhase::Finished(QuizResult {
                score: session.score(),
                total_questions: session.total_questions(),
                lives_left: session.lives(),
            });
        }
    }
}
