mod audio_controls;
mod game;
mod menu;
mod quiz;
mod result;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use audio_controls::AudioControls;
pub use game::{GameIntent, GameView};
pub use menu::MenuScreen;
pub use quiz::QuizScreen;
pub use result::ResultScreen;
