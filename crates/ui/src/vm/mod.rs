mod audio_vm;
mod quiz_vm;
mod result_vm;

pub use audio_vm::AudioVm;
pub use quiz_vm::{OptionVm, QuizScreenVm, highlight_class, map_quiz_screen};
pub use result_vm::{ResultVm, map_result};
