use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::GamePhase;
use services::{HighScoreService, QuizController, QuizEvent};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::context::AppContext;
use crate::views::{AudioControls, MenuScreen, QuizScreen, ResultScreen};
use crate::vm::{AudioVm, QuizScreenVm, ResultVm, map_quiz_screen, map_result};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Everything the screens can ask for.
#[derive(Clone, Debug, PartialEq)]
pub enum GameIntent {
    Start,
    Answer(String),
    ReturnToMenu,
    ToggleAudioControls,
    ToggleMute,
    SetVolume(f32),
}

#[derive(Clone, Debug, PartialEq)]
enum ScreenVm {
    Menu { high_score: u32 },
    Quiz(QuizScreenVm),
    Result(ResultVm),
}

impl ScreenVm {
    fn from_controller(controller: &QuizController) -> Self {
        match controller.phase() {
            GamePhase::Menu => Self::Menu {
                high_score: controller.high_score(),
            },
            GamePhase::Playing(session) => map_quiz_screen(session).map_or(
                Self::Menu {
                    high_score: controller.high_score(),
                },
                Self::Quiz,
            ),
            GamePhase::Finished(result) => {
                Self::Result(map_result(*result, controller.high_score()))
            }
        }
    }
}

/// Drain scheduled events into the controller and persist new best scores.
async fn pump_events(
    mut controller: Signal<QuizController>,
    mut events: UnboundedReceiver<QuizEvent>,
    high_scores: Arc<HighScoreService>,
) {
    while let Some(event) = events.recv().await {
        let finished = controller.write().handle(event);
        let Some(done) = finished else {
            continue;
        };
        if let Some(best) = high_scores.record_finished(done).await {
            controller.write().apply_high_score(best);
        }
    }
}

/// Top-level owner of the running game.
#[component]
pub fn GameView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = use_hook(|| {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let controller = Signal::new(
            QuizController::new(ctx.question_bank(), ctx.audio(), events_tx)
                .with_high_score(ctx.initial_high_score()),
        );
        spawn(pump_events(controller, events_rx, ctx.high_scores()));
        controller
    });
    let show_audio_controls = use_signal(|| false);

    let dispatch = use_callback(move |intent: GameIntent| {
        let mut controller = controller;
        let mut show_audio_controls = show_audio_controls;
        log::trace!("intent: {intent:?}");
        match intent {
            GameIntent::Start => {
                show_audio_controls.set(false);
                controller.write().start();
            }
            GameIntent::Answer(option) => {
                controller.write().submit(&option);
            }
            GameIntent::ReturnToMenu => {
                show_audio_controls.set(false);
                controller.write().return_to_menu();
            }
            GameIntent::ToggleAudioControls => {
                show_audio_controls.set(!show_audio_controls());
            }
            GameIntent::ToggleMute => controller.write().toggle_mute(),
            GameIntent::SetVolume(volume) => controller.write().set_music_volume(volume),
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<GameTestHandles>() {
                handles.register(dispatch, controller);
            }
        }
    }

    let (screen, audio) = {
        let controller = controller.read();
        (
            ScreenVm::from_controller(&controller),
            AudioVm::from(controller.audio()),
        )
    };

    rsx! {
        div { class: "game",
            div { class: "toolbar",
                button {
                    class: "btn btn-icon settings-toggle",
                    r#type: "button",
                    title: "Sound settings",
                    onclick: move |_| dispatch.call(GameIntent::ToggleAudioControls),
                    "⚙"
                }
                if show_audio_controls() {
                    AudioControls {
                        vm: audio,
                        on_toggle_mute: move |()| dispatch.call(GameIntent::ToggleMute),
                        on_volume: move |volume| dispatch.call(GameIntent::SetVolume(volume)),
                    }
                }
            }
            match screen {
                ScreenVm::Menu { high_score } => rsx! {
                    MenuScreen {
                        high_score,
                        on_start: move |()| dispatch.call(GameIntent::Start),
                    }
                },
                ScreenVm::Quiz(vm) => rsx! {
                    QuizScreen {
                        vm,
                        on_answer: move |option| dispatch.call(GameIntent::Answer(option)),
                        on_quit: move |()| dispatch.call(GameIntent::ReturnToMenu),
                    }
                },
                ScreenVm::Result(vm) => rsx! {
                    ResultScreen {
                        vm,
                        on_play_again: move |()| dispatch.call(GameIntent::Start),
                        on_menu: move |()| dispatch.call(GameIntent::ReturnToMenu),
                    }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct GameTestHandles {
    dispatch: Rc<RefCell<Option<Callback<GameIntent>>>>,
    controller: Rc<RefCell<Option<Signal<QuizController>>>>,
}

#[cfg(test)]
impl GameTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<GameIntent>, controller: Signal<QuizController>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.controller.borrow_mut() = Some(controller);
    }

    pub(crate) fn dispatch(&self) -> Callback<GameIntent> {
        (*self.dispatch.borrow()).expect("game dispatch registered")
    }

    pub(crate) fn controller(&self) -> Signal<QuizController> {
        (*self.controller.borrow()).expect("game controller registered")
    }
}
