use dioxus::prelude::*;

use crate::vm::ResultVm;

#[component]
pub fn ResultScreen(vm: ResultVm, on_play_again: EventHandler<()>, on_menu: EventHandler<()>) -> Element {
    rsx! {
        section { class: "screen result-screen fade-in",
            h1 { class: "title", "Quiz finished!" }
            if vm.out_of_lives {
                p { class: "subtitle", "You ran out of lives." }
            }
            p { class: "final-score", "Your score: {vm.score} of {vm.total_questions}" }
            p { class: "high-score", "High score: {vm.high_score}" }
            div { class: "actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_play_again.call(()),
                    "Play again"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_menu.call(()),
                    "Return to menu"
                }
            }
        }
    }
}
