use dioxus::prelude::*;

use crate::vm::QuizScreenVm;

#[component]
pub fn QuizScreen(
    vm: QuizScreenVm,
    on_answer: EventHandler<String>,
    on_quit: EventHandler<()>,
) -> Element {
    let locked = vm.locked;
    let options = vm.options.iter().map(|option| {
        let label = option.label.clone();
        rsx! {
            button {
                key: "{option.label}",
                class: "{option.class}",
                r#type: "button",
                disabled: locked,
                onclick: move |_| on_answer.call(label.clone()),
                "{option.label}"
            }
        }
    });

    rsx! {
        section { class: "screen quiz-screen fade-in",
            header { class: "quiz-status",
                span { class: "timer", "Time: {vm.time_left}" }
                span { class: "lives", title: "{vm.lives} lives left", "{vm.hearts}" }
                span { class: "score", "Score: {vm.score}" }
            }
            p { class: "progress", "Question {vm.question_number} of {vm.total_questions}" }
            h2 { class: "prompt", "{vm.prompt}" }
            div { class: "options", {options} }
            button {
                class: "btn btn-secondary quit",
                r#type: "button",
                onclick: move |_| on_quit.call(()),
                "Quit"
            }
        }
    }
}
