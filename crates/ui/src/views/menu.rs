use dioxus::prelude::*;

#[component]
pub fn MenuScreen(high_score: u32, on_start: EventHandler<()>) -> Element {
    rsx! {
        section { class: "screen menu-screen fade-in",
            h1 { class: "title", "Quiz Time" }
            p { class: "subtitle", "Answer before the clock runs out. Three wrong answers and you're done." }
            p { class: "high-score", "High score: {high_score}" }
            button {
                id: "menu-start",
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_start.call(()),
                "Start quiz"
            }
        }
    }
}
