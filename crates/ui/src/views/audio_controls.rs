use dioxus::prelude::*;

use crate::vm::AudioVm;

#[component]
pub fn AudioControls(vm: AudioVm, on_toggle_mute: EventHandler<()>, on_volume: EventHandler<f32>) -> Element {
    rsx! {
        div { class: "audio-controls",
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_toggle_mute.call(()),
                "{vm.mute_label}"
            }
            label { class: "volume",
                "Music volume"
                input {
                    r#type: "range",
                    min: "0",
                    max: "1",
                    step: "0.05",
                    value: "{vm.volume}",
                    disabled: vm.muted,
                    oninput: move |evt: FormEvent| {
                        // Ignore malformed values from the slider.
                        if let Ok(volume) = evt.value().parse::<f32>() {
                            on_volume.call(volume);
                        }
                    },
                }
                span { class: "volume-value", "{vm.volume_label}" }
            }
        }
    }
}
