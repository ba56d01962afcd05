use dioxus::prelude::*;

use crate::study::{use_study_config, PaletteAction, PaletteMode, PalettePanel};

/// The recommendation tool on its own, outside any session. Nothing is recorded.
#[component]
pub fn Palette() -> Element {
    let config = use_study_config();
    let mut mode = use_signal(|| PaletteMode::Recommend);

    rsx! {
        section { class: "page page-palette",
            h1 { "Palette tool" }
            p { "Explore color schemes and tones for any base color or reference image." }

            div { class: "page-palette__modes",
                button {
                    r#type: "button",
                    class: if mode() == PaletteMode::Recommend { "button button--primary" } else { "button" },
                    onclick: move |_| mode.set(PaletteMode::Recommend),
                    "Schemes & tones"
                }
                button {
                    r#type: "button",
                    class: if mode() == PaletteMode::Picker { "button button--primary" } else { "button" },
                    onclick: move |_| mode.set(PaletteMode::Picker),
                    "Picker"
                }
            }

            PalettePanel {
                mode: mode(),
                tone_steps: config.tone_steps.clone(),
                on_action: move |_: PaletteAction| {},
            }
        }
    }
}
