use dioxus::prelude::*;

use crate::color::{
    extract_dominant_colors, hsl_hex, parse_hsl, quantize_hue, quantize_level, recommend,
    recommend_all, ExtractedColor, Scheme, ToneSteps, HUE_STEP_DEGREES, LEVEL_STEP,
};
use crate::core::{format, platform};
use crate::experiment::ConditionVariant;
use crate::export::{ClipboardSink, SystemClipboard};

const DEFAULT_BASE: &str = "#3366cc";
const MAX_EXTRACTED: usize = 6;

/// How colors are chosen. `Recommend` offers scheme and tone suggestions;
/// `Picker` is a plain hue/saturation/lightness selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteMode {
    Recommend,
    Picker,
}

impl PaletteMode {
    pub fn for_condition(condition: ConditionVariant) -> Self {
        match condition {
            ConditionVariant::Ui1 => Self::Recommend,
            ConditionVariant::Ui2 => Self::Picker,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaletteAction {
    ColorPick { color: String, source: &'static str },
    SchemeChange(Scheme),
    RecommendationClick { color: String, scheme: Scheme },
    ApplyColor(String),
    ImageUpload(String),
    ExtractedColorClick { color: String, usage: f64 },
}

#[component]
pub fn PalettePanel(
    mode: PaletteMode,
    tone_steps: ToneSteps,
    on_action: EventHandler<PaletteAction>,
) -> Element {
    let mut base = use_signal(|| DEFAULT_BASE.to_string());
    let mut scheme = use_signal(|| Scheme::Analogous);
    let mut selected = use_signal(|| DEFAULT_BASE.to_string());
    let mut extracted = use_signal(Vec::<ExtractedColor>::new);
    let mut upload_error = use_signal(|| Option::<String>::None);
    let mut copy_note = use_signal(|| Option::<String>::None);

    let mut picker = use_signal(|| (225.0_f64, 0.6_f64, 0.5_f64));

    let mut choose = move |color: String| {
        selected.set(color);
        copy_note.set(None);
    };

    let on_upload = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        for name in engine.files() {
            on_action.call(PaletteAction::ImageUpload(name.clone()));
            match engine.read_file(&name).await {
                Some(bytes) => match extract_dominant_colors(&bytes, MAX_EXTRACTED) {
                    Ok(colors) => {
                        upload_error.set(None);
                        extracted.set(colors);
                    }
                    Err(err) => {
                        log::warn!("Color extraction failed for {name}: {err}");
                        upload_error.set(Some(format!("{name}: {err}")));
                    }
                },
                None => upload_error.set(Some(format!("Could not read {name}"))),
            }
        }
    };

    let copy_selected = move |_| {
        let hex = selected();
        platform::spawn_future(async move {
            match SystemClipboard.copy_text(hex.clone()).await {
                Ok(()) => copy_note.set(Some(format!("Copied {hex}"))),
                Err(err) => copy_note.set(Some(err.to_string())),
            }
        });
    };

    let body = match mode {
        PaletteMode::Recommend => {
            let current_scheme = scheme();
            let recommendation = match recommend(&base(), current_scheme, &tone_steps) {
                Ok(rec) => Some(rec),
                Err(err) => {
                    log::warn!("No recommendation: {err}");
                    None
                }
            };
            let per_extracted = recommend_all(&extracted(), current_scheme, &tone_steps);

            rsx! {
                div { class: "palette__row",
                    label { class: "palette__field",
                        "Base color"
                        input {
                            r#type: "color",
                            value: "{base}",
                            oninput: move |evt: FormEvent| {
                                let color = evt.value();
                                base.set(color.clone());
                                choose(color.clone());
                                on_action.call(PaletteAction::ColorPick { color, source: "base" });
                            },
                        }
                    }
                    label { class: "palette__field",
                        "Scheme"
                        select {
                            value: "{current_scheme.id()}",
                            onchange: move |evt: FormEvent| {
                                if let Ok(next) = evt.value().parse::<Scheme>() {
                                    scheme.set(next);
                                    on_action.call(PaletteAction::SchemeChange(next));
                                }
                            },
                            for option_scheme in Scheme::ALL {
                                option { key: "{option_scheme.id()}", value: "{option_scheme.id()}", "{option_scheme}" }
                            }
                        }
                    }
                }
                if let Some(rec) = recommendation {
                    h4 { "Scheme colors" }
                    div { class: "palette__swatches",
                        for color in rec.scheme_colors.clone() {
                            SwatchButton {
                                key: "scheme-{color}",
                                color: color.clone(),
                                active: selected() == color,
                                onpick: move |color: String| {
                                    choose(color.clone());
                                    on_action.call(PaletteAction::RecommendationClick { color, scheme: current_scheme });
                                },
                            }
                        }
                    }
                    h4 { "Tones" }
                    div { class: "palette__swatches palette__swatches--tones",
                        for (idx, color) in rec.tones.clone().into_iter().enumerate() {
                            SwatchButton {
                                key: "tone-{idx}",
                                color: color.clone(),
                                active: selected() == color,
                                onpick: move |color: String| {
                                    choose(color.clone());
                                    on_action.call(PaletteAction::ColorPick { color, source: "tone" });
                                },
                            }
                        }
                    }
                }
                if !per_extracted.is_empty() {
                    h4 { "From your image" }
                    for rec in per_extracted {
                        div { key: "extracted-{rec.base}", class: "palette__swatches",
                            for color in rec.scheme_colors {
                                SwatchButton {
                                    key: "{rec.base}-{color}",
                                    color: color.clone(),
                                    active: selected() == color,
                                    onpick: move |color: String| {
                                        choose(color.clone());
                                        on_action.call(PaletteAction::RecommendationClick { color, scheme: current_scheme });
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }
        PaletteMode::Picker => {
            let (hue, saturation, lightness) = picker();
            rsx! {
                div { class: "palette__sliders",
                    label { class: "palette__field",
                        "Hue {hue:.0}°"
                        input {
                            r#type: "range",
                            min: "0",
                            max: "345",
                            step: "{HUE_STEP_DEGREES}",
                            value: "{hue}",
                            oninput: move |evt: FormEvent| {
                                let raw = evt.value().parse::<f64>().unwrap_or(hue);
                                picker.with_mut(|p| p.0 = quantize_hue(raw));
                            },
                            onchange: move |_| {
                                let (h, s, l) = picker();
                                let color = hsl_hex(h, s, l);
                                choose(color.clone());
                                on_action.call(PaletteAction::ColorPick { color, source: "hue" });
                            },
                        }
                    }
                    label { class: "palette__field",
                        "Saturation {format::format_percent(saturation)}"
                        input {
                            r#type: "range",
                            min: "0",
                            max: "1",
                            step: "{LEVEL_STEP}",
                            value: "{saturation}",
                            oninput: move |evt: FormEvent| {
                                let raw = evt.value().parse::<f64>().unwrap_or(saturation);
                                picker.with_mut(|p| p.1 = quantize_level(raw));
                            },
                            onchange: move |_| {
                                let (h, s, l) = picker();
                                let color = hsl_hex(h, s, l);
                                choose(color.clone());
                                on_action.call(PaletteAction::ColorPick { color, source: "saturation" });
                            },
                        }
                    }
                    label { class: "palette__field",
                        "Lightness {format::format_percent(lightness)}"
                        input {
                            r#type: "range",
                            min: "0",
                            max: "1",
                            step: "{LEVEL_STEP}",
                            value: "{lightness}",
                            oninput: move |evt: FormEvent| {
                                let raw = evt.value().parse::<f64>().unwrap_or(lightness);
                                picker.with_mut(|p| p.2 = quantize_level(raw));
                            },
                            onchange: move |_| {
                                let (h, s, l) = picker();
                                let color = hsl_hex(h, s, l);
                                choose(color.clone());
                                on_action.call(PaletteAction::ColorPick { color, source: "lightness" });
                            },
                        }
                    }
                    span {
                        class: "swatch swatch--large",
                        style: "background:{hsl_hex(hue, saturation, lightness)}",
                    }
                }
            }
        }
    };

    let current = selected();
    let current_valid = parse_hsl(&current).is_ok();

    rsx! {
        section { class: "palette",
            {body}

            div { class: "palette__upload",
                label { class: "palette__field",
                    "Reference image"
                    input {
                        r#type: "file",
                        accept: "image/*",
                        onchange: on_upload,
                    }
                }
                if let Some(err) = upload_error() {
                    p { class: "palette__error", "⚠️ {err}" }
                }
                if !extracted().is_empty() {
                    div { class: "palette__swatches",
                        for entry in extracted() {
                            SwatchButton {
                                key: "{entry.color}",
                                color: entry.color.clone(),
                                active: selected() == entry.color,
                                onpick: move |color: String| {
                                    base.set(color.clone());
                                    choose(color.clone());
                                    on_action.call(PaletteAction::ExtractedColorClick { color, usage: entry.usage });
                                },
                            }
                        }
                    }
                }
            }

            div { class: "palette__selection",
                span { class: "swatch swatch--large", style: "background:{current}" }
                code { "{current}" }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: !current_valid,
                    onclick: move |_| on_action.call(PaletteAction::ApplyColor(selected())),
                    "Use this color"
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: copy_selected,
                    "Copy"
                }
                if let Some(note) = copy_note() {
                    span { class: "palette__note", "{note}" }
                }
            }
        }
    }
}

#[component]
fn SwatchButton(color: String, active: bool, onpick: EventHandler<String>) -> Element {
    let class = if active { "swatch swatch--active" } else { "swatch" };
    let picked = color.clone();
    rsx! {
        button {
            r#type: "button",
            class: "{class}",
            style: "background:{color}",
            title: "{color}",
            onclick: move |_| onpick.call(picked.clone()),
        }
    }
}
