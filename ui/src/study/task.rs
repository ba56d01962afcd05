use dioxus::prelude::*;

use crate::core::{format, platform};
use crate::experiment::{ConditionVariant, SessionPhase, TaskVariant};

use super::canvas::{CanvasAction, SketchCanvas};
use super::palette::{PaletteAction, PaletteMode, PalettePanel};
use super::{use_session, use_study_config};

pub const TASK_CANVAS_ID: &str = "task-canvas";

fn task_brief(task: TaskVariant) -> &'static str {
    match task {
        TaskVariant::TaskA => "Color the landscape: sky, hills and the house in front.",
        TaskVariant::TaskB => "Color the character: hair, clothes and background.",
    }
}

fn condition_hint(condition: ConditionVariant) -> &'static str {
    match condition {
        ConditionVariant::Ui1 => "Pick a base color and browse the suggested schemes and tones.",
        ConditionVariant::Ui2 => "Set hue, saturation and lightness yourself with the sliders.",
    }
}

#[component]
pub fn TaskPanel() -> Element {
    let mut session = use_session();
    let config = use_study_config();
    let mut brush = use_signal(|| "#222222".to_string());
    let mut attempt = use_signal(|| 0u32);

    let snapshot = session.read();
    let phase = snapshot.phase();
    let pattern = snapshot.current_pattern();
    let step = snapshot.current_index() + 1;
    let total = snapshot.patterns().len();
    let buffered = snapshot.current_events().len();
    let is_last = step == total;
    let last_duration = snapshot
        .condition_logs()
        .last()
        .and_then(|log| log.task_duration_sec);
    drop(snapshot);

    let on_palette = move |action: PaletteAction| {
        if let PaletteAction::ApplyColor(color) = &action {
            brush.set(color.clone());
        }
        let mut guard = session.write();
        let mut recorder = guard.recorder();
        match action {
            PaletteAction::ColorPick { color, source } => recorder.color_pick(&color, source),
            PaletteAction::SchemeChange(scheme) => recorder.scheme_change(scheme),
            PaletteAction::RecommendationClick { color, scheme } => {
                recorder.recommendation_click(&color, scheme)
            }
            PaletteAction::ApplyColor(color) => recorder.apply_color(&color, None),
            PaletteAction::ImageUpload(name) => recorder.image_upload(&name),
            PaletteAction::ExtractedColorClick { color, usage } => {
                recorder.extracted_color_click(&color, usage)
            }
        };
    };

    let on_canvas = move |action: CanvasAction| {
        let mut guard = session.write();
        let mut recorder = guard.recorder();
        match action {
            CanvasAction::Draw { color } => recorder.canvas_draw("brush", &color),
            CanvasAction::Undo => recorder.canvas_undo(),
            CanvasAction::Redo => recorder.canvas_redo(),
            CanvasAction::Clear => recorder.canvas_clear(),
        };
    };

    let complete = move |_| {
        let snapshot = platform::capture_canvas(TASK_CANVAS_ID);
        if snapshot.is_none() {
            log::warn!("No canvas snapshot captured for this task");
        }
        let _ = session.write().complete_current_condition(snapshot);
    };

    let restart = move |_| {
        if session.write().restart_current_condition().is_ok() {
            attempt += 1;
        }
    };

    let advance = move |_| {
        let _ = session.write().next_condition();
    };

    let running = matches!(phase, SessionPhase::TaskRunning { .. });

    rsx! {
        section { class: "study-card study-task",
            div { class: "study-card__header",
                h2 { "Task {step} of {total}" }
                span { class: "study-task__pattern", "{pattern}" }
            }
            p { class: "study-task__brief", {task_brief(pattern.task)} }
            p { class: "study-card__meta", {condition_hint(pattern.condition)} }

            if running {
                // Keyed per task and attempt so the canvas and palette start blank.
                for (current, tries) in [(pattern, attempt())] {
                    div { key: "{current}-{tries}", class: "study-task__workspace",
                        PalettePanel {
                            mode: PaletteMode::for_condition(current.condition),
                            tone_steps: config.tone_steps.clone(),
                            on_action: on_palette,
                        }
                        SketchCanvas {
                            canvas_id: TASK_CANVAS_ID.to_string(),
                            color: brush(),
                            on_action: on_canvas,
                        }
                    }
                }
                div { class: "study-task__actions",
                    span { class: "study-card__meta", "{buffered} interaction(s) recorded" }
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        onclick: restart,
                        "Restart task"
                    }
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        onclick: complete,
                        "Complete task"
                    }
                }
            } else {
                div { class: "study-task__done",
                    p { "Task finished in {format::format_optional_seconds(last_duration)}." }
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        onclick: advance,
                        if is_last { "Finish and go to the survey" } else { "Next task" }
                    }
                }
            }
        }
    }
}
