use dioxus::prelude::*;

use crate::core::{format, platform, storage};
use crate::export::{self, ClipboardSink, FileDownload, SystemClipboard};

use super::use_session;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(&'static str),
    Done(String),
    Error(String),
}

#[component]
pub fn FinishPanel() -> Element {
    let mut session = use_session();
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let log = session.read().experiment_log();
    let total_events = log.total_events();
    let conditions = log.conditions.clone();
    let total = format::format_optional_seconds(log.total_duration_sec);
    let participant = export::participant_slug(&log.participant_id);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => Some(("study-card__meta".to_string(), format!("{label}…"))),
        ExportStatus::Done(message) => Some((
            "study-card__meta study-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "study-card__meta study-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let archive_handler = {
        let mut status_signal = status;
        let mut busy_signal = busy;
        move |_| {
            if busy_signal() {
                return;
            }
            busy_signal.set(true);
            status_signal.set(ExportStatus::Working("Building archive"));
            let built = export::build_bundle(&*session.read());
            match built {
                Ok(bundle) => platform::spawn_future(async move {
                    match export::deliver_bundle(bundle, &FileDownload).await {
                        Ok(message) => status_signal.set(ExportStatus::Done(message)),
                        Err(err) => {
                            log::error!("Export failed: {err}");
                            status_signal.set(ExportStatus::Error(err.to_string()))
                        }
                    }
                    busy_signal.set(false);
                }),
                Err(err) => {
                    log::error!("Export failed: {err}");
                    status_signal.set(ExportStatus::Error(err.to_string()));
                    busy_signal.set(false);
                }
            }
        }
    };

    let copy_handler = {
        let mut status_signal = status;
        move |_| {
            let json = match serde_json::to_string_pretty(&session.read().experiment_log()) {
                Ok(json) => json,
                Err(err) => {
                    status_signal.set(ExportStatus::Error(err.to_string()));
                    return;
                }
            };
            platform::spawn_future(async move {
                match SystemClipboard.copy_text(json).await {
                    Ok(()) => status_signal.set(ExportStatus::Done("Log copied to clipboard".into())),
                    Err(err) => status_signal.set(ExportStatus::Error(err.to_string())),
                }
            });
        }
    };

    let restart = move |_| {
        session.write().reset_experiment();
        if let Err(err) = storage::clear_last_log() {
            log::warn!("Stored log not cleared: {err}");
        }
    };

    rsx! {
        section { class: "study-card study-finish",
            div { class: "study-card__header",
                h2 { "Thank you!" }
                span { class: "study-card__meta", "Participant {participant}" }
            }
            p { "All four tasks are done. Download the archive and hand it to the experimenter." }

            ul { class: "study-finish__summary",
                li { strong { "{total}" } " total time" }
                li { strong { "{total_events}" } " recorded interactions" }
                for condition in conditions {
                    li { key: "{condition.pattern}",
                        "{condition.pattern}: "
                        strong { "{format::format_optional_seconds(condition.task_duration_sec)}" }
                        " · {condition.events.len()} events"
                    }
                }
            }

            div { class: "study-finish__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: busy(),
                    onclick: archive_handler,
                    "Download archive"
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy(),
                    onclick: copy_handler,
                    "Copy JSON"
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: restart,
                    "Start a new session"
                }
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}
