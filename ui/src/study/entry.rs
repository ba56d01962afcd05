use dioxus::prelude::*;

use crate::core::{platform, storage};
use crate::experiment::{
    IllustrationExperience, OrderPattern, ParticipantDevice, ParticipantProfile,
};
use crate::export::{self, FileDownload};

use super::{use_session, use_study_config};

#[component]
pub fn EntryPanel() -> Element {
    let mut session = use_session();
    let config = use_study_config();

    let mut profile = use_signal(|| storage::load_profile().unwrap_or_default());
    let mut order = use_signal(|| config.order_pattern);
    let mut error = use_signal(|| Option::<String>::None);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let candidate = profile();
        if let Err(err) = candidate.validate() {
            error.set(Some(err.to_string()));
            return;
        }
        error.set(None);
        if let Err(err) = storage::save_profile(&candidate) {
            log::warn!("Participant profile not stored: {err}");
        }

        let mut guard = session.write();
        let started = guard
            .set_participant_id(candidate.participant_id.clone())
            .and_then(|()| guard.set_participant_info(candidate.info.clone()))
            .and_then(|()| guard.start_full_experiment(order(), candidate.info));
        if let Err(err) = started {
            error.set(Some(err.to_string()));
        }
    };

    let current: ParticipantProfile = profile();
    let patterns = order().patterns();

    rsx! {
        section { class: "study-card study-entry",
            h2 { "Participant" }
            p { "Fill in the details below. The first task starts as soon as you continue." }

            form { class: "study-entry__form", onsubmit: submit,
                label { class: "study-field",
                    "Participant ID"
                    input {
                        r#type: "text",
                        value: "{current.participant_id}",
                        placeholder: "e.g. U001",
                        oninput: move |evt: FormEvent| profile.with_mut(|p| p.participant_id = evt.value()),
                    }
                }

                label { class: "study-field",
                    "Device"
                    select {
                        value: "{current.info.device_type.as_str()}",
                        onchange: move |evt: FormEvent| {
                            profile.with_mut(|p| p.info.device_type = ParticipantDevice::from_value(&evt.value()))
                        },
                        option { value: "unset", "Select…" }
                        for device in ParticipantDevice::CHOICES {
                            option { key: "{device.as_str()}", value: "{device.as_str()}", "{device.as_str()}" }
                        }
                    }
                }

                label { class: "study-field",
                    "Illustration experience"
                    select {
                        value: "{current.info.illustration_experience.as_str()}",
                        onchange: move |evt: FormEvent| {
                            profile.with_mut(|p| {
                                p.info.illustration_experience = IllustrationExperience::from_value(&evt.value())
                            })
                        },
                        option { value: "unset", "Select…" }
                        for level in IllustrationExperience::CHOICES {
                            option { key: "{level.as_str()}", value: "{level.as_str()}", "{level.label()}" }
                        }
                    }
                }

                label { class: "study-field",
                    "Input device"
                    input {
                        r#type: "text",
                        value: "{current.info.input_device}",
                        placeholder: "mouse, pen tablet, finger…",
                        oninput: move |evt: FormEvent| profile.with_mut(|p| p.info.input_device = evt.value()),
                    }
                }

                label { class: "study-field",
                    "Order pattern"
                    select {
                        value: "{order().number()}",
                        onchange: move |evt: FormEvent| {
                            order.set(OrderPattern::from_selector(Some(&evt.value())))
                        },
                        for pattern in OrderPattern::ALL {
                            option { key: "{pattern.number()}", value: "{pattern.number()}", "Pattern {pattern.number()}" }
                        }
                    }
                }

                ol { class: "study-entry__order",
                    for pattern in patterns {
                        li { key: "{pattern}", "{pattern}" }
                    }
                }

                if let Some(message) = error() {
                    p { class: "study-card__meta study-card__meta--error", "⚠️ {message}" }
                }

                button { r#type: "submit", class: "button button--primary", "Start experiment" }
            }
        }

        SavedLogCard {}
    }
}

/// Offers the log of the last finished session kept on this device, so an
/// export lost to a reload or a closed tab can be repeated.
#[component]
fn SavedLogCard() -> Element {
    let mut saved = use_signal(|| storage::load_last_log().filter(|log| log.is_finished()));
    let mut note = use_signal(|| Option::<String>::None);

    let Some(stored) = saved() else {
        return rsx! {};
    };
    let participant = export::participant_slug(&stored.participant_id);
    let total_events = stored.total_events();

    let download = move |_| {
        let Some(stored) = saved() else {
            return;
        };
        match export::build_log_bundle(&stored) {
            Ok(bundle) => platform::spawn_future(async move {
                match export::deliver_bundle(bundle, &FileDownload).await {
                    Ok(message) => note.set(Some(message)),
                    Err(err) => {
                        log::error!("Saved log export failed: {err}");
                        note.set(Some(err.to_string()))
                    }
                }
            }),
            Err(err) => {
                log::error!("Saved log export failed: {err}");
                note.set(Some(err.to_string()));
            }
        }
    };

    let discard = move |_| {
        if let Err(err) = storage::clear_last_log() {
            log::warn!("Stored log not cleared: {err}");
        }
        saved.set(None);
    };

    rsx! {
        section { class: "study-card study-saved",
            h3 { "Saved session" }
            p {
                "A finished session for participant {participant} ({total_events} interactions) is stored on this device. "
                "Canvas snapshots are not kept, so the archive holds the log only."
            }
            div { class: "study-finish__actions",
                button { r#type: "button", class: "button", onclick: download, "Download saved log" }
                button { r#type: "button", class: "button button--ghost", onclick: discard, "Discard" }
            }
            if let Some(message) = note() {
                p { class: "study-card__meta", "{message}" }
            }
        }
    }
}
