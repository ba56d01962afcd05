use dioxus::prelude::*;

use crate::core::storage;
use crate::experiment::{ConditionVariant, SurveyResponse, RATING_MAX, RATING_MIN, SURVEY_ITEMS};

use super::use_session;

#[component]
pub fn SurveyPanel() -> Element {
    let mut session = use_session();
    let mut draft = use_signal(SurveyResponse::default);
    let mut error = use_signal(|| Option::<String>::None);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let response = draft();
        if let Err(err) = response.validate() {
            error.set(Some(err.to_string()));
            return;
        }
        error.set(None);
        session.write().set_survey_response(response);
        if let Err(err) = storage::save_last_log(&session.read().experiment_log()) {
            log::warn!("Finished log not stored locally: {err}");
        }
    };

    let current = draft();

    rsx! {
        section { class: "study-card study-survey",
            h2 { "Questionnaire" }
            p { "Rate each statement from 1 (strongly disagree) to 5 (strongly agree) for both interfaces." }

            form { class: "study-survey__form", onsubmit: submit,
                for condition in ConditionVariant::ALL {
                    fieldset { key: "{condition.as_str()}", class: "study-survey__block",
                        legend { "{condition.as_str()}" }
                        for (item, statement) in SURVEY_ITEMS.iter().enumerate() {
                            div { key: "{condition.as_str()}-{item}", class: "study-survey__item",
                                span { class: "study-survey__statement", "{item + 1}. {statement}" }
                                div { class: "study-survey__scale",
                                    for rating in RATING_MIN..=RATING_MAX {
                                        label { key: "{rating}",
                                            input {
                                                r#type: "radio",
                                                name: "{condition.as_str()}-{item}",
                                                value: "{rating}",
                                                checked: current.ratings_for(condition)[item] == rating,
                                                onchange: move |_| draft.with_mut(|d| d.set_rating(condition, item, rating)),
                                            }
                                            "{rating}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                fieldset { class: "study-survey__block",
                    legend { "Which interface did you prefer?" }
                    for condition in ConditionVariant::ALL {
                        label { key: "favorite-{condition.as_str()}",
                            input {
                                r#type: "radio",
                                name: "favorite_ui",
                                value: "{condition.as_str()}",
                                checked: current.favorite_ui == Some(condition),
                                onchange: move |_| draft.with_mut(|d| d.favorite_ui = Some(condition)),
                            }
                            "{condition.as_str()}"
                        }
                    }
                    label { class: "study-field",
                        "Why?"
                        textarea {
                            value: "{current.reason}",
                            oninput: move |evt: FormEvent| draft.with_mut(|d| d.reason = evt.value()),
                        }
                    }
                    label { class: "study-field",
                        "Suggestions (optional)"
                        textarea {
                            value: "{current.suggestions.clone().unwrap_or_default()}",
                            oninput: move |evt: FormEvent| {
                                let text = evt.value();
                                draft.with_mut(|d| {
                                    d.suggestions = if text.trim().is_empty() { None } else { Some(text) }
                                })
                            },
                        }
                    }
                }

                if let Some(message) = error() {
                    p { class: "study-card__meta study-card__meta--error", "⚠️ {message}" }
                }

                button { r#type: "submit", class: "button button--primary", "Submit answers" }
            }
        }
    }
}
