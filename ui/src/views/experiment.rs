use dioxus::prelude::*;

use crate::experiment::SessionPhase;
use crate::study::{use_session, EntryPanel, FinishPanel, SurveyPanel, TaskPanel};

#[component]
pub fn Experiment() -> Element {
    let session = use_session();
    let phase = session.read().phase();
    let surveyed = session.read().survey().is_some();

    let body = match phase {
        SessionPhase::Idle => rsx! { EntryPanel {} },
        SessionPhase::TaskRunning { .. } | SessionPhase::AwaitingAdvance => rsx! { TaskPanel {} },
        SessionPhase::AllPatternsComplete if !surveyed => rsx! { SurveyPanel {} },
        SessionPhase::AllPatternsComplete => rsx! { FinishPanel {} },
    };

    rsx! {
        section { class: "page page-experiment",
            h1 { "Color selection study" }
            p {
                "Four short illustration tasks with two different color tools, followed by a short questionnaire."
            }
            {body}
        }
    }
}
