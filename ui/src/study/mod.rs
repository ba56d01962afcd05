//! Dioxus panels that drive an experiment session.

use dioxus::prelude::*;

use crate::core::config::StudyConfig;
use crate::experiment::ExperimentSession;

mod canvas;
pub use canvas::{CanvasAction, SketchCanvas, Stroke, StrokeHistory};

mod entry;
pub use entry::EntryPanel;

mod finish;
pub use finish::FinishPanel;

mod palette;
pub use palette::{PaletteAction, PaletteMode, PalettePanel};

mod survey;
pub use survey::SurveyPanel;

mod task;
pub use task::{TaskPanel, TASK_CANVAS_ID};

/// Provides the study configuration and the single session every panel
/// below it reads and drives.
#[component]
pub fn StudyProvider(children: Element) -> Element {
    let config = use_context_provider(StudyConfig::from_environment);
    use_context_provider(|| Signal::new(ExperimentSession::new(config.order_pattern)));
    rsx! {
        {children}
    }
}

pub fn use_session() -> Signal<ExperimentSession> {
    use_context()
}

pub fn use_study_config() -> StudyConfig {
    use_context()
}
