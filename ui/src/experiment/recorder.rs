use crate::color::Scheme;
use crate::core::timing::Clock;

use super::{EventKind, ExperimentSession};

/// Typed entry points for UI callbacks. Every method is a silent no-op
/// unless a task is running, and returns whether the event was kept.
pub struct EventRecorder<'s, C: Clock> {
    session: &'s mut ExperimentSession<C>,
}

impl<'s, C: Clock> EventRecorder<'s, C> {
    pub fn new(session: &'s mut ExperimentSession<C>) -> Self {
        Self { session }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_running()
    }

    pub fn color_pick(&mut self, color: &str, source: &str) -> bool {
        self.forward(EventKind::ColorPick, color, Some(source))
    }

    pub fn recommendation_click(&mut self, color: &str, scheme: Scheme) -> bool {
        self.forward(EventKind::RecommendationClick, color, Some(scheme.id()))
    }

    pub fn apply_color(&mut self, color: &str, region: Option<&str>) -> bool {
        self.forward(EventKind::ApplyColor, color, region)
    }

    pub fn scheme_change(&mut self, scheme: Scheme) -> bool {
        self.forward(EventKind::SchemeChange, scheme.id(), None)
    }

    pub fn image_upload(&mut self, file_name: &str) -> bool {
        self.forward(EventKind::ImageUpload, file_name, None)
    }

    pub fn extracted_color_click(&mut self, color: &str, usage: f64) -> bool {
        let share = format!("{:.3}", usage);
        self.forward(EventKind::ExtractedColorClick, color, Some(&share))
    }

    pub fn canvas_draw(&mut self, tool: &str, color: &str) -> bool {
        self.forward(EventKind::CanvasDraw, color, Some(tool))
    }

    pub fn canvas_undo(&mut self) -> bool {
        self.forward(EventKind::CanvasUndo, "undo", None)
    }

    pub fn canvas_redo(&mut self) -> bool {
        self.forward(EventKind::CanvasRedo, "redo", None)
    }

    pub fn canvas_clear(&mut self) -> bool {
        self.forward(EventKind::CanvasClear, "clear", None)
    }

    fn forward(&mut self, kind: EventKind, value: &str, target: Option<&str>) -> bool {
        if !self.session.is_running() {
            log::debug!("Recorder inactive; {kind} not captured");
            return false;
        }
        self.session
            .record_event(kind, value, target.map(str::to_string))
            .is_ok()
    }
}

impl<C: Clock> ExperimentSession<C> {
    pub fn recorder(&mut self) -> EventRecorder<'_, C> {
        EventRecorder::new(self)
    }
}
