use core::fmt;

use serde::{Deserialize, Serialize};

/// Interaction categories captured during a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ColorPick,
    RecommendationClick,
    ApplyColor,
    SchemeChange,
    ImageUpload,
    ExtractedColorClick,
    CanvasDraw,
    CanvasUndo,
    CanvasRedo,
    CanvasClear,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ColorPick => "color_pick",
            Self::RecommendationClick => "recommendation_click",
            Self::ApplyColor => "apply_color",
            Self::SchemeChange => "scheme_change",
            Self::ImageUpload => "image_upload",
            Self::ExtractedColorClick => "extracted_color_click",
            Self::CanvasDraw => "canvas_draw",
            Self::CanvasUndo => "canvas_undo",
            Self::CanvasRedo => "canvas_redo",
            Self::CanvasClear => "canvas_clear",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded interaction. `time` is seconds since the task started;
/// `timestamp` is the wall-clock instant in ISO-8601.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub time: f64,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_kind_as_type_and_omits_empty_target() {
        let event = ExperimentEvent {
            kind: EventKind::CanvasUndo,
            value: "stroke-3".into(),
            target: None,
            time: 1.5,
            timestamp: "2024-05-01T10:00:01.5Z".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "canvas_undo");
        assert!(json.get("target").is_none());
        assert_eq!(json["time"], 1.5);
    }

    #[test]
    fn display_matches_wire_name() {
        let wire = serde_json::to_string(&EventKind::ExtractedColorClick).unwrap();
        assert_eq!(wire, format!("\"{}\"", EventKind::ExtractedColorClick));
    }
}
