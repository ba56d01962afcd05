//! Serialisable records produced by a session.
//!
//! [`ConditionLog`] is the finalised record of one task, canvas snapshot
//! included. [`ExperimentLog`] is the export projection: the same data with
//! the snapshots stripped out, since images travel as separate archive
//! entries.

use serde::{Deserialize, Serialize};

use crate::core::platform::DeviceInfo;

use super::{
    ConditionVariant, ExperimentEvent, ExperimentPattern, OrderPattern, ParticipantInfo,
    SurveyResponse, TaskVariant,
};

/// Finalised record of one task-pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionLog {
    pub condition: ConditionVariant,
    pub task: TaskVariant,
    pub pattern: ExperimentPattern,
    pub start_time: String,
    pub end_time: Option<String>,
    pub task_duration_sec: Option<f64>,
    pub events: Vec<ExperimentEvent>,
    /// PNG data URL of the canvas at completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_image: Option<String>,
}

/// A [`ConditionLog`] without its canvas snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedCondition {
    pub condition: ConditionVariant,
    pub task: TaskVariant,
    pub pattern: ExperimentPattern,
    pub start_time: String,
    pub end_time: Option<String>,
    pub task_duration_sec: Option<f64>,
    pub events: Vec<ExperimentEvent>,
}

impl From<&ConditionLog> for ExportedCondition {
    fn from(log: &ConditionLog) -> Self {
        Self {
            condition: log.condition,
            task: log.task,
            pattern: log.pattern,
            start_time: log.start_time.clone(),
            end_time: log.end_time.clone(),
            task_duration_sec: log.task_duration_sec,
            events: log.events.clone(),
        }
    }
}

/// The JSON document written into the export archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentLog {
    pub participant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub participant_info: ParticipantInfo,
    pub device: DeviceInfo,
    pub first_ui: ConditionVariant,
    pub order_pattern: OrderPattern,
    pub experiment_start_time: Option<String>,
    pub experiment_end_time: Option<String>,
    pub total_duration_sec: Option<f64>,
    pub conditions: Vec<ExportedCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey: Option<SurveyResponse>,
    /// Wording of the rated statements, present whenever `survey` is.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub survey_items: Vec<String>,
}

impl ExperimentLog {
    pub fn total_events(&self) -> usize {
        self.conditions.iter().map(|c| c.events.len()).sum()
    }

    pub fn is_finished(&self) -> bool {
        self.experiment_end_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::EventKind;

    fn finished_log() -> ConditionLog {
        ConditionLog {
            condition: ConditionVariant::Ui1,
            task: TaskVariant::TaskA,
            pattern: ExperimentPattern::new(ConditionVariant::Ui1, TaskVariant::TaskA),
            start_time: "2024-05-01T10:00:00Z".into(),
            end_time: Some("2024-05-01T10:01:00Z".into()),
            task_duration_sec: Some(60.0),
            events: vec![ExperimentEvent {
                kind: EventKind::ColorPick,
                value: "#ff0000".into(),
                target: Some("wheel".into()),
                time: 2.0,
                timestamp: "2024-05-01T10:00:02Z".into(),
            }],
            canvas_image: Some("data:image/png;base64,AAAA".into()),
        }
    }

    #[test]
    fn projection_drops_the_snapshot() {
        let exported = ExportedCondition::from(&finished_log());
        let json = serde_json::to_value(&exported).unwrap();
        assert!(json.get("canvas_image").is_none());
        assert_eq!(json["pattern"], "UI1-TaskA");
        assert_eq!(json["condition"], "UI1");
        assert_eq!(json["events"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn unfinished_fields_serialise_as_null() {
        let mut log = finished_log();
        log.end_time = None;
        log.task_duration_sec = None;
        let json = serde_json::to_value(ExportedCondition::from(&log)).unwrap();
        assert!(json["end_time"].is_null());
        assert!(json["task_duration_sec"].is_null());
    }

    #[test]
    fn only_logs_with_an_end_time_count_as_finished() {
        let mut log = ExperimentLog {
            participant_id: "U001".into(),
            session_id: None,
            participant_info: ParticipantInfo::default(),
            device: DeviceInfo::default(),
            first_ui: ConditionVariant::Ui1,
            order_pattern: OrderPattern::One,
            experiment_start_time: Some("2024-05-01T10:00:00Z".into()),
            experiment_end_time: None,
            total_duration_sec: None,
            conditions: vec![ExportedCondition::from(&finished_log())],
            survey: None,
            survey_items: Vec::new(),
        };
        assert!(!log.is_finished());
        assert_eq!(log.total_events(), 1);

        log.experiment_end_time = Some("2024-05-01T10:20:00Z".into());
        assert!(log.is_finished());
    }
}
