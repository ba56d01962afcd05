//! The experiment session state machine.
//!
//! A session walks a participant through the four task-patterns of an
//! [`OrderPattern`]:
//!
//! ```text
//! Idle ──start──▶ TaskRunning ──complete──▶ AwaitingAdvance ──next──▶ TaskRunning …
//!                                                    └──next (last)──▶ AllPatternsComplete
//! ```
//!
//! Calls that arrive in the wrong phase are logged and answered with a
//! [`SequenceError`]; they never panic and never change state, so a stray
//! UI callback cannot corrupt a running study.

use core::fmt;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::core::platform::{self, DeviceInfo};
use crate::core::timing::{iso8601, seconds_between, Clock, SystemClock};

use super::{
    ConditionLog, ConditionVariant, EventKind, ExperimentEvent, ExperimentLog, ExperimentPattern,
    ExportedCondition, OrderPattern, ParticipantInfo, SurveyResponse, TaskVariant, SURVEY_ITEMS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    TaskRunning { started_at: OffsetDateTime },
    AwaitingAdvance,
    AllPatternsComplete,
}

impl SessionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::TaskRunning { .. } => "running",
            Self::AwaitingAdvance => "awaiting advance",
            Self::AllPatternsComplete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    /// The call needs a running task.
    NotRunning,
    /// `next_condition` before the current task was completed.
    NotAwaitingAdvance,
    /// Every task-pattern has already been finished.
    AlreadyComplete,
    /// Starting, or changing participant details, needs an idle session.
    InProgress,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NotRunning => "no task is running",
            Self::NotAwaitingAdvance => "the current task has not been completed",
            Self::AlreadyComplete => "all task patterns are complete",
            Self::InProgress => "a session is already in progress",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for SequenceError {}

pub struct ExperimentSession<C: Clock = SystemClock> {
    clock: C,
    probe: fn() -> DeviceInfo,
    participant_id: String,
    participant_info: ParticipantInfo,
    device_info: DeviceInfo,
    order_pattern: OrderPattern,
    patterns: [ExperimentPattern; 4],
    current_index: usize,
    phase: SessionPhase,
    session_id: Option<Uuid>,
    experiment_start: Option<OffsetDateTime>,
    experiment_end: Option<OffsetDateTime>,
    condition_logs: Vec<ConditionLog>,
    current_events: Vec<ExperimentEvent>,
    survey: Option<SurveyResponse>,
}

impl<C: Clock + Clone> Clone for ExperimentSession<C> {
    fn clone(&self) -> Self {
        Self {
            clock: self.clock.clone(),
            probe: self.probe,
            participant_id: self.participant_id.clone(),
            participant_info: self.participant_info.clone(),
            device_info: self.device_info.clone(),
            order_pattern: self.order_pattern,
            patterns: self.patterns,
            current_index: self.current_index,
            phase: self.phase,
            session_id: self.session_id,
            experiment_start: self.experiment_start,
            experiment_end: self.experiment_end,
            condition_logs: self.condition_logs.clone(),
            current_events: self.current_events.clone(),
            survey: self.survey.clone(),
        }
    }
}

impl<C: Clock> fmt::Debug for ExperimentSession<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExperimentSession")
            .field("participant_id", &self.participant_id)
            .field("order_pattern", &self.order_pattern)
            .field("phase", &self.phase)
            .field("current_index", &self.current_index)
            .field("completed", &self.condition_logs.len())
            .field("buffered_events", &self.current_events.len())
            .finish()
    }
}

impl ExperimentSession<SystemClock> {
    pub fn new(order_pattern: OrderPattern) -> Self {
        Self::with_clock(order_pattern, SystemClock)
    }
}

impl<C: Clock> ExperimentSession<C> {
    pub fn with_clock(order_pattern: OrderPattern, clock: C) -> Self {
        Self {
            clock,
            probe: platform::collect_device_info,
            participant_id: String::new(),
            participant_info: ParticipantInfo::default(),
            device_info: DeviceInfo::default(),
            order_pattern,
            patterns: order_pattern.patterns(),
            current_index: 0,
            phase: SessionPhase::Idle,
            session_id: None,
            experiment_start: None,
            experiment_end: None,
            condition_logs: Vec::new(),
            current_events: Vec::new(),
            survey: None,
        }
    }

    /// Replace the device prober. Used by tests and embedders that read the
    /// environment some other way.
    pub fn with_device_probe(mut self, probe: fn() -> DeviceInfo) -> Self {
        self.probe = probe;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, SessionPhase::TaskRunning { .. })
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::AllPatternsComplete
    }

    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    pub fn participant_info(&self) -> &ParticipantInfo {
        &self.participant_info
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    pub fn order_pattern(&self) -> OrderPattern {
        self.order_pattern
    }

    pub fn first_ui(&self) -> ConditionVariant {
        self.order_pattern.first_ui()
    }

    pub fn patterns(&self) -> &[ExperimentPattern; 4] {
        &self.patterns
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_pattern(&self) -> ExperimentPattern {
        self.patterns[self.current_index]
    }

    pub fn current_condition(&self) -> ConditionVariant {
        self.current_pattern().condition
    }

    pub fn current_task(&self) -> TaskVariant {
        self.current_pattern().task
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn condition_logs(&self) -> &[ConditionLog] {
        &self.condition_logs
    }

    pub fn current_events(&self) -> &[ExperimentEvent] {
        &self.current_events
    }

    pub fn survey(&self) -> Option<&SurveyResponse> {
        self.survey.as_ref()
    }

    pub fn experiment_start_time(&self) -> Option<OffsetDateTime> {
        self.experiment_start
    }

    pub fn experiment_end_time(&self) -> Option<OffsetDateTime> {
        self.experiment_end
    }

    /// Seconds since the running task started.
    pub fn task_elapsed_sec(&self) -> Option<f64> {
        match self.phase {
            SessionPhase::TaskRunning { started_at } => {
                Some(seconds_between(started_at, self.clock.now()).max(0.0))
            }
            _ => None,
        }
    }

    pub fn total_duration_sec(&self) -> Option<f64> {
        Some(seconds_between(self.experiment_start?, self.experiment_end?))
    }

    pub fn set_participant_id(&mut self, id: impl Into<String>) -> Result<(), SequenceError> {
        self.ensure_idle("set_participant_id")?;
        self.participant_id = id.into().trim().to_string();
        Ok(())
    }

    pub fn set_participant_info(&mut self, info: ParticipantInfo) -> Result<(), SequenceError> {
        self.ensure_idle("set_participant_info")?;
        self.participant_info = info;
        Ok(())
    }

    /// Begin the first task-pattern of `order_pattern`. Only valid while
    /// `Idle`; a session in progress must be discarded with
    /// [`reset_experiment`](Self::reset_experiment) first.
    pub fn start_full_experiment(
        &mut self,
        order_pattern: OrderPattern,
        info: ParticipantInfo,
    ) -> Result<(), SequenceError> {
        self.ensure_idle("start_full_experiment")?;

        let now = self.clock.now();
        self.order_pattern = order_pattern;
        self.patterns = order_pattern.patterns();
        self.participant_info = info;
        self.device_info = (self.probe)();
        self.current_index = 0;
        self.session_id = Some(Uuid::new_v4());
        self.experiment_start = Some(now);
        self.experiment_end = None;
        self.condition_logs.clear();
        self.current_events.clear();
        self.survey = None;
        self.phase = SessionPhase::TaskRunning { started_at: now };

        log::info!(
            "Experiment started for {} with order pattern {} ({})",
            self.display_id(),
            order_pattern.number(),
            self.current_pattern()
        );
        Ok(())
    }

    /// Append an event to the running task. Dropped with a warning otherwise.
    pub fn record_event(
        &mut self,
        kind: EventKind,
        value: impl Into<String>,
        target: Option<String>,
    ) -> Result<(), SequenceError> {
        let SessionPhase::TaskRunning { started_at } = self.phase else {
            log::warn!("Dropping {kind} event: session is {}", self.phase.label());
            return Err(SequenceError::NotRunning);
        };

        let now = self.clock.now();
        let floor = self.current_events.last().map_or(0.0, |e| e.time);
        let event = ExperimentEvent {
            kind,
            value: value.into(),
            target,
            time: seconds_between(started_at, now).max(floor),
            timestamp: iso8601(now),
        };
        log::debug!("{} @ {:.3}s: {}", event.kind, event.time, event.value);
        self.current_events.push(event);
        Ok(())
    }

    /// Finalise the running task into a [`ConditionLog`].
    pub fn complete_current_condition(
        &mut self,
        canvas_image: Option<String>,
    ) -> Result<(), SequenceError> {
        let SessionPhase::TaskRunning { started_at } = self.phase else {
            log::warn!(
                "complete_current_condition ignored: session is {}",
                self.phase.label()
            );
            return Err(SequenceError::NotRunning);
        };

        let ended_at = self.clock.now();
        let pattern = self.current_pattern();
        let log = ConditionLog {
            condition: pattern.condition,
            task: pattern.task,
            pattern,
            start_time: iso8601(started_at),
            end_time: Some(iso8601(ended_at)),
            task_duration_sec: Some(seconds_between(started_at, ended_at)),
            events: self.current_events.clone(),
            canvas_image,
        };
        log::info!(
            "Completed {pattern} in {:.1}s with {} event(s)",
            seconds_between(started_at, ended_at),
            log.events.len()
        );
        self.condition_logs.push(log);
        self.phase = SessionPhase::AwaitingAdvance;
        Ok(())
    }

    /// Move to the next task-pattern, or finish after the last one.
    pub fn next_condition(&mut self) -> Result<(), SequenceError> {
        match self.phase {
            SessionPhase::AwaitingAdvance => {}
            SessionPhase::AllPatternsComplete => {
                log::warn!("next_condition ignored: all task patterns are complete");
                return Err(SequenceError::AlreadyComplete);
            }
            other => {
                log::warn!("next_condition ignored: session is {}", other.label());
                return Err(SequenceError::NotAwaitingAdvance);
            }
        }

        let now = self.clock.now();
        if self.current_index + 1 < self.patterns.len() {
            self.current_index += 1;
            self.current_events.clear();
            self.phase = SessionPhase::TaskRunning { started_at: now };
            log::info!(
                "Advanced to {} ({}/{})",
                self.current_pattern(),
                self.current_index + 1,
                self.patterns.len()
            );
        } else {
            self.experiment_end = Some(now);
            self.phase = SessionPhase::AllPatternsComplete;
            log::info!(
                "All task patterns complete for {} after {:.1}s",
                self.display_id(),
                self.total_duration_sec().unwrap_or_default()
            );
        }
        Ok(())
    }

    /// Throw away the running task's events and start its clock again.
    pub fn restart_current_condition(&mut self) -> Result<(), SequenceError> {
        if !self.is_running() {
            log::warn!(
                "restart_current_condition ignored: session is {}",
                self.phase.label()
            );
            return Err(SequenceError::NotRunning);
        }
        let dropped = self.current_events.len();
        self.current_events.clear();
        self.device_info = (self.probe)();
        self.phase = SessionPhase::TaskRunning {
            started_at: self.clock.now(),
        };
        log::info!("Restarted {} ({dropped} event(s) dropped)", self.current_pattern());
        Ok(())
    }

    /// Back to `Idle`. Keeps the participant and order pattern; drops every
    /// log, event, survey answer and timestamp.
    pub fn reset_experiment(&mut self) {
        self.patterns = self.order_pattern.patterns();
        self.current_index = 0;
        self.phase = SessionPhase::Idle;
        self.session_id = None;
        self.experiment_start = None;
        self.experiment_end = None;
        self.condition_logs.clear();
        self.current_events.clear();
        self.survey = None;
        log::info!("Experiment reset");
    }

    /// Store the questionnaire. Validation happens in the form.
    pub fn set_survey_response(&mut self, survey: SurveyResponse) {
        if !self.is_complete() {
            log::debug!("Survey stored before the final task ({})", self.phase.label());
        }
        self.survey = Some(survey);
    }

    /// Export projection of the whole session. Pure.
    pub fn experiment_log(&self) -> ExperimentLog {
        ExperimentLog {
            participant_id: self.participant_id.clone(),
            session_id: self.session_id.map(|id| id.to_string()),
            participant_info: self.participant_info.clone(),
            device: self.device_info.clone(),
            first_ui: self.first_ui(),
            order_pattern: self.order_pattern,
            experiment_start_time: self.experiment_start.map(iso8601),
            experiment_end_time: self.experiment_end.map(iso8601),
            total_duration_sec: self.total_duration_sec(),
            conditions: self.condition_logs.iter().map(ExportedCondition::from).collect(),
            survey: self.survey.clone(),
            survey_items: match self.survey {
                Some(_) => SURVEY_ITEMS.iter().map(|item| item.to_string()).collect(),
                None => Vec::new(),
            },
        }
    }

    fn ensure_idle(&self, operation: &str) -> Result<(), SequenceError> {
        if self.phase == SessionPhase::Idle {
            Ok(())
        } else {
            log::warn!("{operation} ignored: session is {}", self.phase.label());
            Err(SequenceError::InProgress)
        }
    }

    fn display_id(&self) -> &str {
        if self.participant_id.is_empty() {
            "anonymous"
        } else {
            &self.participant_id
        }
    }
}
