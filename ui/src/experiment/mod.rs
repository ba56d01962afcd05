//! Experiment instrumentation: order assignment, the session state machine,
//! event recording and the records it produces.

mod event;
mod log;
mod order;
mod participant;
mod recorder;
mod session;
mod survey;

pub use event::{EventKind, ExperimentEvent};
pub use log::{ConditionLog, ExperimentLog, ExportedCondition};
pub use order::{
    experiment_order, parse_pattern, ConditionVariant, ExperimentPattern, OrderPattern,
    PatternError, TaskVariant,
};
pub use participant::{
    IllustrationExperience, ParticipantDevice, ParticipantError, ParticipantInfo,
    ParticipantProfile,
};
pub use recorder::EventRecorder;
pub use session::{ExperimentSession, SequenceError, SessionPhase};
pub use survey::{
    SurveyError, SurveyResponse, RATING_MAX, RATING_MIN, SURVEY_ITEMS, SURVEY_ITEM_COUNT,
};
