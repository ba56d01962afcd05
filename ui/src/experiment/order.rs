//! Counter-balanced condition orders.
//!
//! Two interfaces (`UI1`, `UI2`) are each used for two illustration tasks
//! (`TaskA`, `TaskB`). An [`OrderPattern`] only decides which interface comes
//! first; within an interface the tasks always run A then B.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    UnknownOrder(u8),
    UnknownPattern(String),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOrder(value) => write!(f, "order pattern {value} is not defined"),
            Self::UnknownPattern(raw) => write!(f, "`{raw}` is not an experiment pattern"),
        }
    }
}

impl std::error::Error for PatternError {}

/// Color-selection interface under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionVariant {
    #[serde(rename = "UI1")]
    Ui1,
    #[serde(rename = "UI2")]
    Ui2,
}

impl ConditionVariant {
    pub const ALL: [ConditionVariant; 2] = [Self::Ui1, Self::Ui2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ui1 => "UI1",
            Self::Ui2 => "UI2",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::Ui1 => Self::Ui2,
            Self::Ui2 => Self::Ui1,
        }
    }
}

/// Illustration subject assigned within an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskVariant {
    #[serde(rename = "TaskA")]
    TaskA,
    #[serde(rename = "TaskB")]
    TaskB,
}

impl TaskVariant {
    pub const ALL: [TaskVariant; 2] = [Self::TaskA, Self::TaskB];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskA => "TaskA",
            Self::TaskB => "TaskB",
        }
    }
}

/// One interface/task pairing, written `UI1-TaskA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ExperimentPattern {
    pub condition: ConditionVariant,
    pub task: TaskVariant,
}

impl ExperimentPattern {
    pub const fn new(condition: ConditionVariant, task: TaskVariant) -> Self {
        Self { condition, task }
    }

    /// Archive-safe identifier, identical to the display form.
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ExperimentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.condition.as_str(), self.task.as_str())
    }
}

impl FromStr for ExperimentPattern {
    type Err = PatternError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_pattern(raw)
    }
}

impl From<ExperimentPattern> for String {
    fn from(pattern: ExperimentPattern) -> Self {
        pattern.to_string()
    }
}

impl TryFrom<String> for ExperimentPattern {
    type Error = PatternError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        parse_pattern(&raw)
    }
}

/// Split `UI1-TaskA` into its interface and task.
pub fn parse_pattern(raw: &str) -> Result<ExperimentPattern, PatternError> {
    let unknown = || PatternError::UnknownPattern(raw.to_string());
    let (condition, task) = raw.split_once('-').ok_or_else(unknown)?;
    let condition = ConditionVariant::ALL
        .into_iter()
        .find(|c| c.as_str() == condition)
        .ok_or_else(unknown)?;
    let task = TaskVariant::ALL
        .into_iter()
        .find(|t| t.as_str() == task)
        .ok_or_else(unknown)?;
    Ok(ExperimentPattern::new(condition, task))
}

/// Which interface a participant meets first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OrderPattern {
    /// UI1 first.
    #[default]
    One,
    /// UI2 first.
    Two,
}

impl OrderPattern {
    pub const ALL: [OrderPattern; 2] = [Self::One, Self::Two];

    pub fn number(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    pub fn first_ui(&self) -> ConditionVariant {
        match self {
            Self::One => ConditionVariant::Ui1,
            Self::Two => ConditionVariant::Ui2,
        }
    }

    pub fn patterns(&self) -> [ExperimentPattern; 4] {
        let first = self.first_ui();
        let second = first.other();
        [
            ExperimentPattern::new(first, TaskVariant::TaskA),
            ExperimentPattern::new(first, TaskVariant::TaskB),
            ExperimentPattern::new(second, TaskVariant::TaskA),
            ExperimentPattern::new(second, TaskVariant::TaskB),
        ]
    }

    /// Resolve the external selector (query parameter / env var). Missing or
    /// invalid values fall back to pattern 1.
    pub fn from_selector(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::default(),
            Some(value) => match value.parse::<u8>().ok().and_then(|n| Self::try_from(n).ok()) {
                Some(pattern) => pattern,
                None => {
                    log::warn!("Unsupported order pattern `{value}`; using pattern 1");
                    Self::default()
                }
            },
        }
    }
}

impl From<OrderPattern> for u8 {
    fn from(pattern: OrderPattern) -> Self {
        pattern.number()
    }
}

impl TryFrom<u8> for OrderPattern {
    type Error = PatternError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(PatternError::UnknownOrder(other)),
        }
    }
}

/// Ordered task patterns for the numeric order selector.
pub fn experiment_order(order_pattern: u8) -> Result<[ExperimentPattern; 4], PatternError> {
    OrderPattern::try_from(order_pattern).map(|pattern| pattern.patterns())
}
