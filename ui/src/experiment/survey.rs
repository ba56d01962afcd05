//! Post-experiment questionnaire.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::ConditionVariant;

pub const SURVEY_ITEM_COUNT: usize = 7;
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// Statements rated once per interface, in presentation order.
pub const SURVEY_ITEMS: [&str; SURVEY_ITEM_COUNT] = [
    "It was easy to find the color I wanted.",
    "The suggested colors matched my intention.",
    "I could decide on colors quickly.",
    "The interface felt intuitive.",
    "I am satisfied with the colors in my illustration.",
    "I would like to use this interface again.",
    "Using this interface was enjoyable.",
];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurveyResponse {
    /// `0` marks an unanswered item; a stored response never contains one.
    pub ui1_ratings: [u8; SURVEY_ITEM_COUNT],
    pub ui2_ratings: [u8; SURVEY_ITEM_COUNT],
    pub favorite_ui: Option<ConditionVariant>,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    Unrated {
        condition: ConditionVariant,
        item: usize,
    },
    NoFavorite,
    MissingReason,
}

impl fmt::Display for SurveyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrated { condition, item } => {
                write!(f, "question {} for {} is unanswered", item + 1, condition.as_str())
            }
            Self::NoFavorite => f.write_str("choose the interface you preferred"),
            Self::MissingReason => f.write_str("tell us why you preferred it"),
        }
    }
}

impl std::error::Error for SurveyError {}

impl SurveyResponse {
    pub fn ratings_for(&self, condition: ConditionVariant) -> &[u8; SURVEY_ITEM_COUNT] {
        match condition {
            ConditionVariant::Ui1 => &self.ui1_ratings,
            ConditionVariant::Ui2 => &self.ui2_ratings,
        }
    }

    pub fn set_rating(&mut self, condition: ConditionVariant, item: usize, rating: u8) {
        let ratings = match condition {
            ConditionVariant::Ui1 => &mut self.ui1_ratings,
            ConditionVariant::Ui2 => &mut self.ui2_ratings,
        };
        if let Some(slot) = ratings.get_mut(item) {
            *slot = rating;
        }
    }

    pub fn validate(&self) -> Result<(), SurveyError> {
        for condition in ConditionVariant::ALL {
            let ratings = self.ratings_for(condition);
            if let Some(item) = ratings
                .iter()
                .position(|r| !(RATING_MIN..=RATING_MAX).contains(r))
            {
                return Err(SurveyError::Unrated { condition, item });
            }
        }
        if self.favorite_ui.is_none() {
            return Err(SurveyError::NoFavorite);
        }
        if self.reason.trim().is_empty() {
            return Err(SurveyError::MissingReason);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered() -> SurveyResponse {
        SurveyResponse {
            ui1_ratings: [4; SURVEY_ITEM_COUNT],
            ui2_ratings: [3; SURVEY_ITEM_COUNT],
            favorite_ui: Some(ConditionVariant::Ui1),
            reason: "faster".into(),
            suggestions: None,
        }
    }

    #[test]
    fn fully_answered_survey_is_accepted() {
        assert_eq!(answered().validate(), Ok(()));
    }

    #[test]
    fn zero_sentinel_is_rejected() {
        let mut survey = answered();
        survey.set_rating(ConditionVariant::Ui2, 5, 0);
        assert_eq!(
            survey.validate(),
            Err(SurveyError::Unrated {
                condition: ConditionVariant::Ui2,
                item: 5
            })
        );
    }

    #[test]
    fn favorite_and_reason_are_required() {
        let mut survey = answered();
        survey.favorite_ui = None;
        assert_eq!(survey.validate(), Err(SurveyError::NoFavorite));

        let mut survey = answered();
        survey.reason = "   ".into();
        assert_eq!(survey.validate(), Err(SurveyError::MissingReason));
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut survey = answered();
        survey.set_rating(ConditionVariant::Ui1, SURVEY_ITEM_COUNT, 1);
        assert_eq!(survey, answered());
    }
}
