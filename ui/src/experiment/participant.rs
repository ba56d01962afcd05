//! Participant self-report collected before the session starts.

use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantDevice {
    #[serde(rename = "PC")]
    Pc,
    Tablet,
    Smartphone,
    #[default]
    Unset,
}

impl ParticipantDevice {
    pub const CHOICES: [ParticipantDevice; 3] = [Self::Pc, Self::Tablet, Self::Smartphone];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pc => "PC",
            Self::Tablet => "tablet",
            Self::Smartphone => "smartphone",
            Self::Unset => "unset",
        }
    }

    pub fn from_value(raw: &str) -> Self {
        Self::CHOICES
            .into_iter()
            .find(|choice| choice.as_str() == raw)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IllustrationExperience {
    Beginner,
    #[serde(rename = "some")]
    Occasional,
    Hobby,
    Professional,
    #[default]
    Unset,
}

impl IllustrationExperience {
    pub const CHOICES: [IllustrationExperience; 4] = [
        Self::Beginner,
        Self::Occasional,
        Self::Hobby,
        Self::Professional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Occasional => "some",
            Self::Hobby => "hobby",
            Self::Professional => "professional",
            Self::Unset => "unset",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Occasional => "Some experience",
            Self::Hobby => "Hobbyist",
            Self::Professional => "Professional",
            Self::Unset => "—",
        }
    }

    pub fn from_value(raw: &str) -> Self {
        Self::CHOICES
            .into_iter()
            .find(|choice| choice.as_str() == raw)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub device_type: ParticipantDevice,
    pub illustration_experience: IllustrationExperience,
    /// Free text such as "mouse" or "pen tablet".
    pub input_device: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantError {
    MissingId,
    DeviceUnset,
    ExperienceUnset,
    MissingInputDevice,
}

impl fmt::Display for ParticipantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::MissingId => "participant ID is required",
            Self::DeviceUnset => "select the device you are using",
            Self::ExperienceUnset => "select your illustration experience",
            Self::MissingInputDevice => "describe your input device",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ParticipantError {}

impl ParticipantInfo {
    pub fn validate(&self) -> Result<(), ParticipantError> {
        if self.device_type == ParticipantDevice::Unset {
            return Err(ParticipantError::DeviceUnset);
        }
        if self.illustration_experience == IllustrationExperience::Unset {
            return Err(ParticipantError::ExperienceUnset);
        }
        if self.input_device.trim().is_empty() {
            return Err(ParticipantError::MissingInputDevice);
        }
        Ok(())
    }
}

/// Identity plus self-report, as stored for form prefill.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub participant_id: String,
    pub info: ParticipantInfo,
}

impl ParticipantProfile {
    /// Checks run at the form boundary before the session is started.
    pub fn validate(&self) -> Result<(), ParticipantError> {
        if self.participant_id.trim().is_empty() {
            return Err(ParticipantError::MissingId);
        }
        self.info.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ParticipantProfile {
        ParticipantProfile {
            participant_id: "U001".into(),
            info: ParticipantInfo {
                device_type: ParticipantDevice::Tablet,
                illustration_experience: IllustrationExperience::Hobby,
                input_device: "pen".into(),
            },
        }
    }

    #[test]
    fn complete_profile_passes() {
        assert_eq!(complete().validate(), Ok(()));
    }

    #[test]
    fn each_missing_field_is_reported() {
        let mut profile = complete();
        profile.participant_id = "  ".into();
        assert_eq!(profile.validate(), Err(ParticipantError::MissingId));

        let mut profile = complete();
        profile.info.device_type = ParticipantDevice::Unset;
        assert_eq!(profile.validate(), Err(ParticipantError::DeviceUnset));

        let mut profile = complete();
        profile.info.illustration_experience = IllustrationExperience::Unset;
        assert_eq!(profile.validate(), Err(ParticipantError::ExperienceUnset));

        let mut profile = complete();
        profile.info.input_device.clear();
        assert_eq!(profile.validate(), Err(ParticipantError::MissingInputDevice));
    }

    #[test]
    fn wire_values_match_the_form_options() {
        assert_eq!(
            serde_json::to_string(&IllustrationExperience::Occasional).unwrap(),
            "\"some\""
        );
        assert_eq!(serde_json::to_string(&ParticipantDevice::Pc).unwrap(), "\"PC\"");
        assert_eq!(ParticipantDevice::from_value("smartphone"), ParticipantDevice::Smartphone);
        assert_eq!(IllustrationExperience::from_value("bogus"), IllustrationExperience::Unset);
    }
}
