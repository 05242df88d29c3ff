//! User profile and the raw survey input it is built from.

use serde::{Deserialize, Serialize};

/// Location preference assumed when the profile has none.
pub const DEFAULT_LOCATION_PREFERENCE: &str = "indoor";
/// Budget tier assumed when the profile has none.
pub const DEFAULT_BUDGET_RANGE: &str = "medium";

/// Stated preferences of the user. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
}

/// Raw intake answers as a caller collected them.
///
/// Unknown keys are ignored when deserializing; nothing is validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SurveyAnswers {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub location_preference: Option<String>,
    #[serde(default)]
    pub budget_range: Option<String>,
}

impl UserProfile {
    /// Build a profile from survey answers.
    ///
    /// Blank strings count as unanswered. With no survey at all the result is
    /// the empty profile.
    pub fn from_survey(survey: Option<&SurveyAnswers>) -> Self {
        let Some(survey) = survey else {
            return Self::default();
        };
        Self {
            name: non_blank(survey.name.as_deref()),
            interests: survey
                .interests
                .iter()
                .flatten()
                .filter_map(|i| non_blank(Some(i)))
                .collect(),
            location_preference: non_blank(survey.location_preference.as_deref()),
            budget_range: non_blank(survey.budget_range.as_deref()),
        }
    }

    /// Comma-joined interests (empty string when there are none).
    pub fn interests_joined(&self) -> String {
        self.interests.join(", ")
    }

    pub fn location_preference_or_default(&self) -> &str {
        self.location_preference
            .as_deref()
            .unwrap_or(DEFAULT_LOCATION_PREFERENCE)
    }

    pub fn budget_range_or_default(&self) -> &str {
        self.budget_range.as_deref().unwrap_or(DEFAULT_BUDGET_RANGE)
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
