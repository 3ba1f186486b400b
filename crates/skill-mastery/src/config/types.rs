//! Data structures for admin-owned configuration documents.

use serde::{Deserialize, Serialize};

use crate::attempt::SkillId;
use crate::error::{MasteryError, Result};

// ---------------------------------------------------------------------------
// Mastery requirement
// ---------------------------------------------------------------------------

/// What a learner must do to master a skill.
///
/// Serialized with a `"type"` tag: `{"type": "QUESTIONS", "value": 10}` or
/// `{"type": "SCORE", "value": 500}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MasteryRequirement {
    /// Answer `value` distinct questions correctly, or `value` percent of
    /// the skill's question bank when `is_percentage` is set.
    #[serde(rename_all = "camelCase")]
    Questions {
        value: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_accuracy: Option<f64>,
        #[serde(default)]
        is_percentage: bool,
    },
    /// Accumulate `value` XP (legacy). `min_accuracy` is accepted for
    /// document compatibility but has no effect in this mode.
    #[serde(rename_all = "camelCase")]
    Score {
        value: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_accuracy: Option<f64>,
    },
}

impl MasteryRequirement {
    /// Count-of-questions requirement without an accuracy gate.
    pub fn questions(value: u32) -> Self {
        Self::Questions {
            value,
            min_accuracy: None,
            is_percentage: false,
        }
    }

    /// Cumulative XP requirement.
    pub fn score(value: i64) -> Self {
        Self::Score {
            value,
            min_accuracy: None,
        }
    }

    /// Add an accuracy gate (percent, 0-100).
    pub fn with_min_accuracy(mut self, accuracy: f64) -> Self {
        match &mut self {
            Self::Questions { min_accuracy, .. } | Self::Score { min_accuracy, .. } => {
                *min_accuracy = Some(accuracy);
            }
        }
        self
    }

    /// Interpret a QUESTIONS `value` as a percentage of the question bank.
    pub fn as_percentage(mut self) -> Self {
        if let Self::Questions { is_percentage, .. } = &mut self {
            *is_percentage = true;
        }
        self
    }

    /// Short strategy name as it appears on the wire.
    pub fn strategy_name(&self) -> &'static str {
        match self {
            Self::Questions { .. } => "QUESTIONS",
            Self::Score { .. } => "SCORE",
        }
    }

    /// Check an admin-authored requirement before it is saved.
    pub fn validate(&self) -> Result<()> {
        let min_accuracy = match self {
            Self::Questions {
                value,
                min_accuracy,
                is_percentage,
            } => {
                if *is_percentage && *value > 100 {
                    return Err(MasteryError::InvalidRequirement(format!(
                        "percentage target must be 0-100, got {value}"
                    )));
                }
                min_accuracy
            }
            Self::Score { min_accuracy, .. } => min_accuracy,
        };

        if let Some(acc) = min_accuracy {
            if !acc.is_finite() || *acc < 0.0 || *acc > 100.0 {
                return Err(MasteryError::InvalidRequirement(format!(
                    "minAccuracy must be 0-100, got {acc}"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rank tier
// ---------------------------------------------------------------------------

/// A named milestone on the XP ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankTier {
    pub name: String,
    /// XP-equivalent needed to reach this tier.
    pub threshold: u64,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
}

impl RankTier {
    pub fn new(name: impl Into<String>, threshold: u64) -> Self {
        Self {
            name: name.into(),
            threshold,
            icon: String::new(),
            color: String::new(),
            description: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// System config
// ---------------------------------------------------------------------------

/// System-wide settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    pub default_mastery_requirements: MasteryRequirement,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            default_mastery_requirements: super::defaults::default_requirement(),
        }
    }
}

// ---------------------------------------------------------------------------
// Skill
// ---------------------------------------------------------------------------

/// A skill definition. Requirement overrides travel with the skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    /// Grade the skill belongs to; `None` means every grade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastery_requirements: Option<MasteryRequirement>,
    /// Number of questions in the skill's bank, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_bank_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u32>,
}

impl Skill {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: SkillId::new(id),
            name: name.into(),
            grade: None,
            mastery_requirements: None,
            question_bank_size: None,
            difficulty: None,
        }
    }

    pub fn with_requirement(mut self, requirement: MasteryRequirement) -> Self {
        self.mastery_requirements = Some(requirement);
        self
    }

    pub fn with_question_bank(mut self, size: u32) -> Self {
        self.question_bank_size = Some(size);
        self
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Whether the skill is taught in `grade`.
    pub fn in_grade(&self, grade: &str) -> bool {
        self.grade.as_deref().map_or(true, |g| g == grade)
    }
}
