//! Data structures for bonus and penalty rules.

use serde::{Deserialize, Serialize};

use crate::error::{MasteryError, Result};

// ---------------------------------------------------------------------------
// Rule vocabulary
// ---------------------------------------------------------------------------

/// Which context field a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
    Score,
    Streak,
    Difficulty,
    Accuracy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionOperator {
    GreaterThan,
    LessThan,
    Equals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectType {
    Reward,
    Penalty,
}

/// Unique identifier for a reward rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleId(pub String);

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Reward rule
// ---------------------------------------------------------------------------

/// An admin-authored bonus or penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardRule {
    pub id: RuleId,
    pub name: String,
    pub trigger_type: TriggerType,
    pub condition_operator: ConditionOperator,
    pub condition_value: f64,
    pub effect_type: EffectType,
    pub points: u32,
    #[serde(default)]
    pub message: String,
}

impl RewardRule {
    /// Operator actually used at evaluation time. DIFFICULTY rules always
    /// compare with EQUALS.
    pub fn effective_operator(&self) -> ConditionOperator {
        match self.trigger_type {
            TriggerType::Difficulty => ConditionOperator::Equals,
            _ => self.condition_operator,
        }
    }

    /// Signed point effect: positive for rewards, negative for penalties.
    pub fn effect_points(&self) -> i64 {
        match self.effect_type {
            EffectType::Reward => i64::from(self.points),
            EffectType::Penalty => -i64::from(self.points),
        }
    }

    /// Copy of the rule with the stored operator forced to what
    /// evaluation will use.
    pub fn normalized(mut self) -> Self {
        self.condition_operator = self.effective_operator();
        self
    }

    /// Authoring-time checks.
    ///
    /// # Errors
    ///
    /// Returns `MasteryError::InvalidRule` for a blank id or name, a
    /// non-finite condition value, or a DIFFICULTY rule that does not use
    /// EQUALS.
    pub fn validate(&self) -> Result<()> {
        if self.id.0.trim().is_empty() {
            return Err(MasteryError::InvalidRule("rule id is empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(MasteryError::InvalidRule(format!(
                "rule {} has no name",
                self.id
            )));
        }
        if !self.condition_value.is_finite() {
            return Err(MasteryError::InvalidRule(format!(
                "rule {} has a non-finite condition value",
                self.id
            )));
        }
        if self.trigger_type == TriggerType::Difficulty
            && self.condition_operator != ConditionOperator::Equals
        {
            return Err(MasteryError::InvalidRule(format!(
                "rule {}: DIFFICULTY rules must use EQUALS",
                self.id
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Evaluation context and output
// ---------------------------------------------------------------------------

/// Outcome of one attempt, as seen by the rules.
///
/// Fields are independent; a rule whose field is absent never fires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardContext {
    pub score: i64,
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u32>,
    /// Percent, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl RewardContext {
    /// The field a trigger type reads.
    pub fn value_for(&self, trigger: TriggerType) -> Option<f64> {
        match trigger {
            TriggerType::Score => Some(self.score as f64),
            TriggerType::Streak => Some(f64::from(self.streak)),
            TriggerType::Difficulty => self.difficulty.map(f64::from),
            TriggerType::Accuracy => self.accuracy,
        }
    }
}

/// A rule that fired, with its signed effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggeredReward<'a> {
    pub rule: &'a RewardRule,
    pub effect_points: i64,
}
