//! Rank ladder — the sorted list of rank tiers.

use serde::{Deserialize, Serialize};

use crate::error::{MasteryError, Result};

use super::types::RankTier;

/// A non-empty rank ladder sorted ascending by threshold.
///
/// The last tier is the master tier; its threshold is the XP ceiling used
/// when mapping percentage progress onto the ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RankTier>", into = "Vec<RankTier>")]
pub struct RankLadder {
    tiers: Vec<RankTier>,
}

impl RankLadder {
    /// Build a ladder from tiers in any order.
    ///
    /// # Errors
    ///
    /// Returns `MasteryError::InvalidLadder` if `tiers` is empty or a tier
    /// has an empty name.
    pub fn new(mut tiers: Vec<RankTier>) -> Result<Self> {
        if tiers.is_empty() {
            return Err(MasteryError::InvalidLadder(
                "ladder must contain at least one tier".to_string(),
            ));
        }
        if let Some(t) = tiers.iter().find(|t| t.name.trim().is_empty()) {
            return Err(MasteryError::InvalidLadder(format!(
                "tier at threshold {} has no name",
                t.threshold
            )));
        }
        tiers.sort_by_key(|t| t.threshold);
        if tiers[0].threshold != 0 {
            log::debug!(
                "lowest tier '{}' starts at {}; it is still the fallback rank",
                tiers[0].name,
                tiers[0].threshold
            );
        }
        Ok(Self { tiers })
    }

    /// Build a ladder, falling back to the default ladder when `tiers` is
    /// unusable.
    pub fn or_default(tiers: Vec<RankTier>) -> Self {
        Self::new(tiers).unwrap_or_else(|e| {
            log::warn!("{e}; using default rank ladder");
            Self::default()
        })
    }

    pub fn tiers(&self) -> &[RankTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RankTier> {
        self.tiers.get(index)
    }

    pub fn lowest(&self) -> &RankTier {
        &self.tiers[0]
    }

    /// The top ("master") tier.
    pub fn master(&self) -> &RankTier {
        &self.tiers[self.top_index()]
    }

    pub fn top_index(&self) -> usize {
        self.tiers.len() - 1
    }

    /// Index of the highest tier whose threshold is at most `xp`.
    ///
    /// Among tiers sharing that threshold the earliest one wins. Falls back
    /// to the lowest tier when nothing qualifies, including for negative or
    /// NaN input.
    pub fn resolve(&self, xp: f64) -> usize {
        match self.tiers.iter().rposition(|t| t.threshold as f64 <= xp) {
            Some(i) => self.first_at(self.tiers[i].threshold),
            None => 0,
        }
    }

    /// Highest index a learner can hold while the top tier is withheld.
    ///
    /// This is the tier just below every tier sharing the master threshold,
    /// or the lowest tier when nothing sits below them.
    pub fn below_top(&self) -> usize {
        self.first_at(self.master().threshold).saturating_sub(1)
    }

    fn first_at(&self, threshold: u64) -> usize {
        self.tiers
            .iter()
            .position(|t| t.threshold == threshold)
            .unwrap_or(0)
    }
}

impl Default for RankLadder {
    fn default() -> Self {
        Self {
            tiers: super::defaults::default_rank_tiers(),
        }
    }
}

impl TryFrom<Vec<RankTier>> for RankLadder {
    type Error = MasteryError;

    fn try_from(tiers: Vec<RankTier>) -> Result<Self> {
        Self::new(tiers)
    }
}

impl From<RankLadder> for Vec<RankTier> {
    fn from(ladder: RankLadder) -> Self {
        ladder.tiers
    }
}
