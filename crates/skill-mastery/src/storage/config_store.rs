//! Configuration persistence — system config, rank ladder, skills, rules.
//!
//! Each document is one versioned JSON file in the base directory. Writes
//! replace the whole document (last write wins). A missing document loads
//! as its built-in default.

use std::path::PathBuf;

use crate::config::{RankLadder, Skill, SystemConfig};
use crate::error::{MasteryError, Result};
use crate::reward::{RewardRule, RuleId};

use super::document::{read_document, write_document};

const SYSTEM_CONFIG_FILE: &str = "system_config.json";
const RANK_LADDER_FILE: &str = "rank_ladder.json";
const SKILLS_FILE: &str = "skills.json";
const REWARD_RULES_FILE: &str = "reward_rules.json";

/// Filesystem-backed store for admin-owned configuration documents.
pub struct ConfigStore {
    base_dir: PathBuf,
}

impl ConfigStore {
    /// Create a new `ConfigStore` rooted at `base_dir`, creating the
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `MasteryError::Io` if the directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn path(&self, file: &str) -> PathBuf {
        self.base_dir.join(file)
    }

    // ── System config ─────────────────────────────────────────────────────────

    /// Load the system config; missing means defaults.
    ///
    /// # Errors
    ///
    /// Returns `MasteryError::InvalidFileFormat` for a malformed document.
    pub fn load_system_config(&self) -> Result<SystemConfig> {
        Ok(read_document(&self.path(SYSTEM_CONFIG_FILE))?.unwrap_or_default())
    }

    /// Load the system config, falling back to defaults on any error.
    pub fn system_config_or_default(&self) -> SystemConfig {
        self.load_system_config().unwrap_or_else(|e| {
            log::warn!("{e}; using default system config");
            SystemConfig::default()
        })
    }

    /// Validate and save the system config.
    pub fn save_system_config(&self, config: &SystemConfig) -> Result<()> {
        config.default_mastery_requirements.validate()?;
        write_document(&self.path(SYSTEM_CONFIG_FILE), config)
    }

    // ── Rank ladder ───────────────────────────────────────────────────────────

    /// Load the rank ladder; missing means the default ladder.
    ///
    /// # Errors
    ///
    /// Returns `MasteryError::InvalidFileFormat` for a malformed or empty
    /// ladder document.
    pub fn load_ladder(&self) -> Result<RankLadder> {
        Ok(read_document(&self.path(RANK_LADDER_FILE))?.unwrap_or_default())
    }

    /// Load the rank ladder, falling back to the default on any error.
    pub fn ladder_or_default(&self) -> RankLadder {
        self.load_ladder().unwrap_or_else(|e| {
            log::warn!("{e}; using default rank ladder");
            RankLadder::default()
        })
    }

    pub fn save_ladder(&self, ladder: &RankLadder) -> Result<()> {
        write_document(&self.path(RANK_LADDER_FILE), ladder)
    }

    // ── Skills ────────────────────────────────────────────────────────────────

    /// Load the skill catalog; missing means no skills.
    pub fn load_skills(&self) -> Result<Vec<Skill>> {
        Ok(read_document(&self.path(SKILLS_FILE))?.unwrap_or_default())
    }

    /// Load the skill catalog, falling back to an empty catalog on error.
    pub fn skills_or_default(&self) -> Vec<Skill> {
        self.load_skills().unwrap_or_else(|e| {
            log::warn!("{e}; using empty skill catalog");
            Vec::new()
        })
    }

    /// Validate every override and save the catalog.
    pub fn save_skills(&self, skills: &[Skill]) -> Result<()> {
        for skill in skills {
            if let Some(req) = &skill.mastery_requirements {
                req.validate().map_err(|e| {
                    MasteryError::InvalidRequirement(format!("skill {}: {e}", skill.id))
                })?;
            }
        }
        write_document(&self.path(SKILLS_FILE), &skills)
    }

    /// Insert or replace one skill by id.
    pub fn upsert_skill(&self, skill: Skill) -> Result<()> {
        let mut skills = self.load_skills()?;
        match skills.iter_mut().find(|s| s.id == skill.id) {
            Some(existing) => *existing = skill,
            None => skills.push(skill),
        }
        self.save_skills(&skills)
    }

    // ── Reward rules ──────────────────────────────────────────────────────────

    pub fn list_rules(&self) -> Result<Vec<RewardRule>> {
        Ok(read_document(&self.path(REWARD_RULES_FILE))?.unwrap_or_default())
    }

    /// Load the rule list, falling back to no rules on error.
    pub fn rules_or_default(&self) -> Vec<RewardRule> {
        self.list_rules().unwrap_or_else(|e| {
            log::warn!("{e}; evaluating without reward rules");
            Vec::new()
        })
    }

    /// # Errors
    ///
    /// Returns `MasteryError::NotFound` if no rule has this id.
    pub fn get_rule(&self, id: &RuleId) -> Result<RewardRule> {
        self.list_rules()?
            .into_iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| MasteryError::NotFound(format!("reward rule not found: {id}")))
    }

    /// Normalize, validate and insert or replace a rule by id. Returns the
    /// rule as stored.
    pub fn upsert_rule(&self, rule: RewardRule) -> Result<RewardRule> {
        let rule = rule.normalized();
        rule.validate()?;

        let mut rules = self.list_rules()?;
        match rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule.clone(),
            None => rules.push(rule.clone()),
        }
        write_document(&self.path(REWARD_RULES_FILE), &rules)?;
        Ok(rule)
    }

    /// Delete a rule by id. Returns whether it existed.
    pub fn delete_rule(&self, id: &RuleId) -> Result<bool> {
        let mut rules = self.list_rules()?;
        let before = rules.len();
        rules.retain(|r| &r.id != id);
        if rules.len() == before {
            return Ok(false);
        }
        write_document(&self.path(REWARD_RULES_FILE), &rules)?;
        Ok(true)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
