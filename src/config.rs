//! Battle configuration
//!
//! One versioned table of difficulty tiers, level plans and tuning knobs,
//! loaded once at startup and validated before any encounter runs.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::battle::problem::largest_answer;
use crate::battle::{Operation, OperationChoice};
use crate::foes::FoeKind;

/// Config schema version this build understands
pub const CONFIG_VERSION: u32 = 1;

/// Problems with a configuration table, caught at load time
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unsupported config version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("no difficulty tiers configured")]
    NoTiers,
    #[error("tier {tier}: min operand {min} is above max operand {max}")]
    InvertedRange { tier: u32, min: u32, max: u32 },
    #[error("tier {tier}: no operations allowed")]
    NoOperations { tier: u32 },
    #[error("tier {tier}: time limit must be at least one second")]
    NoTimeLimit { tier: u32 },
    #[error("elite multiplier {0} must be at least 1.0")]
    EliteMultiplier(f32),
    #[error("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("no levels configured")]
    NoLevels,
    #[error("level {level} has no foes")]
    EmptyLevel { level: u32 },
    #[error("levels must be numbered 1, 2, 3... (expected {expected}, found {found})")]
    LevelSequence { expected: u32, found: u32 },
    #[error("tier {tier}: {operation} answers overflow with operands up to {hi}")]
    AnswerOverflow { tier: u32, operation: &'static str, hi: u32 },
}

/// A difficulty tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Smallest operand (inclusive)
    pub min_operand: u32,
    /// Largest operand (inclusive)
    pub max_operand: u32,
    pub allowed_operations: Vec<OperationChoice>,
    pub time_limit_seconds: u32,
    /// Base bonus for a correct answer, scaled by streak
    pub bonus_points: u32,
}

impl DifficultyProfile {
    /// Inclusive operand range, widened for elite encounters.
    ///
    /// The span `max - min + 1` is scaled by `multiplier` and rounded, so a
    /// multiplier of 1.0 returns `[min, max]` unchanged. The upper bound is
    /// clamped to `u32::MAX`.
    pub fn operand_range(&self, multiplier: f32) -> (u32, u32) {
        let span = u64::from(self.max_operand.saturating_sub(self.min_operand)) + 1;
        let scaled = (span as f64 * f64::from(multiplier.max(1.0))).round() as u64;
        let hi = u64::from(self.min_operand).saturating_add(scaled.max(1) - 1);
        (self.min_operand, u32::try_from(hi).unwrap_or(u32::MAX))
    }

    /// Concrete operations this tier can draw
    pub fn operations(&self) -> Vec<Operation> {
        if self.allowed_operations.contains(&OperationChoice::Any) {
            return Operation::ALL.to_vec();
        }
        self.allowed_operations.iter().filter_map(OperationChoice::concrete).collect()
    }
}

/// Used when a hand-built config has no tiers at all
static BUILTIN_PROFILE: LazyLock<DifficultyProfile> = LazyLock::new(|| DifficultyProfile {
    min_operand: 10,
    max_operand: 50,
    allowed_operations: vec![OperationChoice::Add, OperationChoice::Subtract],
    time_limit_seconds: 30,
    bonus_points: 50,
});

/// A group of identical foes in a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoeGroup {
    pub kind: FoeKind,
    pub count: u32,
}

/// Foes that must be beaten to clear a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelPlan {
    pub id: u32,
    pub name: String,
    pub foes: Vec<FoeGroup>,
}

impl LevelPlan {
    /// Foes in encounter order
    pub fn roster(&self) -> Vec<FoeKind> {
        self.foes
            .iter()
            .flat_map(|g| std::iter::repeat_n(g.kind, g.count as usize))
            .collect()
    }
}

/// Complete battle configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleConfig {
    pub version: u32,
    /// Operand span multiplier for boss fights
    pub elite_multiplier: f32,
    /// Chance a question is phrased as a word problem
    pub word_problem_chance: f64,
    /// Chance a victory also restores one health
    pub victory_heal_chance: f64,
    /// Tiers keyed by tier number (level number in the default game)
    pub tiers: BTreeMap<u32, DifficultyProfile>,
    pub levels: Vec<LevelPlan>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        let mut tiers = BTreeMap::new();
        tiers.insert(1, BUILTIN_PROFILE.clone());
        tiers.insert(
            2,
            DifficultyProfile {
                min_operand: 20,
                max_operand: 100,
                allowed_operations: vec![
                    OperationChoice::Add,
                    OperationChoice::Subtract,
                    OperationChoice::Multiply,
                ],
                time_limit_seconds: 25,
                bonus_points: 100,
            },
        );
        tiers.insert(
            3,
            DifficultyProfile {
                min_operand: 30,
                max_operand: 150,
                allowed_operations: vec![OperationChoice::Any],
                time_limit_seconds: 20,
                bonus_points: 150,
            },
        );

        let levels = vec![
            LevelPlan {
                id: 1,
                name: "Enchanted Forest".to_string(),
                foes: vec![
                    FoeGroup { kind: FoeKind::Slime, count: 3 },
                    FoeGroup { kind: FoeKind::Mushroom, count: 2 },
                ],
            },
            LevelPlan {
                id: 2,
                name: "Crystal Caves".to_string(),
                foes: vec![
                    FoeGroup { kind: FoeKind::Bat, count: 4 },
                    FoeGroup { kind: FoeKind::Golem, count: 3 },
                ],
            },
            LevelPlan {
                id: 3,
                name: "Sorcerer's Stronghold".to_string(),
                foes: vec![
                    FoeGroup { kind: FoeKind::Golem, count: 2 },
                    FoeGroup { kind: FoeKind::Dragon, count: 1 },
                ],
            },
        ];

        Self {
            version: CONFIG_VERSION,
            elite_multiplier: 1.5,
            word_problem_chance: 0.3,
            victory_heal_chance: 0.3,
            tiers,
            levels,
        }
    }
}

impl BattleConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: BattleConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded battle config v{} ({} tiers, {} levels)",
            config.version,
            config.tiers.len(),
            config.levels.len()
        );
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        log::info!("Reading battle config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every invariant the battle core relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                expected: CONFIG_VERSION,
            });
        }
        if self.tiers.is_empty() {
            return Err(ConfigError::NoTiers);
        }
        if self.elite_multiplier.is_nan() || self.elite_multiplier < 1.0 {
            return Err(ConfigError::EliteMultiplier(self.elite_multiplier));
        }
        for (&tier, profile) in &self.tiers {
            if profile.min_operand > profile.max_operand {
                return Err(ConfigError::InvertedRange {
                    tier,
                    min: profile.min_operand,
                    max: profile.max_operand,
                });
            }
            if profile.allowed_operations.is_empty() {
                return Err(ConfigError::NoOperations { tier });
            }
            if profile.time_limit_seconds == 0 {
                return Err(ConfigError::NoTimeLimit { tier });
            }
            // Boss fights draw from the widest range
            let (_, hi) = profile.operand_range(self.elite_multiplier);
            for op in profile.operations() {
                if largest_answer(op, hi) > u64::from(u32::MAX) {
                    return Err(ConfigError::AnswerOverflow {
                        tier,
                        operation: op.as_str(),
                        hi,
                    });
                }
            }
        }
        for (name, value) in [
            ("word_problem_chance", self.word_problem_chance),
            ("victory_heal_chance", self.victory_heal_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        for (expected, level) in (1..).zip(&self.levels) {
            if level.id != expected {
                return Err(ConfigError::LevelSequence {
                    expected,
                    found: level.id,
                });
            }
            if level.roster().is_empty() {
                return Err(ConfigError::EmptyLevel { level: level.id });
            }
        }
        Ok(())
    }

    /// Profile for a tier; unknown tiers fall back to the lowest configured one
    pub fn profile(&self, tier: u32) -> &DifficultyProfile {
        if let Some(profile) = self.tiers.get(&tier) {
            return profile;
        }
        match self.tiers.first_key_value() {
            Some((&lowest, profile)) => {
                log::warn!("Unknown difficulty tier {}, using tier {}", tier, lowest);
                profile
            }
            None => {
                log::warn!("No difficulty tiers configured, using built-in tier");
                &*BUILTIN_PROFILE
            }
        }
    }

    /// Level plan by id; past the end of the table the last level repeats.
    ///
    /// Validated configs number their levels from 1 with no gaps.
    pub fn level(&self, id: u32) -> Option<&LevelPlan> {
        self.levels
            .iter()
            .find(|l| l.id == id)
            .or_else(|| self.levels.last())
    }

    /// Whether a level id beyond the last configured level has been reached
    pub fn is_final_level(&self, id: u32) -> bool {
        self.levels.iter().all(|l| l.id <= id)
    }
}
