//! Play session state
//!
//! Carries everything that outlives a single encounter: level, score,
//! player vitals, the streak and the foes still standing. All randomness is
//! derived from the session seed, so a session replays identically.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::battle::{Encounter, GenerationTuning, Outcome, Problem, generate};
use crate::config::BattleConfig;
use crate::consts::*;
use crate::foes::Foe;

/// Mixed into the encounter seed for the post-victory heal roll
const HEAL_ROLL_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Where the session is between and during battles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Wearing the next foe down with spells
    Exploring,
    /// The next foe is out of health; a battle can start
    FoeStunned,
    /// A question is on screen
    Battling,
    /// Every foe in the level is beaten
    LevelCleared,
    /// Final level cleared
    Completed,
    /// Player ran out of health
    GameOver,
}

/// Player health and mana
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            mana: PLAYER_MAX_MANA,
            max_mana: PLAYER_MAX_MANA,
        }
    }
}

impl Vitals {
    /// Restore up to `amount` health; returns how much was restored
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Returns how much mana was actually gained
    pub fn gain_mana(&mut self, amount: u32) -> u32 {
        let before = self.mana;
        self.mana = self.mana.saturating_add(amount).min(self.max_mana);
        self.mana - before
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

/// What one spell did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellCast {
    pub mana_left: u32,
    /// Health the foe has left after the hit
    pub foe_health: u32,
    /// Foe reached zero health and is ready for battle
    pub stunned: bool,
}

/// What applying an outcome changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aftermath {
    pub outcome: Outcome,
    /// Foe points plus streak bonus
    pub points_gained: u32,
    pub mana_gained: u32,
    pub healed: u32,
    pub damage_taken: u32,
    pub foe_defeated: bool,
    pub phase: SessionPhase,
}

/// A play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    pub level: u32,
    pub score: u64,
    /// Consecutive correct answers
    pub streak: u32,
    pub best_streak: u32,
    pub player: Vitals,
    /// Foes left in this level, next opponent first
    pub foes: Vec<Foe>,
    pub phase: SessionPhase,
    pub encounter: Encounter,
    /// Encounters started so far; drives per-encounter seeds
    encounters_started: u64,
    /// Exploring time banked toward the next mana point
    #[serde(default)]
    mana_charge: f32,
}

impl Session {
    /// Fresh session at level 1
    pub fn new(config: &BattleConfig, seed: u64) -> Self {
        let mut session = Self {
            seed,
            level: 1,
            score: 0,
            streak: 0,
            best_streak: 0,
            player: Vitals::default(),
            foes: Vec::new(),
            phase: SessionPhase::Exploring,
            encounter: Encounter::new(),
            encounters_started: 0,
            mana_charge: 0.0,
        };
        session.load_level(config);
        session
    }

    fn load_level(&mut self, config: &BattleConfig) {
        self.foes = config
            .level(self.level)
            .map(|plan| plan.roster().into_iter().map(Foe::new).collect())
            .unwrap_or_default();
        log::info!("Level {} loaded with {} foes", self.level, self.foes.len());
    }

    /// Deterministic RNG for the current encounter
    fn encounter_rng(&self, salt: u64) -> Pcg32 {
        let encounter_seed = self
            .encounters_started
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed);
        Pcg32::seed_from_u64(encounter_seed ^ salt)
    }

    /// Next opponent, if any remain
    pub fn current_foe(&self) -> Option<&Foe> {
        self.foes.first()
    }

    /// Fire a spell at the next foe.
    ///
    /// Costs one mana and one point of foe health. Returns None when there is
    /// no mana, no foe, or the session is not exploring.
    pub fn cast_spell(&mut self) -> Option<SpellCast> {
        if self.phase != SessionPhase::Exploring || self.player.mana < SPELL_MANA_COST {
            return None;
        }
        let foe = self.foes.first_mut()?;
        self.player.mana -= SPELL_MANA_COST;
        let stunned = foe.take_hit(SPELL_DAMAGE);
        log::debug!(
            "Spell hits {} ({} health left, {} mana left)",
            foe.kind.name(),
            foe.health,
            self.player.mana
        );

        let cast = SpellCast {
            mana_left: self.player.mana,
            foe_health: foe.health,
            stunned,
        };
        if stunned {
            self.phase = SessionPhase::FoeStunned;
        }
        Some(cast)
    }

    /// Regain mana while exploring, one point per `MANA_REGEN_SECONDS`.
    ///
    /// Returns the mana gained. Time spent at full mana is not banked.
    pub fn channel(&mut self, dt: f32) -> u32 {
        if self.phase != SessionPhase::Exploring || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        if self.player.mana >= self.player.max_mana {
            self.mana_charge = 0.0;
            return 0;
        }
        self.mana_charge += dt;
        let points = (self.mana_charge / MANA_REGEN_SECONDS).floor();
        self.mana_charge -= points * MANA_REGEN_SECONDS;
        let gained = self.player.gain_mana(points as u32);
        if self.player.mana >= self.player.max_mana {
            self.mana_charge = 0.0;
        }
        gained
    }

    /// Start a battle against the stunned foe.
    ///
    /// Returns the problem to show, or None when no battle can start.
    pub fn begin_battle(&mut self, config: &BattleConfig) -> Option<&Problem> {
        if self.phase != SessionPhase::FoeStunned {
            return None;
        }
        let foe = self.foes.first()?.kind;

        self.encounters_started += 1;
        let profile = config.profile(self.level);
        let tuning = GenerationTuning {
            elite_multiplier: config.elite_multiplier,
            word_problem_chance: config.word_problem_chance,
        };
        let mut rng = self.encounter_rng(0);
        let problem = generate(profile, foe.is_boss(), tuning, &mut rng);

        log::info!("Battle {} vs {}", self.encounters_started, foe.name());
        self.encounter.present(problem, profile.time_limit_seconds, self.streak);
        self.phase = SessionPhase::Battling;
        self.encounter.problem()
    }

    /// Player picked an answer
    pub fn select(&mut self, answer: u32, config: &BattleConfig) -> Option<Aftermath> {
        let outcome = self.encounter.select(answer)?;
        Some(self.apply(outcome, config))
    }

    /// Advance the battle countdown
    pub fn tick(&mut self, dt: f32, config: &BattleConfig) -> Option<Aftermath> {
        let outcome = self.encounter.tick(dt)?;
        Some(self.apply(outcome, config))
    }

    /// Answer measured against wall-clock time by the caller
    pub fn submit_after(&mut self, answer: u32, elapsed: f32, config: &BattleConfig) -> Option<Aftermath> {
        let outcome = self.encounter.submit_after(answer, elapsed)?;
        Some(self.apply(outcome, config))
    }

    fn apply(&mut self, outcome: Outcome, config: &BattleConfig) -> Aftermath {
        self.streak = outcome.streak_after;
        self.best_streak = self.best_streak.max(self.streak);

        let mut aftermath = Aftermath {
            outcome,
            points_gained: 0,
            mana_gained: 0,
            healed: 0,
            damage_taken: 0,
            foe_defeated: false,
            phase: self.phase,
        };

        if outcome.correct {
            let points = self.foes.first().map(|f| f.kind.points()).unwrap_or(0);
            aftermath.points_gained = outcome.total_reward(points);
            self.score += u64::from(aftermath.points_gained);
            aftermath.mana_gained = self.player.gain_mana(VICTORY_MANA);

            let mut rng = self.encounter_rng(HEAL_ROLL_SALT);
            if rng.random_bool(config.victory_heal_chance.clamp(0.0, 1.0)) {
                aftermath.healed = self.player.heal(VICTORY_HEAL);
            }

            if !self.foes.is_empty() {
                self.foes.remove(0);
                aftermath.foe_defeated = true;
            }

            self.phase = if !self.foes.is_empty() {
                SessionPhase::Exploring
            } else if config.is_final_level(self.level) {
                SessionPhase::Completed
            } else {
                SessionPhase::LevelCleared
            };
        } else {
            self.player.take_damage(DEFEAT_DAMAGE);
            aftermath.damage_taken = DEFEAT_DAMAGE;
            if let Some(foe) = self.foes.first_mut() {
                foe.recover();
            }
            self.phase = if self.player.is_dead() {
                SessionPhase::GameOver
            } else {
                SessionPhase::Exploring
            };
        }

        aftermath.phase = self.phase;
        log::info!(
            "Score {} | health {}/{} | mana {}/{} | streak {} | {:?}",
            self.score,
            self.player.health,
            self.player.max_health,
            self.player.mana,
            self.player.max_mana,
            self.streak,
            self.phase
        );
        aftermath
    }

    /// Move to the next level once the current one is cleared
    pub fn advance_level(&mut self, config: &BattleConfig) -> bool {
        if self.phase != SessionPhase::LevelCleared {
            return false;
        }
        self.level += 1;
        self.load_level(config);
        self.encounter.dismiss();
        self.phase = SessionPhase::Exploring;
        true
    }
}
