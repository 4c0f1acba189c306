//! Spellduel - math battles for a wizard-vs-monsters platformer
//!
//! Core modules:
//! - `battle`: Deterministic question generation and answer resolution
//! - `config`: Versioned, validated difficulty and level tables
//! - `foes`: Monster roster (points, health, boss flag)
//! - `session`: Score, vitals and streak across encounters
//! - `persistence`: Versioned save envelope
//! - `platform`: Browser bindings

pub mod battle;
pub mod config;
pub mod error;
pub mod foes;
pub mod persistence;
pub mod platform;
pub mod session;

pub use config::{BattleConfig, ConfigError, DifficultyProfile};
pub use error::{Error, Result};
pub use session::{Aftermath, Session, SessionPhase, SpellCast};

/// Game balance constants
pub mod consts {
    /// Player starting and maximum health
    pub const PLAYER_MAX_HEALTH: u32 = 5;
    /// Player starting and maximum mana
    pub const PLAYER_MAX_MANA: u32 = 3;

    /// Mana restored by winning a battle
    pub const VICTORY_MANA: u32 = 1;
    /// Health restored when the post-victory heal roll succeeds
    pub const VICTORY_HEAL: u32 = 1;
    /// Health lost to a wrong answer or timeout
    pub const DEFEAT_DAMAGE: u32 = 1;

    /// Mana spent per spell
    pub const SPELL_MANA_COST: u32 = 1;
    /// Foe health removed per spell
    pub const SPELL_DAMAGE: u32 = 1;
    /// Exploring time needed to regain one mana
    pub const MANA_REGEN_SECONDS: f32 = 3.0;
}
