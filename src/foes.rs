//! Monster roster
//!
//! Static per-kind data the battle layer needs: point value, health and
//! whether the fight counts as an elite (boss) encounter. Movement itself
//! belongs to the host engine; `AiPattern` only names which behaviour a
//! kind uses.

use serde::{Deserialize, Serialize};

/// Movement behaviour, one host-side handler per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiPattern {
    /// Walk back and forth along a platform
    Patrol,
    /// Hold position, turn to face the player
    Guard,
    /// Dive at the player from above
    Swoop,
    /// Rush at the player when in line of sight
    Charge,
    /// Scripted multi-phase fight
    Boss,
}

/// Monster kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoeKind {
    Slime,
    Mushroom,
    Bat,
    Golem,
    Dragon,
}

impl FoeKind {
    pub fn name(&self) -> &'static str {
        match self {
            FoeKind::Slime => "Slime",
            FoeKind::Mushroom => "Mushroom",
            FoeKind::Bat => "Bat",
            FoeKind::Golem => "Golem",
            FoeKind::Dragon => "Dragon",
        }
    }

    /// Points awarded on defeat, before the battle bonus
    pub fn points(&self) -> u32 {
        match self {
            FoeKind::Slime => 10,
            FoeKind::Mushroom => 15,
            FoeKind::Bat => 20,
            FoeKind::Golem => 30,
            FoeKind::Dragon => 100,
        }
    }

    pub fn max_health(&self) -> u32 {
        match self {
            FoeKind::Slime => 2,
            FoeKind::Mushroom => 3,
            FoeKind::Bat => 3,
            FoeKind::Golem => 4,
            FoeKind::Dragon => 10,
        }
    }

    /// Boss fights use the widened operand range
    pub fn is_boss(&self) -> bool {
        matches!(self, FoeKind::Dragon)
    }

    pub fn ai_pattern(&self) -> AiPattern {
        match self {
            FoeKind::Slime => AiPattern::Patrol,
            FoeKind::Mushroom => AiPattern::Guard,
            FoeKind::Bat => AiPattern::Swoop,
            FoeKind::Golem => AiPattern::Charge,
            FoeKind::Dragon => AiPattern::Boss,
        }
    }
}

/// A live monster waiting to be battled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foe {
    pub kind: FoeKind,
    pub health: u32,
}

impl Foe {
    pub fn new(kind: FoeKind) -> Self {
        Self {
            kind,
            health: kind.max_health(),
        }
    }

    /// Recover one health after winning a battle (capped)
    pub fn recover(&mut self) {
        self.health = (self.health + 1).min(self.kind.max_health());
    }

    /// Take spell damage; returns true once the foe is down to zero
    pub fn take_hit(&mut self, damage: u32) -> bool {
        self.health = self.health.saturating_sub(damage);
        self.is_stunned()
    }

    /// Out of health and open to a battle
    pub fn is_stunned(&self) -> bool {
        self.health == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_dragon_is_boss() {
        let bosses: Vec<_> = [
            FoeKind::Slime,
            FoeKind::Mushroom,
            FoeKind::Bat,
            FoeKind::Golem,
            FoeKind::Dragon,
        ]
        .into_iter()
        .filter(FoeKind::is_boss)
        .collect();
        assert_eq!(bosses, vec![FoeKind::Dragon]);
        assert_eq!(FoeKind::Dragon.ai_pattern(), AiPattern::Boss);
    }

    #[test]
    fn test_recover_caps_at_max() {
        let mut foe = Foe::new(FoeKind::Slime);
        foe.health = 1;
        foe.recover();
        assert_eq!(foe.health, 2);
        foe.recover();
        assert_eq!(foe.health, 2);
    }

    #[test]
    fn test_hits_stun_at_zero() {
        let mut foe = Foe::new(FoeKind::Mushroom);
        assert!(!foe.take_hit(1));
        assert!(!foe.take_hit(1));
        assert!(foe.take_hit(1));
        assert!(foe.take_hit(1));
        assert_eq!(foe.health, 0);
        foe.recover();
        assert!(!foe.is_stunned());
    }

    #[test]
    fn test_kind_names_parse() {
        let kind: FoeKind = serde_json::from_str("\"golem\"").unwrap();
        assert_eq!(kind, FoeKind::Golem);
        assert_eq!(kind.ai_pattern(), AiPattern::Charge);
    }
}
