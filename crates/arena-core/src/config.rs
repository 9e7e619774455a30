//! Arena configuration.

use serde::{Deserialize, Serialize};

use crate::equipment::Weapon;

/// Tunables for an [`Arena`](crate::arena::Arena).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Seed for the battle's random source. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Stamina every living unit regains at the end of a round, scaled by its
    /// class stamina multiplier. Zero disables regeneration.
    pub stamina_per_round: f64,
    /// Weapon used by units with an empty weapon slot.
    pub unarmed: Weapon,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: None,
            stamina_per_round: 1.0,
            unarmed: default_unarmed(),
        }
    }
}

impl ArenaConfig {
    /// Default config with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Returns `true` if units recover stamina between rounds.
    #[must_use]
    pub fn regenerates(&self) -> bool {
        self.stamina_per_round > 0.0
    }
}

/// Bare fists: weak, but always cheap.
#[must_use]
pub fn default_unarmed() -> Weapon {
    Weapon {
        id: 0,
        name: "fists".into(),
        min_damage: 1.0,
        max_damage: 2.0,
        stamina_per_hit: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_regenerate_one_stamina() {
        let config = ArenaConfig::default();
        assert!(config.seed.is_none());
        assert!(config.regenerates());
        assert_eq!(config.unarmed.name, "fists");
    }

    #[test]
    fn partial_document_fills_defaults() {
        let config: ArenaConfig =
            serde_json::from_str(r#"{ "seed": 9, "stamina_per_round": 0.0 }"#).unwrap();
        assert_eq!(config.seed, Some(9));
        assert!(!config.regenerates());
        assert_eq!(config.unarmed, default_unarmed());
    }
}
