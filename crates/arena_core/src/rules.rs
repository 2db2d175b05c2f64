//! Battle rules and arena configuration.
//!
//! [`FieldRules`] is created once when a battle starts and is only ever read
//! afterwards. [`ArenaConfig`] bundles the rules with the per-kind item
//! defaults and the placement seed, and is loaded from RON.
//!
//! # Example RON
//!
//! ```ron
//! ArenaConfig(
//!     rules: (width: 800, height: 600, num_rounds: 10, inactivity_time: 450),
//!     pickups: (energy_bonus: 10.0, respawn_time: 100.0),
//!     powerups: (energy_bonus: 30.0, respawn_time: 300.0),
//!     seed: 42,
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, Result};
use crate::item::{ItemKind, ITEM_SIZE};

/// Energy a pickup grants unless overridden.
pub const PICKUP_ENERGY_BONUS: f64 = 10.0;

/// Turns a pickup stays unavailable after being collected.
pub const PICKUP_RESPAWN_TIME: f64 = 100.0;

/// Energy a powerup grants unless overridden.
pub const POWERUP_ENERGY_BONUS: f64 = 30.0;

/// Turns a powerup stays unavailable after being collected.
pub const POWERUP_RESPAWN_TIME: f64 = 300.0;

/// Immutable per-battle parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRules {
    width: u32,
    height: u32,
    #[serde(default = "default_num_rounds")]
    num_rounds: u32,
    #[serde(default = "default_inactivity_time")]
    inactivity_time: u64,
}

const fn default_num_rounds() -> u32 {
    10
}

const fn default_inactivity_time() -> u64 {
    450
}

impl FieldRules {
    /// Rules for a field of the given size with default battle parameters.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            num_rounds: default_num_rounds(),
            inactivity_time: default_inactivity_time(),
        }
    }

    /// Override the number of rounds.
    #[must_use]
    pub const fn with_num_rounds(mut self, num_rounds: u32) -> Self {
        self.num_rounds = num_rounds;
        self
    }

    /// Field width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Field height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of rounds in the battle.
    #[must_use]
    pub const fn num_rounds(&self) -> u32 {
        self.num_rounds
    }

    /// Turns without damage before combatants start losing energy.
    #[must_use]
    pub const fn inactivity_time(&self) -> u64 {
        self.inactivity_time
    }
}

impl Default for FieldRules {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Battle-wide reward parameters for one item kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemDefaults {
    /// Energy granted to the collecting combatant.
    pub energy_bonus: f64,
    /// Turns before a collected item becomes available again. Zero or less
    /// makes the item one-shot.
    pub respawn_time: f64,
}

impl ItemDefaults {
    /// Built-in defaults for a kind.
    #[must_use]
    pub const fn for_kind(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Pickup => Self {
                energy_bonus: PICKUP_ENERGY_BONUS,
                respawn_time: PICKUP_RESPAWN_TIME,
            },
            ItemKind::Powerup => Self {
                energy_bonus: POWERUP_ENERGY_BONUS,
                respawn_time: POWERUP_RESPAWN_TIME,
            },
        }
    }
}

fn default_pickups() -> ItemDefaults {
    ItemDefaults::for_kind(ItemKind::Pickup)
}

fn default_powerups() -> ItemDefaults {
    ItemDefaults::for_kind(ItemKind::Powerup)
}

const fn default_seed() -> u64 {
    12345
}

/// Complete item-subsystem configuration for one battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Field rules.
    pub rules: FieldRules,
    /// Pickup defaults.
    #[serde(default = "default_pickups")]
    pub pickups: ItemDefaults,
    /// Powerup defaults.
    #[serde(default = "default_powerups")]
    pub powerups: ItemDefaults,
    /// Seed for the placement generator.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            rules: FieldRules::default(),
            pickups: default_pickups(),
            powerups: default_powerups(),
            seed: default_seed(),
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a RON config.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::ConfigParse`] for malformed RON and
    /// [`ArenaError::InvalidConfig`] listing every validation problem.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: Self =
            ron::from_str(text).map_err(|e| ArenaError::ConfigParse(e.to_string()))?;
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ArenaError::InvalidConfig(errors));
        }
        Ok(config)
    }

    /// Defaults for the given kind.
    #[must_use]
    pub const fn defaults_for(&self, kind: ItemKind) -> ItemDefaults {
        match kind {
            ItemKind::Pickup => self.pickups,
            ItemKind::Powerup => self.powerups,
        }
    }

    /// Check the config, returning every problem found.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let min_side = ITEM_SIZE as u32;

        if self.rules.width < min_side || self.rules.height < min_side {
            errors.push(format!(
                "field {}x{} is smaller than one item ({min_side}x{min_side})",
                self.rules.width, self.rules.height
            ));
        }
        if self.rules.num_rounds == 0 {
            errors.push("num_rounds must be at least 1".to_string());
        }
        for (name, defaults) in [("pickups", self.pickups), ("powerups", self.powerups)] {
            if !defaults.energy_bonus.is_finite() {
                errors.push(format!("{name}.energy_bonus must be finite"));
            }
            if !defaults.respawn_time.is_finite() || defaults.respawn_time < 0.0 {
                errors.push(format!("{name}.respawn_time must be a finite value >= 0"));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = FieldRules::default();
        assert_eq!(rules.width(), 800);
        assert_eq!(rules.height(), 600);
        assert_eq!(rules.num_rounds(), 10);
    }

    #[test]
    fn test_config_from_ron() {
        let text = r"ArenaConfig(
            rules: (width: 1000, height: 1000, num_rounds: 3),
            powerups: (energy_bonus: 50.0, respawn_time: 0.0),
            seed: 7,
        )";
        let config = ArenaConfig::from_ron_str(text).unwrap();
        assert_eq!(config.rules.width(), 1000);
        assert_eq!(config.rules.num_rounds(), 3);
        assert_eq!(config.rules.inactivity_time(), 450);
        assert_eq!(config.pickups, ItemDefaults::for_kind(ItemKind::Pickup));
        assert_eq!(config.defaults_for(ItemKind::Powerup).energy_bonus, 50.0);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_config_parse_error() {
        let err = ArenaConfig::from_ron_str("ArenaConfig(rules: nope)").unwrap_err();
        assert!(matches!(err, ArenaError::ConfigParse(_)));
    }

    #[test]
    fn test_config_validation_lists_all_problems() {
        let text = r"ArenaConfig(
            rules: (width: 10, height: 600, num_rounds: 0),
            pickups: (energy_bonus: 10.0, respawn_time: -1.0),
        )";
        match ArenaConfig::from_ron_str(text) {
            Err(ArenaError::InvalidConfig(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
