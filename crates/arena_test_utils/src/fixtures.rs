//! Test fixtures and helpers.
//!
//! Ready-made combatants, rosters and fields for consistent testing.

use arena_core::collision::{Combatant, ItemEvent};
use arena_core::field::ItemField;
use arena_core::item::{ItemKind, ItemSetup};
use arena_core::math::{BoundingBox, Point};
use arena_core::rules::{ArenaConfig, FieldRules};

/// Side length of a test combatant's bounding box.
pub const COMBATANT_SIZE: f64 = 36.0;

/// Seed used by [`standard_config`].
pub const TEST_SEED: u64 = 0x5EED;

/// Roster entry that records everything the item subsystem does to it.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCombatant {
    /// Display name.
    pub name: String,
    /// Center of the bounding box.
    pub center: Point,
    /// Whether the combatant can still collect items.
    pub alive: bool,
    /// Current energy.
    pub energy: f64,
    /// Events queued to the combatant.
    pub events: Vec<ItemEvent>,
    /// Lines printed to the combatant's output.
    pub output: Vec<String>,
}

impl TestCombatant {
    /// A live combatant with 100 energy centered at `(x, y)`.
    #[must_use]
    pub fn at(name: &str, x: f64, y: f64) -> Self {
        Self {
            name: name.to_string(),
            center: Point::new(x, y),
            alive: true,
            energy: 100.0,
            events: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Same combatant, dead.
    #[must_use]
    pub fn dead(mut self) -> Self {
        self.alive = false;
        self
    }

    /// Move the combatant so its center is at `center`.
    pub fn move_to(&mut self, center: Point) {
        self.center = center;
    }
}

impl Combatant for TestCombatant {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::centered(self.center, COMBATANT_SIZE, COMBATANT_SIZE)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn add_energy(&mut self, amount: f64) {
        self.energy += amount;
    }

    fn push_event(&mut self, event: ItemEvent) {
        self.events.push(event);
    }

    fn print_line(&mut self, message: String) {
        self.output.push(message);
    }
}

/// Build a roster of live combatants from `(name, x, y)` triples.
#[must_use]
pub fn roster(entries: &[(&str, f64, f64)]) -> Vec<Option<TestCombatant>> {
    entries
        .iter()
        .map(|&(name, x, y)| Some(TestCombatant::at(name, x, y)))
        .collect()
}

/// A roster of `n` combatants parked in the field's top row, away from the
/// center where random placement concentrates items.
#[must_use]
pub fn edge_roster(n: usize) -> Vec<Option<TestCombatant>> {
    (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = 20.0 + 40.0 * i as f64;
            Some(TestCombatant::at(&format!("bot{i}"), x, 20.0))
        })
        .collect()
}

/// The 800x600 field with default battle parameters.
#[must_use]
pub fn rules_800x600() -> FieldRules {
    FieldRules::new(800, 600)
}

/// Default item settings on the 800x600 field with [`TEST_SEED`].
#[must_use]
pub fn standard_config() -> ArenaConfig {
    ArenaConfig {
        rules: rules_800x600(),
        seed: TEST_SEED,
        ..ArenaConfig::default()
    }
}

/// A field with `pickups` randomly placed pickups followed by `powerups`
/// randomly placed powerups.
///
/// A kind stops growing once its ids run out.
#[must_use]
pub fn populated_field(config: ArenaConfig, pickups: usize, powerups: usize) -> ItemField {
    let mut field = ItemField::new(config);
    for (kind, count) in [(ItemKind::Pickup, pickups), (ItemKind::Powerup, powerups)] {
        for _ in 0..count {
            if field.spawn(kind, &ItemSetup::default()).is_err() {
                break;
            }
        }
    }
    field
}
