//! Item-versus-combatant collision.
//!
//! The roster is owned by the simulator: an ordered slice of slots, each
//! either a combatant or empty. Items only ever remember a slot index, never a
//! handle, so a combatant leaving the roster cannot leave a dangling victim.

use serde::{Deserialize, Serialize};

use crate::math::BoundingBox;

/// Reward notification queued to combatants when a powerup is collected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerupEvent {
    /// Energy granted to the collector.
    pub energy_bonus: f64,
    /// Turns until the powerup is available again.
    pub respawn_time: f64,
    /// Name of the collecting combatant.
    pub victim_name: String,
    /// Id of the collected powerup.
    pub item_id: u32,
}

/// Events the item subsystem queues to combatants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemEvent {
    /// A powerup was collected somewhere on the field.
    Powerup(PowerupEvent),
}

/// What the item subsystem needs from a combatant on the roster.
pub trait Combatant {
    /// Display name used in events and messages.
    fn name(&self) -> &str;

    /// Current bounding box.
    fn bounding_box(&self) -> BoundingBox;

    /// Dead combatants cannot collect items.
    fn is_alive(&self) -> bool;

    /// Apply an energy change.
    fn add_energy(&mut self, amount: f64);

    /// Queue an event for the combatant's next event dispatch.
    fn push_event(&mut self, event: ItemEvent);

    /// Write a line to the combatant's diagnostic output.
    fn print_line(&mut self, message: String);
}

/// Find the first present, alive combatant whose box overlaps `item_box`.
///
/// Slots are scanned in roster order, so when several combatants overlap the
/// item the lowest index wins.
#[must_use]
pub fn find_victim<C: Combatant>(item_box: &BoundingBox, roster: &[Option<C>]) -> Option<usize> {
    roster.iter().position(|slot| {
        slot.as_ref()
            .is_some_and(|c| c.is_alive() && c.bounding_box().intersects(item_box))
    })
}

/// Resolve a remembered victim index against the current roster.
///
/// Indices past the end of the roster or pointing at an empty slot resolve to
/// `None`.
#[must_use]
pub fn resolve_victim<C>(victim: Option<usize>, roster: &[Option<C>]) -> Option<usize> {
    victim.filter(|&index| roster.get(index).is_some_and(Option::is_some))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::math::Point;

    /// Minimal roster entry for unit tests inside this crate.
    #[derive(Debug, Clone)]
    pub(crate) struct Dummy {
        pub name: String,
        pub center: Point,
        pub alive: bool,
        pub energy: f64,
        pub events: Vec<ItemEvent>,
        pub output: Vec<String>,
    }

    impl Dummy {
        pub(crate) fn at(name: &str, x: f64, y: f64) -> Self {
            Self {
                name: name.to_string(),
                center: Point::new(x, y),
                alive: true,
                energy: 100.0,
                events: Vec::new(),
                output: Vec::new(),
            }
        }

        pub(crate) fn dead(mut self) -> Self {
            self.alive = false;
            self
        }
    }

    impl Combatant for Dummy {
        fn name(&self) -> &str {
            &self.name
        }

        fn bounding_box(&self) -> BoundingBox {
            BoundingBox::centered(self.center, 36.0, 36.0)
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

    fn item_box() -> BoundingBox {
        BoundingBox::centered(Point::new(100.0, 100.0), 36.0, 36.0)
    }

    #[test]
    fn test_no_victim_when_nobody_overlaps() {
        let roster = vec![Some(Dummy::at("far", 400.0, 400.0))];
        assert_eq!(find_victim(&item_box(), &roster), None);
    }

    #[test]
    fn test_lowest_live_index_wins() {
        let roster = vec![
            Some(Dummy::at("far", 400.0, 400.0)),
            None,
            Some(Dummy::at("ghost", 100.0, 100.0).dead()),
            Some(Dummy::at("first", 110.0, 100.0)),
            Some(Dummy::at("second", 100.0, 110.0)),
        ];
        assert_eq!(find_victim(&item_box(), &roster), Some(3));
    }

    #[test]
    fn test_dead_and_empty_slots_never_selected() {
        let roster = vec![None, Some(Dummy::at("ghost", 100.0, 100.0).dead()), None];
        assert_eq!(find_victim(&item_box(), &roster), None);
    }

    #[test]
    fn test_resolve_stale_victim() {
        let roster = vec![Some(Dummy::at("a", 0.0, 0.0)), None];
        assert_eq!(resolve_victim(Some(0), &roster), Some(0));
        assert_eq!(resolve_victim(Some(1), &roster), None);
        assert_eq!(resolve_victim(Some(7), &roster), None);
        assert_eq!(resolve_victim(None, &roster), None);
    }
}
