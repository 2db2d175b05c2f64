//! Point-in-time item snapshots.
//!
//! A snapshot is a detached copy of an item taken after every item has been
//! updated for the turn. It carries no link back to the live item other than
//! the id and kind.

use serde::{Deserialize, Serialize};

use crate::collision;
use crate::item::{CollectibleItem, ItemKind};
use crate::lifecycle::ItemState;
use crate::math::Point;

/// Copy of an item's fields at one turn boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    /// Item id.
    pub id: u32,
    /// Item kind.
    pub kind: ItemKind,
    /// Lifecycle state.
    pub state: ItemState,
    /// Logical position.
    pub position: Point,
    /// Display position.
    pub paint_position: Point,
    /// Energy granted on collection.
    pub energy_bonus: f64,
    /// Respawn time.
    pub respawn_time: f64,
    /// ARGB color.
    pub color: u32,
    /// Turn counter.
    pub turn_counter: u32,
    /// Roster index of the collector while the item is in `HitVictim`.
    pub victim: Option<usize>,
}

impl ItemSnapshot {
    /// Snapshot `item`, resolving its victim against the live `roster`.
    ///
    /// The victim is only recorded while the item is in
    /// [`ItemState::HitVictim`]; stale or empty roster slots resolve to no
    /// victim.
    #[must_use]
    pub fn capture<C>(item: &CollectibleItem, roster: &[Option<C>]) -> Self {
        let victim = if item.state() == ItemState::HitVictim {
            collision::resolve_victim(item.victim(), roster)
        } else {
            None
        };

        Self {
            id: item.id(),
            kind: item.kind(),
            state: item.state(),
            position: item.position(),
            paint_position: item.paint_position(),
            energy_bonus: item.energy_bonus(),
            respawn_time: item.respawn_time(),
            color: item.color(),
            turn_counter: item.turn_counter(),
            victim,
        }
    }

    /// Victim as a roster index, `-1` when there is none.
    #[must_use]
    pub fn victim_index(&self) -> i32 {
        self.victim
            .and_then(|index| i32::try_from(index).ok())
            .unwrap_or(-1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::tests::Dummy;
    use crate::item::ItemSetup;
    use crate::placement::PlacementGenerator;
    use crate::rules::{FieldRules, ItemDefaults};

    fn powerup_at(x: f64, y: f64) -> CollectibleItem {
        let mut placement = PlacementGenerator::seeded(FieldRules::default(), 1);
        CollectibleItem::new(
            ItemKind::Powerup,
            4,
            ItemDefaults::for_kind(ItemKind::Powerup),
            &ItemSetup::at(x, y).with_color(0xFF11_2233),
            &mut placement,
            &[],
        )
    }

    #[test]
    fn test_capture_copies_fields() {
        let mut item = powerup_at(150.0, 250.0);
        let mut roster: Vec<Option<Dummy>> = vec![Some(Dummy::at("far", 700.0, 500.0))];
        item.update(&mut roster, false);

        let snapshot = ItemSnapshot::capture(&item, &roster);
        assert_eq!(snapshot.id, 4);
        assert_eq!(snapshot.kind, ItemKind::Powerup);
        assert_eq!(snapshot.state, ItemState::Available);
        assert_eq!(snapshot.position, Point::new(150.0, 250.0));
        assert_eq!(snapshot.paint_position, snapshot.position);
        assert_eq!(snapshot.color, 0xFF11_2233);
        assert_eq!(snapshot.turn_counter, 1);
        assert_eq!(snapshot.victim, None);
        assert_eq!(snapshot.victim_index(), -1);
    }

    #[test]
    fn test_capture_resolves_victim_in_hit_state() {
        let mut item = powerup_at(150.0, 250.0);
        let mut roster = vec![None, Some(Dummy::at("collector", 150.0, 250.0))];
        item.update(&mut roster, false);
        item.set_hit_victim(1);

        let snapshot = ItemSnapshot::capture(&item, &roster);
        assert_eq!(snapshot.victim, Some(1));
        assert_eq!(snapshot.victim_index(), 1);
    }

    #[test]
    fn test_capture_stale_victim_is_none() {
        let mut item = powerup_at(150.0, 250.0);
        let mut roster = vec![None, Some(Dummy::at("collector", 150.0, 250.0))];
        item.update(&mut roster, false);
        item.set_hit_victim(1);

        roster.truncate(1);
        let snapshot = ItemSnapshot::capture(&item, &roster);
        assert_eq!(snapshot.victim_index(), -1);
    }
}
