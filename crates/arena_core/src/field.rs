//! Battle-side item roster.
//!
//! [`ItemField`] owns the placement generator and every item of a battle,
//! allocates ids per kind and drives the items through turns and rounds in a
//! fixed creation order. Placement draws therefore happen in the same order
//! on every run with the same seed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::collision::Combatant;
use crate::error::{ArenaError, Result};
use crate::item::{CollectibleItem, ItemKind, ItemSetup};
use crate::lifecycle::ItemState;
use crate::math::Point;
use crate::placement::PlacementGenerator;
use crate::rules::{ArenaConfig, FieldRules};
use crate::snapshot::ItemSnapshot;

/// Every item of one battle.
#[derive(Debug, Clone)]
pub struct ItemField {
    config: ArenaConfig,
    placement: PlacementGenerator,
    items: Vec<CollectibleItem>,
    next_pickup_id: Option<u32>,
    next_powerup_id: Option<u32>,
}

impl ItemField {
    /// Create an empty field seeded from `config`.
    #[must_use]
    pub fn new(config: ArenaConfig) -> Self {
        let placement = PlacementGenerator::seeded(config.rules, config.seed);
        Self {
            config,
            placement,
            items: Vec::new(),
            next_pickup_id: Some(0),
            next_powerup_id: Some(0),
        }
    }

    /// Battle configuration.
    #[must_use]
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Field rules.
    #[must_use]
    pub const fn rules(&self) -> &FieldRules {
        &self.config.rules
    }

    /// Items in creation order.
    #[must_use]
    pub fn items(&self) -> &[CollectibleItem] {
        &self.items
    }

    /// Look up an item by kind and id.
    #[must_use]
    pub fn get(&self, kind: ItemKind, id: u32) -> Option<&CollectibleItem> {
        self.items
            .iter()
            .find(|item| item.kind() == kind && item.id() == id)
    }

    /// Mutable lookup, for simulator-driven changes such as marking an item
    /// for removal.
    pub fn get_mut(&mut self, kind: ItemKind, id: u32) -> Option<&mut CollectibleItem> {
        self.items
            .iter_mut()
            .find(|item| item.kind() == kind && item.id() == id)
    }

    /// Number of items on the field.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items have been spawned (or all were dropped).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Create an item and return its id.
    ///
    /// Ids count up per kind and are never reused. Without an explicit setup
    /// position the item is placed clear of every item already on the field.
    ///
    /// # Errors
    ///
    /// [`ArenaError::IdsExhausted`] once every `u32` id of `kind` is taken.
    pub fn spawn(&mut self, kind: ItemKind, setup: &ItemSetup) -> Result<u32> {
        let id = self.allocate_id(kind)?;
        let avoid: Vec<Point> = self.items.iter().map(CollectibleItem::position).collect();
        let item = CollectibleItem::new(
            kind,
            id,
            self.config.defaults_for(kind),
            setup,
            &mut self.placement,
            &avoid,
        );
        tracing::debug!(
            kind = kind.tag(),
            id,
            x = item.position().x,
            y = item.position().y,
            "Item spawned"
        );
        self.items.push(item);
        Ok(id)
    }

    /// Spawn `n` items of `kind` on equally distributed points.
    ///
    /// # Errors
    ///
    /// Stops at the first failed [`ItemField::spawn`].
    pub fn spawn_distributed(&mut self, kind: ItemKind, n: usize) -> Result<Vec<u32>> {
        self.placement
            .equally_distributed_points(n)
            .into_iter()
            .map(|point| self.spawn(kind, &ItemSetup::at(point.x, point.y)))
            .collect()
    }

    fn allocate_id(&mut self, kind: ItemKind) -> Result<u32> {
        let next = match kind {
            ItemKind::Pickup => &mut self.next_pickup_id,
            ItemKind::Powerup => &mut self.next_powerup_id,
        };
        let id = next.ok_or(ArenaError::IdsExhausted(kind))?;
        *next = id.checked_add(1);
        Ok(id)
    }

    /// Advance every item by one turn, in creation order.
    pub fn update_all<C: Combatant>(&mut self, roster: &mut [Option<C>], respawn_blocked: bool) {
        for item in &mut self.items {
            item.update(roster, respawn_blocked);
        }
    }

    /// Snapshot every item. Call after [`ItemField::update_all`] so the
    /// snapshots see the settled turn.
    #[must_use]
    pub fn capture_all<C>(&self, roster: &[Option<C>]) -> Vec<ItemSnapshot> {
        self.items
            .iter()
            .map(|item| ItemSnapshot::capture(item, roster))
            .collect()
    }

    /// Reset every item for a new round.
    ///
    /// Randomly placed items are re-placed in creation order, each clear of
    /// the fixed items and of those already re-placed.
    pub fn initialize_round(&mut self) {
        let mut placed: Vec<Point> = self
            .items
            .iter()
            .filter(|item| item.has_explicit_position())
            .map(CollectibleItem::position)
            .collect();
        for item in &mut self.items {
            item.initialize_round(&mut self.placement, &placed);
            if !item.has_explicit_position() {
                placed.push(item.position());
            }
        }
    }

    /// Take every item out of play at the end of a round.
    pub fn cleanup_after_round_ended(&mut self) {
        for item in &mut self.items {
            item.cleanup_after_round_ended();
        }
    }

    /// Drop items the simulator marked [`ItemState::Remove`], returning how
    /// many were dropped.
    pub fn drop_retired(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.state() != ItemState::Remove);
        let dropped = before - self.items.len();
        if dropped > 0 {
            tracing::debug!(dropped, remaining = self.items.len(), "Retired items dropped");
        }
        dropped
    }

    /// Hash of the observable item state.
    ///
    /// Identical call sequences with the same seed produce identical hashes.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.items.len().hash(&mut hasher);
        for item in &self.items {
            item.kind().hash(&mut hasher);
            item.id().hash(&mut hasher);
            item.state().hash(&mut hasher);
            item.turn_counter().hash(&mut hasher);
            item.position().x.to_bits().hash(&mut hasher);
            item.position().y.to_bits().hash(&mut hasher);
            item.energy_bonus().to_bits().hash(&mut hasher);
            item.respawn_time().to_bits().hash(&mut hasher);
            item.victim().hash(&mut hasher);
            item.color().hash(&mut hasher);
        }

        hasher.finish()
    }
}
