//! Collectible items: pickups and powerups.
//!
//! Both kinds share one entity type. The kind decides the default color, how
//! strongly random placement is pulled toward the field center, and what
//! happens when the item is collected:
//! - powerups announce the reward to the whole roster and their respawn
//!   countdown pauses while respawns are blocked;
//! - pickups only tell the collector, and their countdown never pauses.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::collision::{self, Combatant, ItemEvent, PowerupEvent};
use crate::lifecycle::{self, ItemState, TransitionInput};
use crate::math::{BoundingBox, Point};
use crate::placement::PlacementGenerator;
use crate::rules::ItemDefaults;

/// Side length of an item's square bounding box.
pub const ITEM_SIZE: f64 = 36.0;

/// ARGB color of a pickup unless overridden.
pub const DEFAULT_PICKUP_COLOR: u32 = 0xFFAB_CDEF;

/// ARGB color of a powerup unless overridden.
pub const DEFAULT_POWERUP_COLOR: u32 = 0xFFAB_CDEF;

/// Item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Minor bonus, collected quietly.
    Pickup,
    /// Major bonus, announced to every combatant.
    Powerup,
}

/// What an item does beyond granting energy when collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnHitPolicy {
    /// Queue a [`PowerupEvent`] to every combatant on the roster.
    BroadcastToRoster,
    /// Print a diagnostic line to the collector only.
    NotifyVictim,
}

impl ItemKind {
    /// Default ARGB color.
    #[must_use]
    pub const fn default_color(self) -> u32 {
        match self {
            Self::Pickup => DEFAULT_PICKUP_COLOR,
            Self::Powerup => DEFAULT_POWERUP_COLOR,
        }
    }

    /// Uniform draws averaged per axis when placing randomly.
    #[must_use]
    pub const fn placement_samples(self) -> u32 {
        match self {
            Self::Pickup => 4,
            Self::Powerup => 2,
        }
    }

    /// Reward behavior on collection.
    #[must_use]
    pub const fn on_hit_policy(self) -> OnHitPolicy {
        match self {
            Self::Pickup => OnHitPolicy::NotifyVictim,
            Self::Powerup => OnHitPolicy::BroadcastToRoster,
        }
    }

    /// Whether a blocked respawn pauses this kind's turn counter.
    #[must_use]
    pub const fn pausable_respawn(self) -> bool {
        matches!(self, Self::Powerup)
    }

    /// Element tag used in snapshots.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Powerup => "powerup",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Pickup => "Pickup",
            Self::Powerup => "Powerup",
        }
    }
}

/// Optional per-item overrides supplied when an item is created.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemSetup {
    /// Fixed position; the item is placed randomly when absent.
    #[serde(default)]
    pub position: Option<Point>,
    /// Energy bonus override.
    #[serde(default)]
    pub energy_bonus: Option<f64>,
    /// Respawn time override.
    #[serde(default)]
    pub respawn_time: Option<f64>,
    /// ARGB color override.
    #[serde(default)]
    pub color: Option<u32>,
}

impl ItemSetup {
    /// Setup pinning the item to `position`.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Some(Point::new(x, y)),
            ..Self::default()
        }
    }

    /// Override the energy bonus.
    #[must_use]
    pub const fn with_energy_bonus(mut self, energy_bonus: f64) -> Self {
        self.energy_bonus = Some(energy_bonus);
        self
    }

    /// Override the respawn time.
    #[must_use]
    pub const fn with_respawn_time(mut self, respawn_time: f64) -> Self {
        self.respawn_time = Some(respawn_time);
        self
    }

    /// Override the color.
    #[must_use]
    pub const fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }
}

/// A pickup or powerup on the field.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectibleItem {
    id: u32,
    kind: ItemKind,
    position: Point,
    paint_position: Point,
    bounding_box: BoundingBox,
    state: ItemState,
    turn_counter: u32,
    energy_bonus: f64,
    respawn_time: f64,
    victim: Option<usize>,
    color: u32,
    explicit_position: bool,
}

impl CollectibleItem {
    /// Create an item in the `Spawned` state.
    ///
    /// Values in `setup` override `defaults`; without a setup position the
    /// item is placed randomly, steering clear of `avoid`.
    pub fn new<R: Rng>(
        kind: ItemKind,
        id: u32,
        defaults: ItemDefaults,
        setup: &ItemSetup,
        placement: &mut PlacementGenerator<R>,
        avoid: &[Point],
    ) -> Self {
        let position = setup.position.unwrap_or_else(|| {
            placement.random_position(ITEM_SIZE, kind.placement_samples(), avoid)
        });

        Self {
            id,
            kind,
            position,
            paint_position: position,
            bounding_box: BoundingBox::centered(position, ITEM_SIZE, ITEM_SIZE),
            state: ItemState::Spawned,
            turn_counter: 0,
            energy_bonus: setup.energy_bonus.unwrap_or(defaults.energy_bonus),
            respawn_time: setup.respawn_time.unwrap_or(defaults.respawn_time),
            victim: None,
            color: setup.color.unwrap_or_else(|| kind.default_color()),
            explicit_position: setup.position.is_some(),
        }
    }

    /// Id, unique within the kind for the battle.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Item kind.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Logical position.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Display position.
    #[must_use]
    pub const fn paint_position(&self) -> Point {
        self.paint_position
    }

    /// Collision box, always centered on [`Self::position`].
    #[must_use]
    pub const fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ItemState {
        self.state
    }

    /// Turns counted in the current state.
    #[must_use]
    pub const fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    /// Energy granted on collection.
    #[must_use]
    pub const fn energy_bonus(&self) -> f64 {
        self.energy_bonus
    }

    /// Turns spent unavailable after collection.
    #[must_use]
    pub const fn respawn_time(&self) -> f64 {
        self.respawn_time
    }

    /// Roster index of the collector, set only while the state is `HitVictim`.
    #[must_use]
    pub const fn victim(&self) -> Option<usize> {
        self.victim
    }

    /// ARGB color.
    #[must_use]
    pub const fn color(&self) -> u32 {
        self.color
    }

    /// True while the item can be collected.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Whether the position came from an explicit setup.
    #[must_use]
    pub const fn has_explicit_position(&self) -> bool {
        self.explicit_position
    }

    /// Move the item, keeping the bounding box in sync.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.paint_position = position;
        self.bounding_box = BoundingBox::centered(position, ITEM_SIZE, ITEM_SIZE);
    }

    /// Force a state, e.g. [`ItemState::Remove`] for final teardown.
    ///
    /// Any state other than `HitVictim` drops the remembered victim.
    pub fn set_state(&mut self, state: ItemState) {
        self.state = state;
        if state != ItemState::HitVictim {
            self.victim = None;
        }
    }

    /// Put the item in `HitVictim` with `victim` as the collector, as when
    /// restoring a recorded turn.
    pub fn set_hit_victim(&mut self, victim: usize) {
        self.state = ItemState::HitVictim;
        self.victim = Some(victim);
    }

    /// Advance the item by one turn.
    ///
    /// Counts the turn, lets an active item be collected by the first
    /// overlapping live combatant in roster order, then applies the lifecycle
    /// table. `respawn_blocked` pauses a powerup's countdown.
    pub fn update<C: Combatant>(&mut self, roster: &mut [Option<C>], respawn_blocked: bool) {
        let paused = respawn_blocked && self.kind.pausable_respawn();
        if !paused {
            self.turn_counter = self.turn_counter.saturating_add(1);
        }

        if self.state.is_active() {
            if let Some(index) = collision::find_victim(&self.bounding_box, roster) {
                self.claim(index, roster);
            }
        }

        self.advance_state(paused);
    }

    fn claim<C: Combatant>(&mut self, index: usize, roster: &mut [Option<C>]) {
        self.state = ItemState::HitVictim;
        self.turn_counter = 0;
        self.victim = Some(index);

        let Some(victim) = roster[index].as_mut() else {
            return;
        };
        victim.add_energy(self.energy_bonus);
        let victim_name = victim.name().to_string();

        tracing::debug!(
            kind = self.kind.tag(),
            id = self.id,
            victim = index,
            energy_bonus = self.energy_bonus,
            "Item collected"
        );

        match self.kind.on_hit_policy() {
            OnHitPolicy::BroadcastToRoster => {
                let event = PowerupEvent {
                    energy_bonus: self.energy_bonus,
                    respawn_time: self.respawn_time,
                    victim_name,
                    item_id: self.id,
                };
                for combatant in roster.iter_mut().flatten() {
                    combatant.push_event(ItemEvent::Powerup(event.clone()));
                }
            }
            OnHitPolicy::NotifyVictim => {
                victim.print_line(format!(
                    "SYSTEM: {} bonus for {victim_name}: {}",
                    self.kind.label(),
                    (self.energy_bonus + 0.5).floor()
                ));
            }
        }
    }

    fn advance_state(&mut self, respawn_blocked: bool) {
        let transition = lifecycle::next_transition(
            self.state,
            TransitionInput {
                turn_counter: self.turn_counter,
                respawn_time: self.respawn_time,
                respawn_blocked,
            },
        );

        if transition.next != self.state {
            tracing::trace!(
                kind = self.kind.tag(),
                id = self.id,
                from = self.state.name(),
                to = transition.next.name(),
                "Item state transition"
            );
        }

        self.state = transition.next;
        if self.state != ItemState::HitVictim {
            self.victim = None;
        }
        if transition.reset_counter {
            self.turn_counter = 0;
        }
    }

    /// Reset the item for a new round.
    ///
    /// Randomly placed items get a fresh position from `placement`, steering
    /// clear of `avoid`.
    pub fn initialize_round<R: Rng>(
        &mut self,
        placement: &mut PlacementGenerator<R>,
        avoid: &[Point],
    ) {
        if !self.explicit_position {
            let position =
                placement.random_position(ITEM_SIZE, self.kind.placement_samples(), avoid);
            self.set_position(position);
        }
        self.state = ItemState::Spawned;
        self.turn_counter = 0;
        self.victim = None;
        tracing::debug!(kind = self.kind.tag(), id = self.id, "Item round initialized");
    }

    /// Take the item out of play at the end of a round.
    pub fn cleanup_after_round_ended(&mut self) {
        self.state = ItemState::Inactive;
        self.turn_counter = 0;
        self.victim = None;
    }
}

impl fmt::Display for CollectibleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} V{} X{} Y{} {}",
            self.kind.label(),
            self.id,
            self.energy_bonus.trunc(),
            self.position.x.trunc(),
            self.position.y.trunc(),
            self.state
        )
    }
}
