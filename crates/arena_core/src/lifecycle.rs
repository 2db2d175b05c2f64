//! Item lifecycle states and the transition table.
//!
//! The table is a pure function of the current state and the turn inputs so
//! it can be exercised without any roster or collision setup.
//!
//! | Current     | Condition                                  | Next                     |
//! |-------------|--------------------------------------------|--------------------------|
//! | Spawned     | `turn_counter > 0`                         | Available                |
//! | HitVictim   | `respawn_time > 0`                         | Unavailable, counter = 0 |
//! | HitVictim   | `respawn_time <= 0`                        | Inactive, counter = 0    |
//! | Unavailable | not blocked and `turn_counter >= respawn`  | Spawned, counter = 0     |
//!
//! Every other combination keeps the current state. `Available -> HitVictim`
//! happens during collision handling, before the table is consulted.
//! `Inactive` and `Remove` are terminal here; only the simulator leaves them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// Lifecycle state of a collectible item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemState {
    /// Freshly placed; becomes available after its first counted turn.
    #[default]
    Spawned,
    /// On the field and collectible.
    Available,
    /// Collected this turn.
    HitVictim,
    /// Waiting out the respawn time.
    Unavailable,
    /// Out of play until the next round.
    Inactive,
    /// Marked by the simulator for final teardown.
    Remove,
}

impl ItemState {
    /// Every state, in numeric order.
    pub const ALL: [Self; 6] = [
        Self::Spawned,
        Self::Available,
        Self::HitVictim,
        Self::Unavailable,
        Self::Inactive,
        Self::Remove,
    ];

    /// True for states in which the item can be collected.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Spawned | Self::Available)
    }

    /// Symbolic name used in snapshots.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spawned => "Spawned",
            Self::Available => "Available",
            Self::HitVictim => "HitVictim",
            Self::Unavailable => "Unavailable",
            Self::Inactive => "Inactive",
            Self::Remove => "Remove",
        }
    }

    /// Upper snake case name written by legacy recordings.
    const fn legacy_name(self) -> &'static str {
        match self {
            Self::Spawned => "SPAWNED",
            Self::Available => "AVAILABLE",
            Self::HitVictim => "HIT_VICTIM",
            Self::Unavailable => "UNAVAILABLE",
            Self::Inactive => "INACTIVE",
            Self::Remove => "REMOVE",
        }
    }

    /// Stable numeric value of the state.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// State for a numeric value.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ItemState {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.name() == s || state.legacy_name() == s)
            .ok_or_else(|| ArenaError::InvalidState(s.to_string()))
    }
}

/// Turn inputs consulted by the transition table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionInput {
    /// Counter after this turn's increment (and any collision reset).
    pub turn_counter: u32,
    /// Respawn time of the item.
    pub respawn_time: f64,
    /// Whether the respawn countdown is paused this turn.
    pub respawn_blocked: bool,
}

/// Outcome of one table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State after the turn.
    pub next: ItemState,
    /// Whether the turn counter restarts from zero.
    pub reset_counter: bool,
}

impl Transition {
    const fn stay(state: ItemState) -> Self {
        Self {
            next: state,
            reset_counter: false,
        }
    }

    const fn reset_to(state: ItemState) -> Self {
        Self {
            next: state,
            reset_counter: true,
        }
    }
}

/// Look up the next state for `state` given this turn's inputs.
#[must_use]
pub fn next_transition(state: ItemState, input: TransitionInput) -> Transition {
    match state {
        ItemState::Spawned if input.turn_counter > 0 => Transition::stay(ItemState::Available),
        ItemState::HitVictim if input.respawn_time > 0.0 => {
            Transition::reset_to(ItemState::Unavailable)
        }
        ItemState::HitVictim => Transition::reset_to(ItemState::Inactive),
        ItemState::Unavailable
            if !input.respawn_blocked && f64::from(input.turn_counter) >= input.respawn_time =>
        {
            Transition::reset_to(ItemState::Spawned)
        }
        other => Transition::stay(other),
    }
}
