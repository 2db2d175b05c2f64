//! # Arena Core
//!
//! Collectible items for a turn-based combat simulator.
//!
//! Pickups and powerups spawn on a bounded field, are collected by combatants
//! moving over them and cycle through an availability/respawn lifecycle one
//! turn at a time. Every turn can be captured as snapshots and written to a
//! versioned text recording that replays identically across builds.
//!
//! This crate is deterministic:
//! - No rendering
//! - No system randomness (placement uses an owned, seeded generator)
//! - No IO apart from recording save/load
//!
//! ## Crate Structure
//!
//! - [`placement`] - Center-biased and equally distributed positions
//! - [`item`] - The collectible item entity and its per-turn update
//! - [`lifecycle`] - States and the transition table
//! - [`collision`] - Roster scanning and the combatant interface
//! - [`snapshot`] / [`codec`] - Turn snapshots and their text encoding
//! - [`field`] - All items of one battle
//! - [`recording`] - Battle recordings on disk

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod codec;
pub mod collision;
pub mod error;
pub mod field;
pub mod item;
pub mod lifecycle;
pub mod math;
pub mod placement;
pub mod recording;
pub mod rules;
pub mod snapshot;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::codec::{EncodeOptions, ItemElement, SNAPSHOT_SCHEMA_VERSION};
    pub use crate::collision::{Combatant, ItemEvent, PowerupEvent};
    pub use crate::error::{ArenaError, Result};
    pub use crate::field::ItemField;
    pub use crate::item::{CollectibleItem, ItemKind, ItemSetup, ITEM_SIZE};
    pub use crate::lifecycle::ItemState;
    pub use crate::math::{BoundingBox, Point};
    pub use crate::placement::PlacementGenerator;
    pub use crate::recording::{BattleRecording, TurnRecord};
    pub use crate::rules::{ArenaConfig, FieldRules, ItemDefaults};
    pub use crate::snapshot::ItemSnapshot;
}
