//! Structured text encoding of item snapshots.
//!
//! Each snapshot becomes one [`ItemElement`]: a tag (`pickup` or `powerup`)
//! plus a map of named attributes whose values are text. Numbers are written
//! in decimal, colors in upper-case hex and the state by its symbolic name.
//! Elements are stored as RON, e.g.
//!
//! ```ron
//! (tag: powerup, attributes: {"energyBonus": "30", "id": "3", "respawnTime": "300",
//!   "schemaVersion": "2", "state": "Available", "turnCounter": "4", "x": "412.5", "y": "230"})
//! ```
//!
//! # Attributes
//!
//! | Name            | Written                                   | Missing on read      |
//! |-----------------|-------------------------------------------|----------------------|
//! | `id`            | always                                    | error                |
//! | `victim`        | only in `HitVictim`                       | -1 (no victim)       |
//! | `x`, `y`        | always, paint position                    | 0                    |
//! | `energyBonus`   | always                                    | kind default         |
//! | `respawnTime`   | always                                    | kind default         |
//! | `color`         | only when not the kind default            | kind default         |
//! | `turnCounter`   | always                                    | 0                    |
//! | `state`         | always                                    | `Inactive`           |
//! | `schemaVersion` | unless [`EncodeOptions::skip_version`]    | current version      |
//!
//! Older recordings used other spellings (`EnergyBonus`, `RespawnTime`,
//! `TurnCounter`, `State`, `ver`, and the short `v`, `c`, `s`); those are
//! accepted on read.
//!
//! With [`EncodeOptions::trim_precision`] set, coordinates and reward values
//! are rounded on write and only match the original to that many decimals.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, Result};
use crate::item::ItemKind;
use crate::lifecycle::ItemState;
use crate::math::Point;
use crate::rules::ItemDefaults;
use crate::snapshot::ItemSnapshot;

/// Snapshot schema version written by this build.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 2;

const ID: &[&str] = &["id"];
const VICTIM: &[&str] = &["victim", "v"];
const X: &[&str] = &["x"];
const Y: &[&str] = &["y"];
const ENERGY_BONUS: &[&str] = &["energyBonus", "EnergyBonus"];
const RESPAWN_TIME: &[&str] = &["respawnTime", "RespawnTime"];
const COLOR: &[&str] = &["color", "c"];
const TURN_COUNTER: &[&str] = &["turnCounter", "TurnCounter"];
const STATE: &[&str] = &["state", "State", "s"];
const SCHEMA_VERSION: &[&str] = &["schemaVersion", "ver"];

/// One encoded item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemElement {
    /// Element tag.
    pub tag: ItemKind,
    /// Attribute name to text value.
    pub attributes: BTreeMap<String, String>,
}

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// Round numeric values to this many decimals.
    #[serde(default)]
    pub trim_precision: Option<u32>,
    /// Leave out the `schemaVersion` attribute.
    #[serde(default)]
    pub skip_version: bool,
}

impl EncodeOptions {
    /// Round numeric values to `decimals` places.
    #[must_use]
    pub const fn with_precision(mut self, decimals: u32) -> Self {
        self.trim_precision = Some(decimals);
        self
    }

    /// Omit the schema version.
    #[must_use]
    pub const fn without_version(mut self) -> Self {
        self.skip_version = true;
        self
    }

    fn number(&self, value: f64) -> String {
        match self.trim_precision {
            None => format!("{value}"),
            Some(decimals) => {
                let text = format!("{value:.*}", decimals as usize);
                if text.contains('.') {
                    text.trim_end_matches('0').trim_end_matches('.').to_string()
                } else {
                    text
                }
            }
        }
    }
}

/// Encode a snapshot as an element.
#[must_use]
pub fn encode(snapshot: &ItemSnapshot, options: &EncodeOptions) -> ItemElement {
    let mut attributes = BTreeMap::new();
    let mut put = |name: &str, value: String| {
        attributes.insert(name.to_string(), value);
    };

    put(ID[0], snapshot.id.to_string());
    if snapshot.state == ItemState::HitVictim {
        put(VICTIM[0], snapshot.victim_index().to_string());
    }
    put(X[0], options.number(snapshot.paint_position.x));
    put(Y[0], options.number(snapshot.paint_position.y));
    put(ENERGY_BONUS[0], options.number(snapshot.energy_bonus));
    put(RESPAWN_TIME[0], options.number(snapshot.respawn_time));
    if snapshot.color != snapshot.kind.default_color() {
        put(COLOR[0], format!("{:X}", snapshot.color));
    }
    put(TURN_COUNTER[0], snapshot.turn_counter.to_string());
    put(STATE[0], snapshot.state.name().to_string());
    if !options.skip_version {
        put(SCHEMA_VERSION[0], SNAPSHOT_SCHEMA_VERSION.to_string());
    }

    ItemElement {
        tag: snapshot.kind,
        attributes,
    }
}

/// Decode an element back into a snapshot.
///
/// # Errors
///
/// - [`ArenaError::MalformedSnapshot`] when `id` is missing or any present
///   numeric or color attribute does not parse.
/// - [`ArenaError::InvalidState`] for an unknown state name.
/// - [`ArenaError::UnsupportedSchemaVersion`] for elements written by a newer
///   schema.
pub fn decode(element: &ItemElement) -> Result<ItemSnapshot> {
    let kind = element.tag;
    let defaults = ItemDefaults::for_kind(kind);

    let version: u32 = element.parse_or(SCHEMA_VERSION, SNAPSHOT_SCHEMA_VERSION)?;
    if version > SNAPSHOT_SCHEMA_VERSION {
        return Err(ArenaError::UnsupportedSchemaVersion {
            found: version,
            supported: SNAPSHOT_SCHEMA_VERSION,
        });
    }

    let id: u32 = match element.attribute(ID) {
        Some((name, value)) => parse_number(name, value)?,
        None => return Err(ArenaError::malformed(ID[0], "")),
    };

    let victim_index: i64 = element.parse_or(VICTIM, -1)?;
    let victim = usize::try_from(victim_index).ok();

    let paint_position = Point::new(element.parse_or(X, 0.0)?, element.parse_or(Y, 0.0)?);

    let color = match element.attribute(COLOR) {
        Some((name, value)) => {
            u32::from_str_radix(value, 16).map_err(|_| ArenaError::malformed(name, value))?
        }
        None => kind.default_color(),
    };

    let state = match element.attribute(STATE) {
        Some((_, value)) => value.parse::<ItemState>()?,
        None => ItemState::Inactive,
    };

    Ok(ItemSnapshot {
        id,
        kind,
        state,
        position: paint_position,
        paint_position,
        energy_bonus: element.parse_or(ENERGY_BONUS, defaults.energy_bonus)?,
        respawn_time: element.parse_or(RESPAWN_TIME, defaults.respawn_time)?,
        color,
        turn_counter: element.parse_or(TURN_COUNTER, 0)?,
        victim,
    })
}

impl ItemElement {
    /// First attribute present under any of `names`, with the name it used.
    fn attribute<'a>(&'a self, names: &[&'a str]) -> Option<(&'a str, &'a str)> {
        names.iter().find_map(|name| {
            self.attributes
                .get(*name)
                .map(|value| (*name, value.as_str()))
        })
    }

    fn parse_or<T: FromStr>(&self, names: &[&str], default: T) -> Result<T> {
        match self.attribute(names) {
            Some((name, value)) => parse_number(name, value),
            None => Ok(default),
        }
    }

    /// Serialize the element as RON text.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::RecordingParse`] if serialization fails.
    pub fn to_ron(&self) -> Result<String> {
        ron::to_string(self).map_err(|e| ArenaError::RecordingParse(e.to_string()))
    }

    /// Parse an element from RON text.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::MalformedSnapshot`] if the text is not an element.
    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| ArenaError::malformed("element", &e.to_string()))
    }
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ArenaError::malformed(name, value))
}
