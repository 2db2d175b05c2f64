//! Battle recordings.
//!
//! A recording stores the seed and field rules of a battle plus one encoded
//! element per item for every recorded turn. Items are kept in their encoded
//! form so that a recording written by an older build decodes with the same
//! tolerance rules as a single element.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::codec::{self, EncodeOptions, ItemElement};
use crate::error::{ArenaError, Result};
use crate::rules::FieldRules;
use crate::snapshot::ItemSnapshot;

/// Recording file format version.
pub const RECORDING_VERSION: u32 = 1;

/// Items recorded at one turn boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Round number, starting at 0.
    pub round: u32,
    /// Turn within the round.
    pub turn: u32,
    /// Encoded items in field order.
    pub items: Vec<ItemElement>,
}

/// Complete recording of one battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleRecording {
    /// Recording format version.
    pub version: u32,
    /// Placement seed used for the battle.
    pub seed: u64,
    /// Field rules of the battle.
    pub rules: FieldRules,
    /// Encoder settings used for every turn.
    #[serde(default)]
    pub options: EncodeOptions,
    /// Recorded turns in order.
    pub turns: Vec<TurnRecord>,
}

impl BattleRecording {
    /// Start an empty recording.
    #[must_use]
    pub const fn new(seed: u64, rules: FieldRules, options: EncodeOptions) -> Self {
        Self {
            version: RECORDING_VERSION,
            seed,
            rules,
            options,
            turns: Vec::new(),
        }
    }

    /// Encode and append one turn.
    pub fn record_turn(&mut self, round: u32, turn: u32, snapshots: &[ItemSnapshot]) {
        let items = snapshots
            .iter()
            .map(|snapshot| codec::encode(snapshot, &self.options))
            .collect();
        self.turns.push(TurnRecord { round, turn, items });
    }

    /// Number of recorded turns.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Turns recorded during `round`.
    #[must_use]
    pub fn turns_in_round(&self, round: u32) -> Vec<&TurnRecord> {
        self.turns.iter().filter(|t| t.round == round).collect()
    }

    /// Decode every item of a turn.
    ///
    /// Each item decodes independently, so the caller decides whether one bad
    /// element skips that item or aborts the whole load.
    #[must_use]
    pub fn decode_turn(record: &TurnRecord) -> Vec<Result<ItemSnapshot>> {
        record
            .items
            .iter()
            .map(|element| {
                let decoded = codec::decode(element);
                if let Err(ref e) = decoded {
                    tracing::warn!(
                        round = record.round,
                        turn = record.turn,
                        tag = element.tag.tag(),
                        error = %e,
                        "Failed to decode recorded item"
                    );
                }
                decoded
            })
            .collect()
    }

    /// Serialize as pretty RON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ArenaError::RecordingParse(format!("Failed to serialize recording: {e}")))
    }

    /// Parse a recording and check its version.
    ///
    /// # Errors
    /// Returns an error if the text is not a recording or was written by a
    /// different format version.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let recording: Self = ron::from_str(text)
            .map_err(|e| ArenaError::RecordingParse(format!("Failed to parse recording: {e}")))?;

        if recording.version != RECORDING_VERSION {
            return Err(ArenaError::RecordingVersion {
                expected: RECORDING_VERSION,
                found: recording.version,
            });
        }

        Ok(recording)
    }

    /// Save the recording to a file.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = self.to_ron_string()?;
        std::fs::write(path.as_ref(), text).map_err(|e| {
            ArenaError::RecordingParse(format!("Failed to write recording file: {e}"))
        })?;
        tracing::info!(
            path = %path.as_ref().display(),
            turns = self.turns.len(),
            "Recording saved"
        );
        Ok(())
    }

    /// Load a recording from a file.
    ///
    /// # Errors
    /// Returns an error if file reading, parsing or the version check fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ArenaError::RecordingParse(format!("Failed to read recording file: {e}"))
        })?;
        Self::from_ron_str(&text)
    }
}
