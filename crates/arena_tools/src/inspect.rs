//! Recording inspection and validation.

use std::collections::HashMap;
use std::fmt;

use arena_core::error::ArenaError;
use arena_core::item::ItemKind;
use arena_core::lifecycle::ItemState;
use arena_core::recording::BattleRecording;

/// Per-round figures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// Round number.
    pub round: u32,
    /// Turns recorded in the round.
    pub turns: usize,
    /// Times an item went from collectible to collected.
    pub collections: usize,
    /// Times an item came back after its respawn time.
    pub respawns: usize,
}

/// Aggregate view of a recording.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSummary {
    /// Placement seed.
    pub seed: u64,
    /// Total recorded turns.
    pub turns: usize,
    /// Item-turns observed in each state, indexed by [`ItemState::value`].
    pub state_counts: [usize; ItemState::ALL.len()],
    /// Items that failed to decode.
    pub decode_errors: usize,
    /// Rounds in recording order.
    pub rounds: Vec<RoundSummary>,
}

impl RecordingSummary {
    /// Item-turns observed in `state`.
    #[must_use]
    pub fn count(&self, state: ItemState) -> usize {
        self.state_counts[usize::from(state.value())]
    }

    /// Collections across every round.
    #[must_use]
    pub fn total_collections(&self) -> usize {
        self.rounds.iter().map(|r| r.collections).sum()
    }
}

impl fmt::Display for RecordingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "seed {} | {} turns", self.seed, self.turns)?;
        for state in ItemState::ALL {
            writeln!(f, "  {:<12}{}", state.name(), self.count(state))?;
        }
        for round in &self.rounds {
            writeln!(
                f,
                "  round {:>3}: {} turns, {} collected, {} respawned",
                round.round, round.turns, round.collections, round.respawns
            )?;
        }
        if self.decode_errors > 0 {
            writeln!(f, "  {} items failed to decode", self.decode_errors)?;
        }
        Ok(())
    }
}

/// Summarize a recording.
///
/// Items are tracked across turns by kind and id; undecodable items are
/// counted and skipped.
#[must_use]
pub fn summarize(recording: &BattleRecording) -> RecordingSummary {
    let mut summary = RecordingSummary {
        seed: recording.seed,
        turns: recording.turn_count(),
        ..RecordingSummary::default()
    };
    let mut previous: HashMap<(ItemKind, u32), ItemState> = HashMap::new();

    for record in &recording.turns {
        if summary.rounds.last().map(|r| r.round) != Some(record.round) {
            summary.rounds.push(RoundSummary {
                round: record.round,
                ..RoundSummary::default()
            });
            previous.clear();
        }
        let mut collections = 0;
        let mut respawns = 0;

        for decoded in BattleRecording::decode_turn(record) {
            let Ok(snapshot) = decoded else {
                summary.decode_errors += 1;
                continue;
            };
            summary.state_counts[usize::from(snapshot.state.value())] += 1;

            let key = (snapshot.kind, snapshot.id);
            if let Some(&before) = previous.get(&key) {
                if before.is_active() && !snapshot.state.is_active() {
                    collections += 1;
                }
                if before == ItemState::Unavailable && snapshot.state == ItemState::Spawned {
                    respawns += 1;
                }
            }
            previous.insert(key, snapshot.state);
        }

        if let Some(current) = summary.rounds.last_mut() {
            current.turns += 1;
            current.collections += collections;
            current.respawns += respawns;
        }
    }

    summary
}

/// An item that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Round of the turn.
    pub round: u32,
    /// Turn within the round.
    pub turn: u32,
    /// Position of the item within the turn.
    pub index: usize,
    /// Decode error.
    pub error: ArenaError,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "round {} turn {} item {}: {}",
            self.round, self.turn, self.index, self.error
        )
    }
}

/// Decode every item of every turn, collecting failures.
#[must_use]
pub fn validate_recording(recording: &BattleRecording) -> Vec<ValidationIssue> {
    recording
        .turns
        .iter()
        .flat_map(|record| {
            BattleRecording::decode_turn(record)
                .into_iter()
                .enumerate()
                .filter_map(move |(index, decoded)| {
                    decoded.err().map(|error| ValidationIssue {
                        round: record.round,
                        turn: record.turn,
                        index,
                        error,
                    })
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::codec::EncodeOptions;
    use arena_core::math::Point;
    use arena_core::rules::FieldRules;
    use arena_core::snapshot::ItemSnapshot;

    fn pickup(state: ItemState) -> ItemSnapshot {
        ItemSnapshot {
            id: 0,
            kind: ItemKind::Pickup,
            state,
            position: Point::new(10.0, 10.0),
            paint_position: Point::new(10.0, 10.0),
            energy_bonus: 10.0,
            respawn_time: 2.0,
            color: ItemKind::Pickup.default_color(),
            turn_counter: 0,
            victim: None,
        }
    }

    fn recording() -> BattleRecording {
        let mut recording =
            BattleRecording::new(7, FieldRules::default(), EncodeOptions::default());
        let states = [
            ItemState::Spawned,
            ItemState::Available,
            ItemState::Unavailable,
            ItemState::Unavailable,
            ItemState::Spawned,
            ItemState::Available,
        ];
        for (turn, state) in (0u32..).zip(states) {
            recording.record_turn(0, turn, &[pickup(state)]);
        }
        recording.record_turn(1, 0, &[pickup(ItemState::Spawned)]);
        recording
    }

    #[test]
    fn test_summary_counts() {
        let summary = summarize(&recording());
        assert_eq!(summary.turns, 7);
        assert_eq!(summary.count(ItemState::Spawned), 3);
        assert_eq!(summary.count(ItemState::Unavailable), 2);
        assert_eq!(summary.rounds.len(), 2);
        assert_eq!(summary.rounds[0].turns, 6);
        assert_eq!(summary.rounds[0].collections, 1);
        assert_eq!(summary.rounds[0].respawns, 1);
        assert_eq!(summary.rounds[1].collections, 0);
        assert_eq!(summary.total_collections(), 1);
        assert!(summary.to_string().contains("round   0: 6 turns"));
    }

    #[test]
    fn test_validate_reports_bad_items() {
        let mut recording = recording();
        assert!(validate_recording(&recording).is_empty());

        recording.turns[2].items[0]
            .attributes
            .insert("x".to_string(), "west".to_string());
        let issues = validate_recording(&recording);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].turn, 2);
        assert_eq!(issues[0].index, 0);
        assert!(issues[0].to_string().starts_with("round 0 turn 2 item 0"));

        assert_eq!(summarize(&recording).decode_errors, 1);
    }
}
