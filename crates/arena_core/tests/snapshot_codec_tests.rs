//! Snapshot encoding and recording tests.
//!
//! Replays rely on `decode(encode(snapshot))` returning the snapshot
//! unchanged, so these run over generated snapshots rather than a handful of
//! fixed ones.

use arena_core::codec::{self, EncodeOptions, ItemElement};
use arena_core::recording::BattleRecording;
use arena_test_utils::determinism::strategies::arb_snapshot;
use arena_test_utils::fixtures::{edge_roster, populated_field, standard_config};
use proptest::prelude::*;

proptest! {
    #[test]
    fn encoded_snapshots_round_trip(snapshot in arb_snapshot()) {
        let element = codec::encode(&snapshot, &EncodeOptions::default());
        let text = element.to_ron().unwrap();
        let decoded = codec::decode(&ItemElement::from_ron(&text).unwrap()).unwrap();
        prop_assert_eq!(decoded, snapshot);
    }

    #[test]
    fn versionless_snapshots_round_trip(snapshot in arb_snapshot()) {
        let element = codec::encode(&snapshot, &EncodeOptions::default().without_version());
        prop_assert!(!element.attributes.contains_key("schemaVersion"));
        prop_assert_eq!(codec::decode(&element).unwrap(), snapshot);
    }

    #[test]
    fn trimmed_snapshots_match_to_precision(snapshot in arb_snapshot(), decimals in 0u32..6) {
        let element = codec::encode(&snapshot, &EncodeOptions::default().with_precision(decimals));
        let decoded = codec::decode(&element).unwrap();

        let tolerance = 0.5 * 10f64.powi(-(decimals as i32)) + 1e-9;
        prop_assert!((decoded.position.x - snapshot.position.x).abs() <= tolerance);
        prop_assert!((decoded.position.y - snapshot.position.y).abs() <= tolerance);
        prop_assert!((decoded.energy_bonus - snapshot.energy_bonus).abs() <= tolerance);
        prop_assert!((decoded.respawn_time - snapshot.respawn_time).abs() <= tolerance);
        prop_assert_eq!(decoded.state, snapshot.state);
        prop_assert_eq!(decoded.victim, snapshot.victim);
        prop_assert_eq!(decoded.color, snapshot.color);
    }
}

fn record_battle(turns: u32) -> BattleRecording {
    let config = standard_config();
    let mut field = populated_field(config.clone(), 4, 2);
    let mut roster = edge_roster(4);
    let mut recording = BattleRecording::new(config.seed, config.rules, EncodeOptions::default());

    for turn in 0..turns {
        for c in roster.iter_mut().flatten() {
            c.center.y = (c.center.y + 5.0) % 600.0;
        }
        field.update_all(&mut roster, false);
        recording.record_turn(0, turn, &field.capture_all(&roster));
    }
    recording
}

#[test]
fn test_recordings_are_reproducible() {
    assert_eq!(record_battle(150), record_battle(150));
}

#[test]
fn test_recording_decodes_to_captured_snapshots() {
    let config = standard_config();
    let mut field = populated_field(config.clone(), 3, 3);
    let mut roster = edge_roster(2);
    let mut recording = BattleRecording::new(config.seed, config.rules, EncodeOptions::default());

    field.update_all(&mut roster, false);
    let captured = field.capture_all(&roster);
    recording.record_turn(0, 0, &captured);

    let text = recording.to_ron_string().unwrap();
    let loaded = BattleRecording::from_ron_str(&text).unwrap();
    let decoded: Vec<_> = BattleRecording::decode_turn(&loaded.turns[0])
        .into_iter()
        .map(Result::unwrap)
        .collect();
    assert_eq!(decoded, captured);
}
