//! Determinism testing utilities.
//!
//! Recorded battles are only useful if replaying the same seed and the same
//! roster produces the same item history. Sources of non-determinism include:
//!
//! - **Hidden random sources**: placement must draw only from the field's own
//!   seeded generator, in call order.
//! - **Iteration order**: items update in creation order, the roster is
//!   scanned in index order.
//! - **Lossy encoding**: snapshots must round-trip exactly unless precision
//!   trimming was requested.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of turns simulated.
    pub turns: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic run).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that every run matched, with a detailed message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Item field is non-deterministic!\n\
                 Runs: {}\n\
                 Turns: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.turns,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a scenario multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to run the scenario
/// * `turns` - Number of turns to simulate per run
/// * `setup` - Function to create the initial state
/// * `step` - Function to advance the state by one turn
/// * `hash` - Function to compute the state hash
///
/// # Example
///
/// ```ignore
/// use arena_test_utils::determinism::verify_determinism;
/// use arena_test_utils::fixtures::{edge_roster, populated_field, standard_config};
///
/// let result = verify_determinism(
///     3,
///     200,
///     || (populated_field(standard_config(), 4, 2), edge_roster(4)),
///     |(field, roster)| field.update_all(roster, false),
///     |(field, _)| field.state_hash(),
/// );
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    turns: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for _ in 0..turns {
            step(&mut state);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        turns,
    }
}

/// Run two copies of a scenario turn by turn, finding the first divergence.
///
/// # Returns
///
/// `None` if the runs stay identical, `Some(turn)` for the first turn after
/// which their hashes differ (`0` when the initial states already differ).
pub fn find_first_divergence<S, Setup, Step, HashFn>(
    setup: Setup,
    turns: u64,
    step: Step,
    hash: HashFn,
) -> Option<u64>
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut first = setup();
    let mut second = setup();

    if hash(&first) != hash(&second) {
        return Some(0);
    }

    for turn in 1..=turns {
        step(&mut first);
        step(&mut second);

        if hash(&first) != hash(&second) {
            return Some(turn);
        }
    }

    None
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for item tests.
///
/// These strategies generate random but reproducible inputs for
/// property-based testing of placement and snapshot encoding.
pub mod strategies {
    use arena_core::item::{ItemKind, ItemSetup};
    use arena_core::lifecycle::ItemState;
    use arena_core::math::Point;
    use arena_core::rules::FieldRules;
    use arena_core::snapshot::ItemSnapshot;
    use proptest::prelude::*;

    /// Generate field rules between one item and 4000 units per side.
    pub fn arb_rules() -> impl Strategy<Value = FieldRules> {
        (36u32..4000u32, 36u32..4000u32).prop_map(|(w, h)| FieldRules::new(w, h))
    }

    /// Generate a point on a field of up to 4000x4000.
    pub fn arb_point() -> impl Strategy<Value = Point> {
        (0.0..4000.0f64, 0.0..4000.0f64).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Generate an item kind.
    pub fn arb_kind() -> impl Strategy<Value = ItemKind> {
        prop_oneof![Just(ItemKind::Pickup), Just(ItemKind::Powerup)]
    }

    /// Generate any lifecycle state.
    pub fn arb_state() -> impl Strategy<Value = ItemState> {
        proptest::sample::select(ItemState::ALL.to_vec())
    }

    /// Generate reward values, including one-shot respawn times.
    pub fn arb_reward() -> impl Strategy<Value = f64> {
        prop_oneof![Just(0.0), -50.0..500.0f64]
    }

    /// Generate per-item overrides.
    pub fn arb_item_setup() -> impl Strategy<Value = ItemSetup> {
        (
            proptest::option::of(arb_point()),
            proptest::option::of(arb_reward()),
            proptest::option::of(arb_reward()),
            proptest::option::of(any::<u32>()),
        )
            .prop_map(|(position, energy_bonus, respawn_time, color)| ItemSetup {
                position,
                energy_bonus,
                respawn_time,
                color,
            })
    }

    /// Generate a consistent snapshot: the victim is only set in
    /// `HitVictim` and the display position equals the logical position.
    pub fn arb_snapshot() -> impl Strategy<Value = ItemSnapshot> {
        (
            any::<u32>(),
            arb_kind(),
            arb_state(),
            arb_point(),
            arb_reward(),
            arb_reward(),
            proptest::option::of(any::<u32>()),
            0u32..10_000,
            0usize..64,
        )
            .prop_map(
                |(id, kind, state, position, energy_bonus, respawn_time, color, turn_counter, victim)| {
                    ItemSnapshot {
                        id,
                        kind,
                        state,
                        position,
                        paint_position: position,
                        energy_bonus,
                        respawn_time,
                        color: color.unwrap_or_else(|| kind.default_color()),
                        turn_counter,
                        victim: (state == ItemState::HitVictim).then_some(victim),
                    }
                },
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::field::ItemField;
    use arena_core::item::{ItemKind, ItemSetup};

    use crate::fixtures::{edge_roster, populated_field, standard_config, TestCombatant};

    type Scenario = (ItemField, Vec<Option<TestCombatant>>);

    fn scenario() -> Scenario {
        (populated_field(standard_config(), 4, 2), edge_roster(4))
    }

    fn step(state: &mut Scenario) {
        let (field, roster) = state;
        field.update_all(roster, false);
    }

    fn hash(state: &Scenario) -> u64 {
        state.0.state_hash()
    }

    #[test]
    fn test_field_is_deterministic() {
        let result = verify_determinism(3, 250, scenario, step, hash);
        result.assert_deterministic();
        assert_eq!(result.unique_hashes().len(), 1);
        assert_eq!(result.turns, 250);
    }

    #[test]
    fn test_no_divergence() {
        assert_eq!(find_first_divergence(scenario, 100, step, hash), None);
    }

    #[test]
    fn test_divergence_found() {
        use std::cell::Cell;

        let calls = Cell::new(0u32);
        let setup = || {
            calls.set(calls.get() + 1);
            let mut field = ItemField::new(standard_config());
            if calls.get() == 2 {
                field.spawn(ItemKind::Pickup, &ItemSetup::at(400.0, 300.0)).unwrap();
            }
            (field, edge_roster(1))
        };
        assert_eq!(find_first_divergence(setup, 10, step, hash), Some(0));
    }

    #[test]
    fn test_compute_hash_stable() {
        assert_eq!(compute_hash(&(1u32, "a")), compute_hash(&(1u32, "a")));
        assert_ne!(compute_hash(&1u32), compute_hash(&2u32));
    }

    #[test]
    #[should_panic(expected = "non-deterministic")]
    fn test_assert_reports_mismatch() {
        DeterminismResult {
            is_deterministic: false,
            hashes: vec![1, 2],
            turns: 1,
        }
        .assert_deterministic();
    }

    mod props {
        use super::super::strategies::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn snapshot_victim_only_when_hit(snapshot in arb_snapshot()) {
                prop_assert_eq!(
                    snapshot.victim.is_some(),
                    snapshot.state == arena_core::lifecycle::ItemState::HitVictim
                );
            }

            #[test]
            fn rules_fit_one_item(rules in arb_rules()) {
                prop_assert!(rules.width() >= 36 && rules.height() >= 36);
            }
        }
    }
}
