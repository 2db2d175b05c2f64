//! Headless demo battles.
//!
//! Runs an [`ItemField`] against a roster of simple seekers that walk toward
//! the nearest collectible item, recording every turn. There is no combat;
//! the battle exists to exercise the item lifecycle end to end.

use arena_core::codec::EncodeOptions;
use arena_core::collision::{Combatant, ItemEvent};
use arena_core::field::ItemField;
use arena_core::item::{ItemKind, ItemSetup};
use arena_core::math::{BoundingBox, Point};
use arena_core::recording::BattleRecording;
use arena_core::rules::{ArenaConfig, FieldRules};

/// Side length of a seeker's bounding box.
pub const SEEKER_SIZE: f64 = 36.0;

/// Parameters of a demo battle.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    /// Turns per round.
    pub turns_per_round: u32,
    /// Last turns of each round during which respawns are blocked.
    pub freeze_turns: u32,
    /// Number of seekers on the roster.
    pub seekers: usize,
    /// Seeker speed in units per turn.
    pub seeker_speed: f64,
    /// Randomly placed pickups.
    pub pickups: usize,
    /// Powerups, placed on equally distributed points.
    pub powerups: usize,
    /// Encoder settings for the recording.
    pub encode: EncodeOptions,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            turns_per_round: 500,
            freeze_turns: 20,
            seekers: 4,
            seeker_speed: 8.0,
            pickups: 6,
            powerups: 3,
            encode: EncodeOptions::default(),
        }
    }
}

/// Demo combatant that walks toward items.
#[derive(Debug, Clone, PartialEq)]
pub struct Seeker {
    name: String,
    center: Point,
    speed: f64,
    energy: f64,
    powerup_events: usize,
    messages: Vec<String>,
}

impl Seeker {
    /// Create a seeker at `center`.
    #[must_use]
    pub fn new(name: String, center: Point, speed: f64) -> Self {
        Self {
            name,
            center,
            speed,
            energy: 100.0,
            powerup_events: 0,
            messages: Vec::new(),
        }
    }

    /// Current position.
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Current energy.
    #[must_use]
    pub const fn energy(&self) -> f64 {
        self.energy
    }

    /// Powerup announcements received.
    #[must_use]
    pub const fn powerup_events(&self) -> usize {
        self.powerup_events
    }

    /// Diagnostic lines printed to this seeker.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Step toward the nearest active item, staying inside the field.
    fn seek(&mut self, field: &ItemField) {
        let nearest = field
            .items()
            .iter()
            .filter(|item| item.is_active())
            .map(|item| item.position())
            .min_by(|a, b| {
                a.distance_squared(self.center)
                    .total_cmp(&b.distance_squared(self.center))
            });
        let Some(target) = nearest else {
            return;
        };

        let distance = target.distance_squared(self.center).sqrt();
        if distance <= f64::EPSILON {
            return;
        }
        let delta = target - self.center;
        let scale = self.speed.min(distance) / distance;
        let next = self.center + Point::new(delta.x * scale, delta.y * scale);
        self.center = clamp_to_field(next, field.rules());
    }
}

impl Combatant for Seeker {
    fn name(&self) -> &str {
        &self.name
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::centered(self.center, SEEKER_SIZE, SEEKER_SIZE)
    }

    fn is_alive(&self) -> bool {
        self.energy > 0.0
    }

    fn add_energy(&mut self, amount: f64) {
        self.energy += amount;
    }

    fn push_event(&mut self, event: ItemEvent) {
        match event {
            ItemEvent::Powerup(_) => self.powerup_events += 1,
        }
    }

    fn print_line(&mut self, message: String) {
        self.messages.push(message);
    }
}

fn clamp_to_field(point: Point, rules: &FieldRules) -> Point {
    let half = SEEKER_SIZE / 2.0;
    Point::new(
        point.x.clamp(half, f64::from(rules.width()) - half),
        point.y.clamp(half, f64::from(rules.height()) - half),
    )
}

/// Seekers start evenly spaced along the field's top edge.
fn starting_roster(settings: &SimulationSettings, rules: &FieldRules) -> Vec<Option<Seeker>> {
    #[allow(clippy::cast_precision_loss)]
    let spacing = f64::from(rules.width()) / (settings.seekers as f64 + 1.0);
    (0..settings.seekers)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = spacing * (i as f64 + 1.0);
            let start = clamp_to_field(Point::new(x, 0.0), rules);
            Some(Seeker::new(format!("seeker{i}"), start, settings.seeker_speed))
        })
        .collect()
}

/// Outcome of a demo battle.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Every recorded turn.
    pub recording: BattleRecording,
    /// Roster at the end of the battle.
    pub roster: Vec<Option<Seeker>>,
    /// Hash of the final item state.
    pub final_hash: u64,
}

/// Run a demo battle.
#[must_use]
pub fn run_battle(config: ArenaConfig, settings: &SimulationSettings) -> SimulationReport {
    let rules = config.rules;
    let mut recording = BattleRecording::new(config.seed, rules, settings.encode);
    let mut field = ItemField::new(config);

    for _ in 0..settings.pickups {
        if let Err(e) = field.spawn(ItemKind::Pickup, &ItemSetup::default()) {
            tracing::warn!("{e}");
            break;
        }
    }
    if let Err(e) = field.spawn_distributed(ItemKind::Powerup, settings.powerups) {
        tracing::warn!("{e}");
    }

    let mut roster = starting_roster(settings, &rules);
    let freeze_from = settings
        .turns_per_round
        .saturating_sub(settings.freeze_turns);

    for round in 0..rules.num_rounds() {
        field.initialize_round();
        tracing::info!(round, items = field.len(), "Round started");

        for turn in 0..settings.turns_per_round {
            for seeker in roster.iter_mut().flatten() {
                seeker.seek(&field);
            }
            field.update_all(&mut roster, turn >= freeze_from);
            recording.record_turn(round, turn, &field.capture_all(&roster));
        }

        field.cleanup_after_round_ended();
        field.drop_retired();
        tracing::debug!(round, state_hash = field.state_hash(), "Round ended");
    }

    SimulationReport {
        final_hash: field.state_hash(),
        recording,
        roster,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_settings() -> SimulationSettings {
        SimulationSettings {
            turns_per_round: 120,
            freeze_turns: 10,
            seekers: 3,
            pickups: 3,
            powerups: 2,
            ..SimulationSettings::default()
        }
    }

    fn small_config() -> ArenaConfig {
        ArenaConfig {
            rules: FieldRules::new(400, 300).with_num_rounds(2),
            ..ArenaConfig::default()
        }
    }

    #[test]
    fn test_records_every_turn() {
        let report = run_battle(small_config(), &small_settings());
        assert_eq!(report.recording.turn_count(), 240);
        assert_eq!(report.recording.turns_in_round(1).len(), 120);
        assert!(report.recording.turns.iter().all(|t| t.items.len() == 5));
    }

    #[test]
    fn test_seekers_collect_items() {
        let report = run_battle(small_config(), &small_settings());
        let gained: f64 = report
            .roster
            .iter()
            .flatten()
            .map(|s| s.energy() - 100.0)
            .sum();
        assert!(gained > 0.0, "seekers should reach at least one item");
    }

    #[test]
    fn test_battle_is_reproducible() {
        let first = run_battle(small_config(), &small_settings());
        let second = run_battle(small_config(), &small_settings());
        assert_eq!(first.final_hash, second.final_hash);
        assert_eq!(first.recording, second.recording);
    }

    #[test]
    fn test_seeker_moves_toward_item() {
        let mut field = ItemField::new(small_config());
        field.spawn(ItemKind::Pickup, &ItemSetup::at(200.0, 150.0)).unwrap();
        let mut seeker = Seeker::new("s".to_string(), Point::new(200.0, 50.0), 10.0);
        seeker.seek(&field);
        assert_eq!(seeker.center(), Point::new(200.0, 60.0));
    }

    #[test]
    fn test_seeker_stays_in_field() {
        let rules = FieldRules::new(400, 300);
        let clamped = clamp_to_field(Point::new(-50.0, 900.0), &rules);
        assert_eq!(clamped, Point::new(18.0, 282.0));
    }
}
