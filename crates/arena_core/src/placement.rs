//! Item placement on the battlefield.
//!
//! Two strategies are provided:
//! - [`PlacementGenerator::random_position`] averages several uniform draws per
//!   axis, which biases positions toward the field center (law of large
//!   numbers). More samples compress the spread further.
//! - [`PlacementGenerator::equally_distributed_points`] puts `n` points on a
//!   shuffled diagonal grid: one per column band and one per row band.
//!
//! # Determinism
//!
//! The generator owns its random source. Two generators created with the same
//! seed and driven by the same call sequence return identical positions, which
//! is what recorded battles rely on for replay.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::math::Point;
use crate::rules::FieldRules;

/// Candidates drawn, the first included, before accepting a crowded one.
pub const MAX_PLACEMENT_RETRIES: u32 = 100;

/// Computes item positions for one battle.
#[derive(Debug, Clone)]
pub struct PlacementGenerator<R = StdRng> {
    rules: FieldRules,
    rng: R,
}

impl PlacementGenerator<StdRng> {
    /// Create a generator with a seeded standard random source.
    #[must_use]
    pub fn seeded(rules: FieldRules, seed: u64) -> Self {
        Self::with_rng(rules, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PlacementGenerator<R> {
    /// Create a generator around an existing random source.
    pub fn with_rng(rules: FieldRules, rng: R) -> Self {
        Self { rules, rng }
    }

    /// Rules the generator places against.
    #[must_use]
    pub const fn rules(&self) -> &FieldRules {
        &self.rules
    }

    /// Pick a center-biased random position.
    ///
    /// The result lies within `[min_size / 2, dimension - min_size / 2]` on both
    /// axes. When `avoid` is non-empty, candidates closer than `min_size` to any
    /// avoided point on either axis are redrawn. At most
    /// [`MAX_PLACEMENT_RETRIES`] candidates are drawn in total; the last one
    /// is returned even if it still crowds a neighbour.
    pub fn random_position(&mut self, min_size: f64, sample_count: u32, avoid: &[Point]) -> Point {
        let mut candidate = self.draw_candidate(min_size, sample_count);
        let mut attempts = 1;

        while avoid.iter().any(|p| candidate.crowds(*p, min_size)) {
            if attempts >= MAX_PLACEMENT_RETRIES {
                tracing::warn!(
                    x = candidate.x,
                    y = candidate.y,
                    avoided = avoid.len(),
                    "Placement retries exhausted, accepting crowded position"
                );
                break;
            }
            attempts += 1;
            candidate = self.draw_candidate(min_size, sample_count);
        }

        candidate
    }

    fn draw_candidate(&mut self, min_size: f64, sample_count: u32) -> Point {
        let samples = sample_count.max(1);
        let mut rnd_x = 0.0;
        let mut rnd_y = 0.0;
        for _ in 0..samples {
            rnd_x += self.rng.random::<f64>();
            rnd_y += self.rng.random::<f64>();
        }
        rnd_x /= f64::from(samples);
        rnd_y /= f64::from(samples);

        let width = f64::from(self.rules.width());
        let height = f64::from(self.rules.height());
        Point::new(
            min_size / 2.0 + rnd_x * (width - min_size),
            min_size / 2.0 + rnd_y * (height - min_size),
        )
    }

    /// Spread `n` points one per column band and one per row band.
    ///
    /// Width and height are cut into `n + 1` equal steps; the `n` interior step
    /// boundaries on each axis are shuffled independently (X first, then Y) and
    /// paired by position. Returns an empty list for `n == 0`.
    pub fn equally_distributed_points(&mut self, n: usize) -> Vec<Point> {
        if n < 1 {
            return Vec::new();
        }

        let step_x = f64::from(self.rules.width()) / (n + 1) as f64;
        let step_y = f64::from(self.rules.height()) / (n + 1) as f64;

        let mut xs: Vec<f64> = (1..=n).map(|i| step_x * i as f64).collect();
        let mut ys: Vec<f64> = (1..=n).map(|i| step_y * i as f64).collect();
        xs.shuffle(&mut self.rng);
        ys.shuffle(&mut self.rng);

        xs.into_iter()
            .zip(ys)
            .map(|(x, y)| Point::new(x, y))
            .collect()
    }
}
