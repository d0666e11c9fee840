use chrono::{DateTime, TimeDelta, Utc};
use fabwatch_core::{Sample, WastageModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Pseudo-random draws from a seedable [`StdRng`].
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    draws: Vec<f64>,
    next:  usize,
}

impl SequenceRandom {
    /// An empty list behaves like a constant `0.0`.
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, next: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.next % self.draws.len()];
        self.next = self.next.wrapping_add(1);
        draw
    }
}

/// Fixed constants of the emission rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorParams {
    /// Hole detected when the first draw is strictly greater.
    pub hole_threshold: f64,
    /// Sewing line detected when the second draw is strictly greater.
    pub line_threshold: f64,
    /// Wastage added unconditionally every tick (kg).
    pub wastage_step_kg: f64,
    pub model: WastageModel,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            hole_threshold:  0.9,
            line_threshold:  0.95,
            wastage_step_kg: 0.0005,
            model:           WastageModel::default(),
        }
    }
}

/// Produce the sample that follows `previous`.
///
/// Draws exactly two values: the first decides a new hole, the second a new
/// sewing line. `captured_at` is `now`, nudged forward by a millisecond if the
/// clock has not moved past the previous sample.
pub fn tick<R>(
    previous: &Sample,
    params: &GeneratorParams,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Sample
where
    R: RandomSource + ?Sized,
{
    let hole_draw = rng.next_unit();
    let line_draw = rng.next_unit();

    let holes = previous.hole_count() + u64::from(hole_draw > params.hole_threshold);
    let lines = previous.sewing_line_count() + u64::from(line_draw > params.line_threshold);
    let wastage = previous.cumulative_wastage_kg() + params.wastage_step_kg;

    let floor = previous.captured_at() + TimeDelta::milliseconds(1);
    let captured_at = now.max(floor);

    Sample::new(holes, lines, wastage, captured_at, &params.model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Sample {
        Sample::new(8, 2, 0.125, Utc::now(), &WastageModel::default())
    }

    #[test]
    fn quiet_tick_only_accumulates_wastage() {
        let prev = reference();
        let mut rng = SequenceRandom::new(vec![0.5, 0.5]);
        let next = tick(&prev, &GeneratorParams::default(), &mut rng, Utc::now());

        assert_eq!(next.hole_count(), 8);
        assert_eq!(next.sewing_line_count(), 2);
        assert!((next.cumulative_wastage_kg() - 0.1255).abs() < 1e-12);
        let expected = (0.1255 / 10.1255) * 100.0 * 1.08;
        assert!((next.wastage_percentage() - expected).abs() < 1e-9);
        assert!((next.wastage_percentage() - 1.339).abs() < 1e-3);
    }

    #[test]
    fn both_counters_can_step_together() {
        let prev = reference();
        let mut rng = SequenceRandom::new(vec![0.95, 0.99]);
        let next = tick(&prev, &GeneratorParams::default(), &mut rng, Utc::now());

        assert_eq!(next.hole_count(), 9);
        assert_eq!(next.sewing_line_count(), 3);
    }

    #[test]
    fn threshold_comparison_is_strict() {
        let prev = reference();
        let mut rng = SequenceRandom::new(vec![0.9, 0.95]);
        let next = tick(&prev, &GeneratorParams::default(), &mut rng, Utc::now());

        assert_eq!(next.hole_count(), 8);
        assert_eq!(next.sewing_line_count(), 2);
    }

    #[test]
    fn draws_are_independent() {
        let prev = reference();
        let mut rng = SequenceRandom::new(vec![0.1, 0.96]);
        let next = tick(&prev, &GeneratorParams::default(), &mut rng, Utc::now());

        assert_eq!(next.hole_count(), 8);
        assert_eq!(next.sewing_line_count(), 3);
    }

    #[test]
    fn timestamps_strictly_increase_under_stalled_clock() {
        let frozen = Utc::now();
        let params = GeneratorParams::default();
        let mut rng = SequenceRandom::new(vec![0.0]);
        let mut prev = Sample::new(0, 0, 0.0, frozen, &params.model);

        for _ in 0..10 {
            let next = tick(&prev, &params, &mut rng, frozen);
            assert!(next.captured_at() > prev.captured_at());
            prev = next;
        }
    }

    #[test]
    fn seeded_run_respects_step_invariants() {
        let params = GeneratorParams::default();
        let mut rng = StdRandom::seeded(42);
        let mut prev = reference();

        for _ in 0..5_000 {
            let next = tick(&prev, &params, &mut rng, Utc::now());

            let dh = next.hole_count() - prev.hole_count();
            let dl = next.sewing_line_count() - prev.sewing_line_count();
            assert!(dh <= 1 && dl <= 1);

            let dw = next.cumulative_wastage_kg() - prev.cumulative_wastage_kg();
            assert!((dw - params.wastage_step_kg).abs() < 1e-9);

            let pct = next.wastage_percentage();
            assert!((0.0..=100.0).contains(&pct));
            prev = next;
        }
    }

    #[test]
    fn thread_random_stays_in_unit_interval() {
        let mut rng = StdRandom::new();
        for _ in 0..1_000 {
            let draw = rng.next_unit();
            assert!((0.0..1.0).contains(&draw));
        }
    }

    #[test]
    fn sequence_random_wraps() {
        let mut rng = SequenceRandom::new(vec![0.1, 0.2]);
        let draws: Vec<f64> = (0..5).map(|_| rng.next_unit()).collect();
        assert_eq!(draws, vec![0.1, 0.2, 0.1, 0.2, 0.1]);
    }
}
