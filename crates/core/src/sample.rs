use chrono::{DateTime, Utc};

/// Parameters of the wastage-percentage formula.
///
/// `pct = min(100, w / (w + K) * 100 * (1 + holes * c))`
///
/// The per-hole inflation term `c` is a heuristic with no material model
/// behind it; it is kept exactly as-is so historical reports stay comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WastageModel {
    /// Baseline fabric mass `K` in kilograms.
    pub baseline_mass_kg: f64,
    /// Multiplicative inflation `c` applied per detected hole.
    pub hole_inflation: f64,
}

impl Default for WastageModel {
    fn default() -> Self {
        Self {
            baseline_mass_kg: 10.0,
            hole_inflation:   0.01,
        }
    }
}

/// Derive the wastage percentage from cumulative wastage and hole count.
///
/// Saturates at exactly `100.0`. Negative or non-finite inputs, including a
/// non-finite model, yield `0.0`.
#[must_use]
pub fn wastage_percentage(cumulative_wastage_kg: f64, hole_count: u64, model: &WastageModel) -> f64 {
    let inputs_finite = cumulative_wastage_kg.is_finite()
        && model.baseline_mass_kg.is_finite()
        && model.hole_inflation.is_finite();
    let denominator = cumulative_wastage_kg + model.baseline_mass_kg;
    if !inputs_finite || cumulative_wastage_kg <= 0.0 || denominator <= 0.0 {
        return 0.0;
    }

    let share = cumulative_wastage_kg / denominator * 100.0;
    let pct = share * (1.0 + hole_count as f64 * model.hole_inflation);
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        100.0
    }
}

/// One immutable reading of defect counts and wastage at a point in time.
///
/// `wastage_percentage` is computed at construction and cannot be set
/// independently of the counters it is derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    hole_count:            u64,
    sewing_line_count:     u64,
    cumulative_wastage_kg: f64,
    wastage_percentage:    f64,
    captured_at:           DateTime<Utc>,
}

impl Sample {
    pub fn new(
        hole_count: u64,
        sewing_line_count: u64,
        cumulative_wastage_kg: f64,
        captured_at: DateTime<Utc>,
        model: &WastageModel,
    ) -> Self {
        let cumulative_wastage_kg = cumulative_wastage_kg.max(0.0);
        Self {
            hole_count,
            sewing_line_count,
            cumulative_wastage_kg,
            wastage_percentage: wastage_percentage(cumulative_wastage_kg, hole_count, model),
            captured_at,
        }
    }

    pub fn hole_count(&self) -> u64 {
        self.hole_count
    }

    pub fn sewing_line_count(&self) -> u64 {
        self.sewing_line_count
    }

    pub fn cumulative_wastage_kg(&self) -> f64 {
        self.cumulative_wastage_kg
    }

    /// Wastage as a percentage in `[0, 100]`.
    pub fn wastage_percentage(&self) -> f64 {
        self.wastage_percentage
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}
