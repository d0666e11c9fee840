use fabwatch_core::{FabError, FabricSpec, Result, WastageModel};
use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `fabwatch.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FabConfig {
    /// Signal generator and history window settings.
    pub simulator: SimulatorConfig,
    /// Default fabric parameters shown in the input panel.
    pub fabric: FabricSpec,
    /// Panel rendering settings.
    pub display: DisplayConfig,
    /// Text-generation service settings.
    pub insight: InsightConfig,
    /// CSV export settings.
    pub report: ReportConfig,
}

impl FabConfig {
    /// Reject values that would break the simulator's invariants.
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulator;
        if sim.history_capacity == 0 {
            return Err(FabError::Config("simulator.history_capacity must be at least 1".into()));
        }
        if sim.interval_ms == 0 {
            return Err(FabError::Config("simulator.interval_ms must be at least 1".into()));
        }
        if !sim.wastage_step_kg.is_finite() || sim.wastage_step_kg <= 0.0 {
            return Err(FabError::Config("simulator.wastage_step_kg must be positive".into()));
        }
        if !sim.baseline_mass_kg.is_finite() || sim.baseline_mass_kg <= 0.0 {
            return Err(FabError::Config("simulator.baseline_mass_kg must be positive".into()));
        }
        if !sim.hole_inflation.is_finite() || sim.hole_inflation < 0.0 {
            return Err(FabError::Config(
                "simulator.hole_inflation must be a finite, non-negative number".into(),
            ));
        }
        for (name, value) in [
            ("hole_threshold", sim.hole_threshold),
            ("line_threshold", sim.line_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(FabError::Config(format!("simulator.{name} must be within [0, 1]")));
            }
        }
        if self.insight.max_attempts == 0 {
            return Err(FabError::Config("insight.max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

/// Signal generator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Tick period in milliseconds.
    pub interval_ms: u64,
    /// A hole is detected when the first draw is strictly above this.
    pub hole_threshold: f64,
    /// A sewing line is detected when the second draw is strictly above this.
    pub line_threshold: f64,
    /// Wastage added every tick (kg).
    pub wastage_step_kg: f64,
    /// Baseline mass `K` of the wastage formula (kg).
    pub baseline_mass_kg: f64,
    /// Per-hole inflation `c` of the wastage formula.
    pub hole_inflation: f64,
    /// Number of samples kept in the rolling history.
    pub history_capacity: usize,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when unset.
    pub seed: Option<u64>,
    /// Counters at process start.
    pub initial: InitialSample,
}

impl SimulatorConfig {
    pub fn wastage_model(&self) -> WastageModel {
        WastageModel {
            baseline_mass_kg: self.baseline_mass_kg,
            hole_inflation:   self.hole_inflation,
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            interval_ms:      1_000,
            hole_threshold:   0.9,
            line_threshold:   0.95,
            wastage_step_kg:  0.0005,
            baseline_mass_kg: 10.0,
            hole_inflation:   0.01,
            history_capacity: 50,
            seed:             None,
            initial:          InitialSample::default(),
        }
    }
}

/// Starting counters of the simulated line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialSample {
    pub holes:        u64,
    pub sewing_lines: u64,
    pub wastage_kg:   f64,
}

impl Default for InitialSample {
    fn default() -> Self {
        Self {
            holes:        8,
            sewing_lines: 2,
            wastage_kg:   0.125,
        }
    }
}

/// Panel rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// How many recent samples the wastage trend shows.
    pub chart_points: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { chart_points: 30 }
    }
}

/// Text-generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Base URL of the generative-language API.
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Total attempts per request (1 = no retry).
    pub max_attempts: u32,
    /// Linear backoff step between attempts.
    pub retry_backoff_ms: u64,
    /// Wastage percentage the summary prompt treats as critical.
    pub critical_wastage_percent: f64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            endpoint:                 "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model:                    "gemini-2.5-flash".to_string(),
            api_key_env:              "API_KEY".to_string(),
            max_output_tokens:        150,
            temperature:              0.7,
            timeout_secs:             15,
            max_attempts:             2,
            retry_backoff_ms:         500,
            critical_wastage_percent: 5.0,
        }
    }
}

/// CSV export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory reports are written into.
    pub directory: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
        }
    }
}
