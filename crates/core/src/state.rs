use crate::event::AnomalyVerdict;
use crate::sample::{Sample, WastageModel};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Central application state. All panels read from this snapshot.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Most recently published sample.
    pub current: Sample,
    /// Read-only copy of the rolling history, oldest first.
    pub history: Vec<Sample>,
    /// Operator-entered fabric parameters.
    pub fabric: FabricSpec,
    /// Whether the simulator is currently emitting samples.
    pub running: bool,
    /// Last natural-language summary (or fallback message).
    pub insight: Option<String>,
    /// Last anomaly judgement.
    pub anomaly: Option<AnomalyVerdict>,
}

impl AppState {
    pub fn new(current: Sample, fabric: FabricSpec) -> Self {
        Self {
            current,
            history: Vec::new(),
            fabric,
            running: false,
            insight: None,
            anomaly: None,
        }
    }

    /// Replace the current sample and history with a fresh update.
    pub fn apply(&mut self, update: TelemetryUpdate) {
        self.current = update.current;
        self.history = update.history;
    }

    /// The last `limit` history entries, oldest first.
    pub fn recent(&self, limit: usize) -> &[Sample] {
        let start = self.history.len().saturating_sub(limit);
        &self.history[start..]
    }
}

impl Default for AppState {
    fn default() -> Self {
        let initial = Sample::new(8, 2, 0.125, Utc::now(), &WastageModel::default());
        Self::new(initial, FabricSpec::default())
    }
}

/// Fabric parameters entered by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FabricSpec {
    /// Areal density in grams per square metre.
    pub gsm: f64,
    /// Fabric width in inches.
    pub width_in: f64,
}

impl Default for FabricSpec {
    fn default() -> Self {
        Self {
            gsm:      180.0,
            width_in: 60.0,
        }
    }
}

/// What the monitor publishes after every applied tick.
#[derive(Debug, Clone)]
pub struct TelemetryUpdate {
    pub current: Sample,
    pub history: Vec<Sample>,
}
