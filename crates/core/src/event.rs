use crate::state::TelemetryUpdate;

/// All messages (events) that can flow through the application event bus.
///
/// Sources:
/// - Monitor task          → `Telemetry`
/// - Config watcher task   → `ConfigReloaded`
/// - Console input         → user actions
/// - Insight tasks         → `InsightReady`, `AnomalyReady`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Monitor ───────────────────────────────────────────────────────────────
    /// Fresh sample plus history snapshot from the monitor task.
    Telemetry(TelemetryUpdate),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live reload.
    ConfigReloaded,

    // ── User actions ──────────────────────────────────────────────────────────
    /// Resume sample emission.
    StartRequested,
    /// Pause sample emission.
    StopRequested,
    /// Flip between running and stopped.
    ToggleRequested,
    /// Write a CSV report for the current sample.
    ReportRequested,
    /// Ask the text-generation service for a quality summary.
    InsightRequested,
    /// Ask the text-generation service whether the current wastage is anomalous.
    AnomalyRequested,
    /// New fabric areal density (g/m²).
    GsmChanged(f64),
    /// New fabric width (inches).
    WidthChanged(f64),
    /// Print every panel.
    StatusRequested,
    HelpRequested,
    /// Console input that could not be understood.
    InvalidCommand(String),

    // ── Insight results ───────────────────────────────────────────────────────
    /// Summary text (or fallback message) from the text-generation service.
    InsightReady(String),
    AnomalyReady(AnomalyVerdict),

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Graceful shutdown requested.
    Shutdown,
}

/// Structured anomaly judgement for a wastage percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyVerdict {
    pub is_anomaly: bool,
    pub reason:     String,
}

impl AnomalyVerdict {
    /// Conservative default used whenever the service reply can't be trusted.
    pub fn not_anomalous(reason: impl Into<String>) -> Self {
        Self {
            is_anomaly: false,
            reason:     reason.into(),
        }
    }
}
