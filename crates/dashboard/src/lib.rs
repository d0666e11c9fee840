//! Terminal front-end for `fabwatch`.
//!
//! Owns the event loop and wires together all background tasks:
//! - Monitor task (simulated inspection samples, rolling history)
//! - Config file watcher (live reload on change)
//! - Console reader (operator commands on stdin)
//! - Insight tasks (one per AI request, results flow back as messages)

pub mod commands;
pub mod export;

use chrono::Utc;
use fabwatch_config::{load as load_config, FabConfig};
use fabwatch_core::{AnomalyVerdict, AppState, Message, Result, Sample};
use fabwatch_insight::{GeminiClient, InsightService, TextGenerator};
use fabwatch_monitor::{spawn_monitor, GeneratorParams, Monitor, MonitorHandle, StdRandom};
use fabwatch_widgets::{ControlsWidget, FeedHeaderWidget, InputWidget, MetricsWidget};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run the dashboard until the operator quits or Ctrl-C is pressed.
pub async fn run(config_path: PathBuf) -> Result<()> {
    let config = load_config(&config_path).unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        FabConfig::default()
    });

    let monitor = build_monitor(&config);
    let interval = Duration::from_millis(config.simulator.interval_ms);
    let rng = match config.simulator.seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::new(),
    };
    let initial = monitor.current().clone();
    let (handle, mut telemetry) = spawn_monitor(monitor, interval, rng);

    let insight = InsightService::new(GeminiClient::from_config(&config.insight)?, &config.insight);
    let (results_tx, mut results) = mpsc::channel(8);

    let (_watcher, mut reloads) = fabwatch_config::ConfigWatcher::spawn(&config_path);
    let mut console = spawn_console();

    let mut dashboard = Dashboard::new(config, config_path, initial, handle, insight, results_tx);
    // The line starts running, as the physical inspection rig does on power-up.
    dashboard.update(Message::StartRequested).await;
    dashboard.print(commands::HELP);

    loop {
        let msg = tokio::select! {
            Some(update) = telemetry.recv() => Message::Telemetry(update),
            Some(()) = reloads.recv() => Message::ConfigReloaded,
            Some(msg) = console.recv() => msg,
            Some(msg) = results.recv() => msg,
            _ = tokio::signal::ctrl_c() => Message::Shutdown,
        };

        if !dashboard.update(msg).await {
            break;
        }
    }

    info!("Dashboard stopped");
    Ok(())
}

/// Build a stopped monitor from the `[simulator]` section.
pub fn build_monitor(config: &FabConfig) -> Monitor {
    let sim = &config.simulator;
    let params = GeneratorParams {
        hole_threshold:  sim.hole_threshold,
        line_threshold:  sim.line_threshold,
        wastage_step_kg: sim.wastage_step_kg,
        model:           sim.wastage_model(),
    };
    let initial = Sample::new(
        sim.initial.holes,
        sim.initial.sewing_lines,
        sim.initial.wastage_kg,
        Utc::now(),
        &params.model,
    );
    Monitor::new(initial, params, sim.history_capacity)
}

/// Read operator commands from stdin. EOF just ends the reader; the
/// dashboard keeps running until Ctrl-C or `quit`.
fn spawn_console() -> mpsc::Receiver<Message> {
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(msg) = commands::parse_command(&line) {
                        if tx.send(msg).await.is_err() {
                            break;
                        }
                    }
                }
                Ok(None) => {
                    debug!("stdin closed; console input disabled");
                    break;
                }
                Err(e) => {
                    warn!("Cannot read console input: {e}");
                    break;
                }
            }
        }
    });

    rx
}

// ── State ─────────────────────────────────────────────────────────────────────

/// Owns the read-side state and reacts to every [`Message`].
pub struct Dashboard<G> {
    state:       AppState,
    config:      FabConfig,
    config_path: PathBuf,
    monitor:     MonitorHandle,
    insight:     Arc<InsightService<G>>,
    results:     mpsc::Sender<Message>,
    feed:        FeedHeaderWidget,
    metrics:     MetricsWidget,
    input:       InputWidget,
    controls:    ControlsWidget,
}

impl<G> Dashboard<G>
where
    G: TextGenerator + Clone + Send + Sync + 'static,
{
    pub fn new(
        config: FabConfig,
        config_path: PathBuf,
        initial: Sample,
        monitor: MonitorHandle,
        insight: InsightService<G>,
        results: mpsc::Sender<Message>,
    ) -> Self {
        let state = AppState::new(initial, config.fabric);
        let metrics = MetricsWidget::new(config.display.chart_points);
        Self {
            state,
            config,
            config_path,
            monitor,
            insight: Arc::new(insight),
            results,
            feed: FeedHeaderWidget::new(),
            metrics,
            input: InputWidget::new(),
            controls: ControlsWidget::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    // ── Update ────────────────────────────────────────────────────────────────

    /// Apply one message. Returns `false` once the dashboard should exit.
    pub async fn update(&mut self, msg: Message) -> bool {
        match msg {
            Message::Telemetry(update) => {
                self.state.apply(update);
                self.print(&self.metrics.view(&self.state));
            }
            Message::ConfigReloaded => self.reload_config(),
            Message::StartRequested => self.set_running(true).await,
            Message::StopRequested => self.set_running(false).await,
            Message::ToggleRequested => self.set_running(!self.state.running).await,
            Message::ReportRequested => self.export_report(),
            Message::InsightRequested => self.request_insight(),
            Message::AnomalyRequested => self.request_anomaly(),
            Message::GsmChanged(gsm) => {
                if self.inputs_unlocked() {
                    self.state.fabric.gsm = gsm;
                    self.print(&self.input.view(&self.state));
                }
            }
            Message::WidthChanged(width) => {
                if self.inputs_unlocked() {
                    self.state.fabric.width_in = width;
                    self.print(&self.input.view(&self.state));
                }
            }
            Message::StatusRequested => self.print(&self.status()),
            Message::HelpRequested => self.print(commands::HELP),
            Message::InvalidCommand(reason) => self.print(&format!("? {reason}")),
            Message::InsightReady(text) => {
                self.print(&format!("AI INSIGHT: {text}"));
                self.state.insight = Some(text);
            }
            Message::AnomalyReady(verdict) => {
                self.print(&anomaly_line(&verdict));
                self.state.anomaly = Some(verdict);
            }
            Message::Shutdown => {
                self.monitor.stop().await;
                return false;
            }
        }
        true
    }

    async fn set_running(&mut self, running: bool) {
        if self.state.running == running {
            return;
        }
        if running {
            self.monitor.start().await;
        } else {
            self.monitor.stop().await;
        }
        self.state.running = running;
        self.print(&self.controls.view(&self.state));
    }

    fn inputs_unlocked(&self) -> bool {
        let editable = InputWidget::editable(&self.state);
        if !editable {
            self.print("inputs are locked while the line is stopped");
        }
        editable
    }

    fn reload_config(&mut self) {
        let cfg = match load_config(&self.config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Config reload failed: {e}");
                return;
            }
        };

        if cfg.fabric != self.config.fabric {
            self.state.fabric = cfg.fabric;
        }
        if cfg.simulator != self.config.simulator {
            info!("Simulator settings changed; they take effect after a restart");
        }
        self.metrics.set_chart_points(cfg.display.chart_points);
        self.insight = Arc::new(self.insight.reconfigured(&cfg.insight));
        self.config = cfg;
        info!("Config reloaded");
    }

    fn export_report(&self) {
        let dir = Path::new(&self.config.report.directory);
        match export::write_report(dir, &self.state.current, Utc::now()) {
            Ok(path) => {
                info!("Report written to {}", path.display());
                self.print(&format!("report saved: {}", path.display()));
            }
            Err(e) => error!("Report export failed: {e}"),
        }
    }

    fn request_insight(&self) {
        self.print("requesting AI insight…");
        let insight = Arc::clone(&self.insight);
        let results = self.results.clone();
        let sample = self.state.current.clone();
        let fabric = self.state.fabric;

        tokio::spawn(async move {
            let text = insight.efficiency_report(&sample, &fabric).await;
            let _ = results.send(Message::InsightReady(text)).await;
        });
    }

    fn request_anomaly(&self) {
        let insight = Arc::clone(&self.insight);
        let results = self.results.clone();
        let pct = self.state.current.wastage_percentage();

        tokio::spawn(async move {
            let verdict = insight.check_anomaly(pct).await;
            let _ = results.send(Message::AnomalyReady(verdict)).await;
        });
    }

    // ── View ──────────────────────────────────────────────────────────────────

    /// Every panel, one per line.
    pub fn status(&self) -> String {
        let mut lines = vec![
            self.feed.view(&self.state),
            self.metrics.view(&self.state),
            self.input.view(&self.state),
            self.controls.view(&self.state),
        ];
        if let Some(text) = &self.state.insight {
            lines.push(format!("AI INSIGHT: {text}"));
        }
        if let Some(verdict) = &self.state.anomaly {
            lines.push(anomaly_line(verdict));
        }
        lines.join("\n")
    }

    fn print(&self, text: &str) {
        println!("{text}");
    }
}

fn anomaly_line(verdict: &AnomalyVerdict) -> String {
    let label = if verdict.is_anomaly { "ANOMALY" } else { "normal" };
    format!("ANOMALY CHECK: {label}: {}", verdict.reason)
}
