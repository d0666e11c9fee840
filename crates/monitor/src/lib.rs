pub mod controller;
pub mod generator;
pub mod history;

pub use controller::Monitor;
pub use generator::{tick, GeneratorParams, RandomSource, SequenceRandom, StdRandom};
pub use history::HistoryWindow;

use chrono::Utc;
use fabwatch_core::state::TelemetryUpdate;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Control messages accepted by the monitor task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorCommand {
    Start,
    Stop,
}

/// Cloneable handle used to start and stop a spawned monitor.
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    commands: mpsc::Sender<MonitorCommand>,
}

impl MonitorHandle {
    pub async fn start(&self) {
        self.send(MonitorCommand::Start).await;
    }

    pub async fn stop(&self) {
        self.send(MonitorCommand::Stop).await;
    }

    async fn send(&self, command: MonitorCommand) {
        if self.commands.send(command).await.is_err() {
            warn!("Monitor task has exited; dropping {command:?}");
        }
    }
}

/// Spawn a background Tokio task that owns `monitor` and ticks it every
/// `interval` while it is running, forwarding a [`TelemetryUpdate`] after
/// each applied tick.
///
/// The task is the only writer: commands and ticks are handled one at a
/// time, so a `Stop` always lands between two complete ticks. It stops
/// when the receiver is dropped or every handle is gone.
pub fn spawn_monitor<R>(
    mut monitor: Monitor,
    interval: Duration,
    mut rng: R,
) -> (MonitorHandle, mpsc::Receiver<TelemetryUpdate>)
where
    R: RandomSource + Send + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel(8);
    let (tx, rx) = mpsc::channel(4);

    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.reset(); // first sample one full period after spawn

        info!(
            "Monitor task started (interval {interval:?}, running: {})",
            monitor.is_running()
        );

        loop {
            tokio::select! {
                command = cmd_rx.recv() => match command {
                    Some(MonitorCommand::Start) => {
                        if monitor.start() {
                            ticker.reset();
                            info!("Monitor resumed");
                        }
                    }
                    Some(MonitorCommand::Stop) => {
                        if monitor.stop() {
                            info!("Monitor paused");
                        }
                    }
                    None => break, // all handles dropped
                },
                _ = ticker.tick(), if monitor.is_running() => {
                    let Some(sample) = monitor.advance(&mut rng, Utc::now()) else {
                        continue;
                    };
                    debug!(
                        holes = sample.hole_count(),
                        lines = sample.sewing_line_count(),
                        wastage_kg = sample.cumulative_wastage_kg(),
                        "tick"
                    );

                    if tx.send(monitor.update()).await.is_err() {
                        break; // all receivers dropped
                    }
                }
            }
        }

        info!("Monitor task stopped");
    });

    (MonitorHandle { commands: cmd_tx }, rx)
}
