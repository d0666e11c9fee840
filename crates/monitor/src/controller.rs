use crate::generator::{tick, GeneratorParams, RandomSource};
use crate::history::HistoryWindow;
use chrono::{DateTime, Utc};
use fabwatch_core::{state::TelemetryUpdate, Sample};

/// Owns the current sample and the rolling history.
///
/// All mutation goes through `&mut self`, so a tick is applied either
/// completely (new current sample *and* window entry) or not at all.
#[derive(Debug, Clone)]
pub struct Monitor {
    params:  GeneratorParams,
    current: Sample,
    window:  HistoryWindow,
    running: bool,
}

impl Monitor {
    /// A stopped monitor seeded with `initial`. The window starts empty.
    pub fn new(initial: Sample, params: GeneratorParams, capacity: usize) -> Self {
        Self {
            params,
            current: initial,
            window: HistoryWindow::new(capacity),
            running: false,
        }
    }

    /// Begin emitting. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        let changed = !self.running;
        self.running = true;
        changed
    }

    /// Halt emission, keeping the last sample and the window. Returns `false`
    /// if already stopped.
    pub fn stop(&mut self) -> bool {
        let changed = self.running;
        self.running = false;
        changed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Apply one tick if running and return the new current sample.
    pub fn advance<R>(&mut self, rng: &mut R, now: DateTime<Utc>) -> Option<&Sample>
    where
        R: RandomSource + ?Sized,
    {
        if !self.running {
            return None;
        }

        let next = tick(&self.current, &self.params, rng, now);
        self.window.append(next.clone());
        self.current = next;
        Some(&self.current)
    }

    pub fn current(&self) -> &Sample {
        &self.current
    }

    /// See [`HistoryWindow::snapshot`].
    pub fn snapshot(&self, limit: Option<usize>) -> Vec<Sample> {
        self.window.snapshot(limit)
    }

    pub fn window(&self) -> &HistoryWindow {
        &self.window
    }

    /// Owned copy of the current sample and full history for readers.
    pub fn update(&self) -> TelemetryUpdate {
        TelemetryUpdate {
            current: self.current.clone(),
            history: self.window.snapshot(None),
        }
    }
}
