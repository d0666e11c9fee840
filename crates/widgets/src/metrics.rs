use crate::sparkline::sparkline;
use fabwatch_core::{AppState, Sample};

/// Model output panel: defect counters, wastage and its recent trend.
#[derive(Debug)]
pub struct MetricsWidget {
    /// Number of recent samples shown in the trend.
    chart_points: usize,
}

impl MetricsWidget {
    pub fn new(chart_points: usize) -> Self {
        Self { chart_points }
    }

    pub fn set_chart_points(&mut self, chart_points: usize) {
        self.chart_points = chart_points;
    }

    pub fn view(&self, state: &AppState) -> String {
        let sample = &state.current;
        let trend: Vec<f64> = state
            .recent(self.chart_points)
            .iter()
            .map(Sample::wastage_percentage)
            .collect();

        format!(
            "HOLES {:>4} | SEWING LINES {:>4} | WASTAGE {:.3} KG | {:.2}% {}",
            sample.hole_count(),
            sample.sewing_line_count(),
            sample.cumulative_wastage_kg(),
            sample.wastage_percentage(),
            sparkline(&trend),
        )
    }
}

impl Default for MetricsWidget {
    fn default() -> Self {
        Self::new(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fabwatch_core::{state::TelemetryUpdate, WastageModel};

    #[test]
    fn renders_counters_and_rounded_wastage() {
        let mut state = AppState::default();
        let current = Sample::new(8, 2, 0.25, Utc::now(), &WastageModel::default());
        state.apply(TelemetryUpdate {
            current,
            history: Vec::new(),
        });

        let line = MetricsWidget::default().view(&state);
        assert!(line.starts_with("HOLES    8 | SEWING LINES    2 | WASTAGE 0.250 KG | 2.63%"));
    }

    #[test]
    fn trend_uses_only_recent_points() {
        let model = WastageModel::default();
        let history: Vec<Sample> = (1..=50)
            .map(|i| Sample::new(0, 0, f64::from(i) * 0.01, Utc::now(), &model))
            .collect();
        let mut state = AppState::default();
        state.apply(TelemetryUpdate {
            current: history[49].clone(),
            history,
        });

        let line = MetricsWidget::new(30).view(&state);
        let bars = line.rsplit(' ').next().unwrap();
        assert_eq!(bars.chars().count(), 30);
        assert!(bars.starts_with('▁') && bars.ends_with('█'));
    }
}
