use chrono::Local;
use fabwatch_core::AppState;

/// Camera header line. The live video itself is not part of this dashboard.
#[derive(Debug, Default)]
pub struct FeedHeaderWidget;

impl FeedHeaderWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState) -> String {
        let time = state.current.captured_at().with_timezone(&Local);
        let dot = if state.running { "●" } else { "○" };
        format!("{dot} LIVE_FEED // CAM_01    {}", time.format("%H:%M:%S"))
    }
}
