use fabwatch_core::AppState;

/// Action bar: the start/stop toggle plus the remaining commands.
#[derive(Debug, Default)]
pub struct ControlsWidget;

impl ControlsWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState) -> String {
        let toggle = if state.running { "[STOP]" } else { "[START]" };
        format!("ACTIONS  {toggle}  [REPORT]  [INSIGHT]  [ANOMALY]")
    }
}
