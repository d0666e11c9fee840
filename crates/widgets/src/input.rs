use fabwatch_core::AppState;

/// Fabric parameters panel (GSM and width).
#[derive(Debug, Default)]
pub struct InputWidget;

impl InputWidget {
    pub fn new() -> Self {
        Self
    }

    /// Inputs are only editable while the line is running.
    pub fn editable(state: &AppState) -> bool {
        state.running
    }

    pub fn view(&self, state: &AppState) -> String {
        let lock = if Self::editable(state) { "" } else { "  [locked]" };
        format!(
            "INPUT_CONFIG  GSM {} g/m² | WIDTH {} INCH{lock}",
            state.fabric.gsm, state.fabric.width_in
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locked_while_stopped() {
        let mut state = AppState::default();
        state.running = false;
        assert!(InputWidget::new().view(&state).ends_with("[locked]"));

        state.running = true;
        assert_eq!(
            InputWidget::new().view(&state),
            "INPUT_CONFIG  GSM 180 g/m² | WIDTH 60 INCH"
        );
    }
}
