use fabwatch_core::Message;

pub const HELP: &str = "\
commands:
  start | stop | toggle   control the simulated line
  report                  write a CSV report of the current sample
  insight                 ask the AI service for a quality summary
  anomaly                 ask the AI service whether wastage is anomalous
  gsm <g/m²>              set fabric areal density
  width <inches>          set fabric width
  status                  show every panel
  help                    show this text
  quit | exit             leave the dashboard";

/// Parse one console line into a [`Message`]. Blank lines yield `None`.
///
/// Commands are case-insensitive; anything unrecognised becomes
/// `Message::InvalidCommand` carrying a short explanation.
pub fn parse_command(line: &str) -> Option<Message> {
    let mut words = line.split_whitespace();
    let verb = words.next()?.to_ascii_lowercase();
    let arg = words.next();

    if words.next().is_some() {
        return Some(Message::InvalidCommand(format!("too many arguments to '{verb}'")));
    }

    let msg = match (verb.as_str(), arg) {
        ("start", None) => Message::StartRequested,
        ("stop", None) => Message::StopRequested,
        ("toggle", None) => Message::ToggleRequested,
        ("report" | "download", None) => Message::ReportRequested,
        ("insight", None) => Message::InsightRequested,
        ("anomaly", None) => Message::AnomalyRequested,
        ("status", None) => Message::StatusRequested,
        ("help" | "?", None) => Message::HelpRequested,
        ("quit" | "exit", None) => Message::Shutdown,
        ("gsm", Some(value)) => match parse_positive(value) {
            Ok(gsm) => Message::GsmChanged(gsm),
            Err(reason) => Message::InvalidCommand(format!("gsm: {reason}")),
        },
        ("width", Some(value)) => match parse_positive(value) {
            Ok(width) => Message::WidthChanged(width),
            Err(reason) => Message::InvalidCommand(format!("width: {reason}")),
        },
        ("gsm" | "width", None) => Message::InvalidCommand(format!("'{verb}' needs a value")),
        (_, Some(_)) if is_known(&verb) => {
            Message::InvalidCommand(format!("'{verb}' takes no arguments"))
        }
        _ => Message::InvalidCommand(format!("unknown command '{verb}' (try 'help')")),
    };
    Some(msg)
}

fn is_known(verb: &str) -> bool {
    matches!(
        verb,
        "start" | "stop" | "toggle" | "report" | "download" | "insight" | "anomaly" | "status"
            | "help" | "?" | "quit" | "exit"
    )
}

fn parse_positive(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|_| format!("'{raw}' is not a number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("'{raw}' must be a positive number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_ignored() {
        assert!(parse_command("   ").is_none());
    }

    #[test]
    fn simple_verbs() {
        assert!(matches!(parse_command("START"), Some(Message::StartRequested)));
        assert!(matches!(parse_command(" stop "), Some(Message::StopRequested)));
        assert!(matches!(parse_command("download"), Some(Message::ReportRequested)));
        assert!(matches!(parse_command("exit"), Some(Message::Shutdown)));
    }

    #[test]
    fn fabric_values() {
        assert!(matches!(parse_command("gsm 200"), Some(Message::GsmChanged(v)) if v == 200.0));
        assert!(matches!(parse_command("width 58.5"), Some(Message::WidthChanged(v)) if v == 58.5));
    }

    #[test]
    fn rejects_bad_input() {
        for line in ["gsm", "gsm -3", "width abc", "width NaN", "stop now", "launch", "gsm 1 2"] {
            assert!(
                matches!(parse_command(line), Some(Message::InvalidCommand(_))),
                "accepted {line:?}"
            );
        }
    }
}
