pub mod schema;
pub mod watcher;

pub use schema::{
    DisplayConfig, FabConfig, InitialSample, InsightConfig, ReportConfig, SimulatorConfig,
};
pub use watcher::ConfigWatcher;

use fabwatch_core::{FabError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `FabConfig::default()` if
/// the file doesn't exist so the dashboard always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<FabConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(FabConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| FabError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<FabConfig> {
    let config: FabConfig =
        toml::from_str(raw).map_err(|e| FabError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Return the config path: `$FABWATCH_CONFIG` if set, otherwise
/// `fabwatch/fabwatch.toml` under `$XDG_CONFIG_HOME` (or `~/.config`).
pub fn default_path() -> PathBuf {
    if let Ok(explicit) = std::env::var("FABWATCH_CONFIG") {
        return PathBuf::from(explicit);
    }

    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("fabwatch").join("fabwatch.toml")
}
