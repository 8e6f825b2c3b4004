//! Engine configuration.
//!
//! Settings come from `delve.toml` in the data directory. Every field has a
//! default, so a partial file is fine, and a missing or broken file just means
//! running on defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed seed for combat dice; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Turn-driver ticks run after each time-consuming command.
    pub ticks_per_command: u32,
    /// World description file, relative to the data directory.
    pub world_file: String,
    pub color: bool,
    /// Wrap output at this width instead of the terminal's.
    pub wrap_width: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ticks_per_command: 1,
            world_file: "world.ron".to_string(),
            color: true,
            wrap_width: None,
        }
    }
}

/// Load configuration from a TOML file, falling back to defaults on error.
///
/// # Logging
/// - `info!` on successful load
/// - `warn!` if the file cannot be read or parsed
pub fn load_config(toml_path: &Path) -> EngineConfig {
    match try_load_config(toml_path) {
        Ok(config) => {
            info!("engine configuration loaded from '{}'", toml_path.display());
            config
        },
        Err(e) => {
            warn!(
                "Could not load engine configuration from '{}': {e:#}. Using defaults.",
                toml_path.display()
            );
            EngineConfig::default()
        },
    }
}

/// # Errors
/// Returns an error if the file cannot be read or parsed.
fn try_load_config(toml_path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(toml_path)
        .with_context(|| format!("reading engine configuration from '{}'", toml_path.display()))?;
    let mut config: EngineConfig = toml::from_str(&text)
        .with_context(|| format!("parsing engine configuration from '{}'", toml_path.display()))?;
    if config.ticks_per_command == 0 {
        warn!("ticks_per_command = 0 would freeze the world; using 1");
        config.ticks_per_command = 1;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 42\nticks_per_command = 2").unwrap();
        let config = load_config(file.path());
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.ticks_per_command, 2);
        assert_eq!(config.world_file, "world.ron");
        assert!(config.color);
    }

    #[test]
    fn broken_or_missing_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = \"not a number\"").unwrap();
        assert_eq!(load_config(file.path()), EngineConfig::default());
        assert_eq!(load_config(Path::new("/definitely/not/here.toml")), EngineConfig::default());
    }

    #[test]
    fn zero_ticks_is_corrected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ticks_per_command = 0").unwrap();
        assert_eq!(load_config(file.path()).ticks_per_command, 1);
    }
}
