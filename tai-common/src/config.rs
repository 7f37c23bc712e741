//! Configuration file resolution and loading
//!
//! Config files are resolved following a fixed priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. Platform config directory (e.g. `~/.config/terrain-ai/config.toml`)
//! 4. Compiled defaults (no file)

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Resolve the configuration file path for a service.
///
/// Returns `None` when no file was named anywhere and the platform
/// config directory holds no `config.toml`; callers fall back to
/// compiled defaults in that case.
pub fn resolve_config_file(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    app_dir: &str,
) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        return Some(PathBuf::from(path));
    }

    // Priority 3: Platform config directory
    let candidate = dirs::config_dir()?.join(app_dir).join("config.toml");
    if candidate.exists() {
        return Some(candidate);
    }

    None
}

/// Load and parse a TOML configuration file.
///
/// A `None` path yields `T::default()`. An explicitly named file that
/// cannot be read or parsed is an error, not a silent fallback.
pub fn load_config<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        tracing::info!("No config file found, using compiled defaults");
        return Ok(T::default());
    };

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;

    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    tracing::info!("Configuration loaded from {}", path.display());
    Ok(config)
}
