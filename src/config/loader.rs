use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::EngineConfig, ConfigError};

/// Load configuration from an optional file with environment variable overrides
///
/// Environment variables use the `WORDLE_` prefix and `__` between sections,
/// e.g. `WORDLE_GAME__MAX_TURNS=8`.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let mut figment = Figment::new();
    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: EngineConfig = figment
        .merge(Env::prefixed("WORDLE_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<EngineConfig, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
