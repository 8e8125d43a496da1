//! Loading editor settings from YAML.

use std::path::Path;

use tracing::debug;

use crate::error::ConfigError;
use crate::types::config::Settings;


/// Read and validate settings from a YAML file.
pub fn load(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = parse(&content).map_err(|err| match err {
        ParseFailure::Yaml(source) => ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Invalid(e) => e,
    })?;
    debug!(path = %path.display(), seed = settings.seed.len(), "settings loaded");
    Ok(settings)
}


/// Load from `path` if given, otherwise fall back to the defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(p) => load(p),
        None => Ok(Settings::default()),
    }
}


enum ParseFailure {
    Yaml(serde_yaml::Error),
    Invalid(ConfigError),
}


fn parse(content: &str) -> Result<Settings, ParseFailure> {
    // An empty document deserializes as null; treat it as "all defaults".
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_yaml::from_str(content).map_err(ParseFailure::Yaml)?;
    validate(&settings).map_err(ParseFailure::Invalid)?;
    Ok(settings)
}


/// Check values serde cannot constrain.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.tick_ms == 0 {
        return Err(ConfigError::Invalid {
            key: "tick_ms",
            reason: "must be greater than zero".into(),
        });
    }
    if let Some(seed) = settings.seed.iter().find(|s| s.name.trim().is_empty()) {
        return Err(ConfigError::Invalid {
            key: "seed",
            reason: format!("parameter with empty name (value '{}')", seed.value),
        });
    }
    Ok(())
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
