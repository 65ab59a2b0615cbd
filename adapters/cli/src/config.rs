//! Session configuration loaded from TOML.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crossing_core::GridGeometry;
use crossing_world::{WorldConfig, DEFAULT_SEED};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a session configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read session config at {path}")]
    Read {
        /// Location that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for a session.
    #[error("failed to parse session config at {path}")]
    Parse {
        /// Location of the malformed file.
        path: PathBuf,
        /// Underlying deserialisation failure.
        #[source]
        source: toml::de::Error,
    },
    /// The geometry parsed but cannot drive a session.
    #[error("invalid board geometry: {0}")]
    InvalidGeometry(String),
}

/// Parameters for one session, all optional in the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    /// Seed for the speed generator, `None` selects the default seed.
    pub(crate) seed: Option<u64>,
    /// Board geometry; omitted fields keep their classic values.
    pub(crate) geometry: GridGeometry,
}

impl SessionConfig {
    /// Reads and validates the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parses and validates configuration text; `path` is used for reporting.
    pub(crate) fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        validate_geometry(&config.geometry)?;
        Ok(config)
    }

    /// Builds the world configuration, letting `seed_override` win over the file.
    pub(crate) fn world_config(&self, seed_override: Option<u64>) -> WorldConfig {
        let seed = seed_override.or(self.seed).unwrap_or(DEFAULT_SEED);
        WorldConfig::new(self.geometry, seed)
    }
}

fn validate_geometry(geometry: &GridGeometry) -> Result<(), ConfigError> {
    let finite = [
        ("cell_width", geometry.cell_width),
        ("cell_height", geometry.cell_height),
        ("canvas_width", geometry.canvas_width),
        ("canvas_height", geometry.canvas_height),
        ("enemy_spawn_x", geometry.enemy_spawn_x),
        ("enemy_recycle_x", geometry.enemy_recycle_x),
        ("enemy_speed.min", geometry.enemy_speed.min),
        ("enemy_speed.max", geometry.enemy_speed.max),
    ];
    if let Some((name, value)) = finite.into_iter().find(|(_, value)| !value.is_finite()) {
        return Err(ConfigError::InvalidGeometry(format!(
            "{name} must be finite, got {value}"
        )));
    }

    if !(geometry.cell_width > 0.0 && geometry.cell_height > 0.0) {
        return Err(ConfigError::InvalidGeometry(format!(
            "cell size must be positive, got {}x{}",
            geometry.cell_width, geometry.cell_height
        )));
    }
    if !(geometry.canvas_width > 0.0 && geometry.canvas_height > 0.0) {
        return Err(ConfigError::InvalidGeometry(format!(
            "canvas size must be positive, got {}x{}",
            geometry.canvas_width, geometry.canvas_height
        )));
    }
    if geometry.enemy_speed.is_empty() {
        return Err(ConfigError::InvalidGeometry(format!(
            "enemy speed range [{}, {}) is empty",
            geometry.enemy_speed.min, geometry.enemy_speed.max
        )));
    }
    // Enemies only recycle after crossing to the right.
    if geometry.enemy_speed.min <= 0.0 {
        return Err(ConfigError::InvalidGeometry(format!(
            "enemy speeds must be positive, got a lower bound of {}",
            geometry.enemy_speed.min
        )));
    }
    if !(geometry.enemy_spawn_x < geometry.enemy_recycle_x) {
        return Err(ConfigError::InvalidGeometry(format!(
            "enemies spawn at x = {} which is not left of the recycle line x = {}",
            geometry.enemy_spawn_x, geometry.enemy_recycle_x
        )));
    }
    Ok(())
}
