//! Starfield configuration: layer schedule and shading constants.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading or writing configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable parameters for the whole field.
///
/// Missing fields in a config file fall back to these defaults, so a file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Number of star layers, largest stars first.
    pub layers: u32,
    /// Star radius of the first layer, in pixels.
    pub base_radius: f32,
    /// Grid cell width of the first layer, in pixels.
    pub base_cell_width: f32,
    /// Radius multiplier from one layer to the next.
    pub radius_falloff: f32,
    /// Cell width multiplier from one layer to the next.
    pub cell_falloff: f32,
    /// How many of the leading layers twinkle.
    pub twinkle_layers: u32,
    /// Time scale of the twinkle animation.
    pub twinkle_speed: f32,
    /// Background color added under the stars, linear RGB.
    pub background: [f32; 3],
    /// Display gamma applied at the end of shading.
    pub gamma: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            layers: 5,
            base_radius: 4.0,
            base_cell_width: 500.0,
            radius_falloff: 0.5,
            cell_falloff: 0.35,
            twinkle_layers: 2,
            twinkle_speed: 1.5,
            background: [0.0, 0.0, 0.0],
            gamma: 2.2,
        }
    }
}

/// Per-layer parameters expanded from a [`StarfieldConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerParams {
    pub radius: f32,
    pub cell_width: f32,
    /// Decorrelates the cell hash between layers.
    pub seed: f32,
    pub twinkle: bool,
}

impl StarfieldConfig {
    /// Load a config from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_reader(File::open(path)?)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        serde_json::to_writer_pretty(File::create(path)?, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layers == 0 {
            return Err(ConfigError::Invalid("layers must be at least 1".into()));
        }
        if self.base_radius <= 0.0 || self.base_cell_width <= 0.0 {
            return Err(ConfigError::Invalid(
                "base_radius and base_cell_width must be positive".into(),
            ));
        }
        if self.radius_falloff <= 0.0 || self.cell_falloff <= 0.0 {
            return Err(ConfigError::Invalid("falloffs must be positive".into()));
        }
        if self.gamma <= 0.0 {
            return Err(ConfigError::Invalid("gamma must be positive".into()));
        }
        Ok(())
    }

    /// Expand into per-layer parameters. The radius and cell width shrink by
    /// their falloffs each layer; the layer index doubles as the hash seed.
    pub fn layer_schedule(&self) -> Vec<LayerParams> {
        let mut radius = self.base_radius;
        let mut cell_width = self.base_cell_width;
        let mut layers = Vec::with_capacity(self.layers as usize);
        for i in 0..self.layers {
            layers.push(LayerParams {
                radius,
                cell_width,
                seed: i as f32,
                twinkle: i < self.twinkle_layers,
            });
            radius *= self.radius_falloff;
            cell_width *= self.cell_falloff;
        }
        layers
    }
}
