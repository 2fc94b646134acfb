//! Run configuration.
//!
//! A [`Configuration`] selects the problem, fixes the final time and gives
//! the axis-aligned domain box. It is validated once and never mutated.
//!
//! ```
//! use hypsys::Configuration;
//!
//! let config = Configuration::from_toml_str(
//!     r#"
//!     config_num = 1
//!     t_final = 0.5
//!     bb_min = [0.0, 0.0]
//!     bb_max = [1.0, 2.0]
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.config_num(), 1);
//! assert_eq!(config.domain_measure(), 2.0);
//! ```

use crate::types::{BoundingBox, BoundsError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid bounding box: {0}")]
    InvalidBoundingBox(#[from] BoundsError),

    #[error("final time must be non-negative and finite, got {0}")]
    InvalidFinalTime(f64),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfiguration {
    config_num: u32,
    t_final: f64,
    bb_min: Vec<f64>,
    bb_max: Vec<f64>,
}

/// Problem selector, final time and domain box.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawConfiguration")]
pub struct Configuration {
    config_num: u32,
    t_final: f64,
    bounding_box: BoundingBox,
}

impl Configuration {
    pub fn new(config_num: u32, t_final: f64, bb_min: Vec<f64>, bb_max: Vec<f64>) -> Result<Self, ConfigError> {
        if !(t_final >= 0.0 && t_final.is_finite()) {
            return Err(ConfigError::InvalidFinalTime(t_final));
        }
        let bounding_box = BoundingBox::new(bb_min, bb_max)?;
        Ok(Self {
            config_num,
            t_final,
            bounding_box,
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawConfiguration = toml::from_str(s)?;
        Self::try_from(raw)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            tracing::warn!("Failed to read configuration at {:?}: {}", path, source);
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_toml_str(&content)
    }

    /// Problem selector.
    #[inline]
    pub fn config_num(&self) -> u32 {
        self.config_num
    }

    #[inline]
    pub fn t_final(&self) -> f64 {
        self.t_final
    }

    pub fn bb_min(&self) -> &[f64] {
        self.bounding_box.min()
    }

    pub fn bb_max(&self) -> &[f64] {
        self.bounding_box.max()
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Length, area or volume of the bounding box.
    pub fn domain_measure(&self) -> f64 {
        self.bounding_box.measure()
    }
}

impl TryFrom<RawConfiguration> for Configuration {
    type Error = ConfigError;

    fn try_from(raw: RawConfiguration) -> Result<Self, Self::Error> {
        Self::new(raw.config_num, raw.t_final, raw.bb_min, raw.bb_max)
    }
}
