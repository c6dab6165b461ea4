//! Pipeline configuration.
//!
//! Groups the knobs the core consumes: sequence geometry, the feature
//! to extract, match parameters, and the quiet flag. Output verbosity
//! is explicit configuration passed into the pipeline, never a global
//! toggle.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::transform::FeatureKind;

/// Configuration validation and loading errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid frame dimensions {0}x{1}")]
    InvalidDimensions(u32, u32),
    #[error("invalid feature parameters: {0}")]
    InvalidFeature(String),
    #[error("match count must be at least 1")]
    InvalidMatchCount,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Geometry of the frame sequence to process.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of frames in the sequence.
    pub frame_count: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            frame_count: 30,
        }
    }
}

/// Parameters for the matching stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Index of the reference frame.
    pub query_frame: usize,
    /// Number of closest frames to report.
    pub matches: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            query_frame: 0,
            matches: 10,
        }
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Frame sequence geometry.
    #[serde(default)]
    pub source: SourceConfig,
    /// Feature to extract.
    pub feature: FeatureKind,
    /// Matching parameters.
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Suppress progress output, reporting results only.
    #[serde(default)]
    pub quiet: bool,
}

impl FileConfig {
    /// Validates all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.width == 0 || self.source.height == 0 {
            return Err(ConfigError::InvalidDimensions(
                self.source.width,
                self.source.height,
            ));
        }
        self.feature
            .validate()
            .map_err(|e| ConfigError::InvalidFeature(e.to_string()))?;
        if self.matching.matches == 0 {
            return Err(ConfigError::InvalidMatchCount);
        }
        Ok(())
    }

    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
