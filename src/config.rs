// src/config.rs
//! Conversion options and their JSON storage

use crate::annotations::{DEFAULT_ALTITUDE, DEFAULT_COURSE, DEFAULT_SPEED};
use crate::error::{ConvertError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// What a GGA sentence does to an entry that already exists for its second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AltitudePolicy {
    /// Altitude is only recorded when the GGA creates the entry
    #[default]
    KeepFirst,
    /// Every GGA replaces the altitude; position stays as first recorded
    Overwrite,
}

/// Line layout of the annotation file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RecordLayout {
    /// One line per second carrying altitude, course and speed
    #[default]
    Merged,
    /// A bare position line followed by a `" (2)"` line with course and speed
    Split,
}

impl fmt::Display for AltitudePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AltitudePolicy::KeepFirst => write!(f, "keep-first"),
            AltitudePolicy::Overwrite => write!(f, "overwrite"),
        }
    }
}

impl fmt::Display for RecordLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordLayout::Merged => write!(f, "merged"),
            RecordLayout::Split => write!(f, "split"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub altitude_policy: AltitudePolicy,
    pub layout: RecordLayout,
    pub default_altitude: String,
    pub default_course: String,
    pub default_speed: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            altitude_policy: AltitudePolicy::default(),
            layout: RecordLayout::default(),
            default_altitude: DEFAULT_ALTITUDE.to_string(),
            default_course: DEFAULT_COURSE.to_string(),
            default_speed: DEFAULT_SPEED.to_string(),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from a JSON file; absent keys keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            ConvertError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        Ok(config)
    }

    /// Save configuration to a JSON file, creating its directory if needed
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ConvertError::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(path, contents)
            .map_err(|e| ConvertError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn with_altitude_policy(mut self, policy: AltitudePolicy) -> Self {
        self.altitude_policy = policy;
        self
    }

    pub fn with_layout(mut self, layout: RecordLayout) -> Self {
        self.layout = layout;
        self
    }
}
