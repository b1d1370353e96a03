//! Configuration system
//!
//! TOML-backed configuration with typed sections for the surface, logging,
//! and the ECS. The component-type capacity lives here so exhausting the
//! signature space is a configuration error rather than a silent overflow
//! at runtime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a TOML file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        if !path.ends_with(".toml") {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        if !path.ends_with(".toml") {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Rendering surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Surface title
    pub name: String,
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            name: "sketch".to_string(),
            width: 600,
            height: 600,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Bit mask of enabled logger levels, lowest bit = debug
    pub level_mask: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level_mask: crate::foundation::logging::LevelMask::all().bits(),
        }
    }
}

/// ECS limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcsConfig {
    /// Maximum number of distinct component types
    ///
    /// Registering more types than this fails with
    /// [`EcsError::TypeCapacityExceeded`](crate::ecs::EcsError).
    pub max_component_types: usize,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            max_component_types: 64,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rendering surface settings
    pub surface: SurfaceConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// ECS limits
    pub ecs: EcsConfig,
}

impl Config for EngineConfig {}
