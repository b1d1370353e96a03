//! Core engine configuration

pub mod config;

pub use config::{Config, ConfigError, EngineConfig};
