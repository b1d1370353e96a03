//! Application trait for engine users
//!
//! Implement [`Application`] and hand it to [`Engine::run`] to get a
//! managed lifecycle: `initialize` once before the first frame, `update`
//! once per frame before systems run, `cleanup` once after the loop ends
//! for any reason.
//!
//! [`Engine::run`]: crate::engine::Engine::run

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::ecs::EcsError;
use crate::engine::Engine;

/// Errors surfaced from application callbacks
#[derive(Error, Debug)]
pub enum AppError {
    /// An ECS operation failed
    #[error("ECS error: {0}")]
    Ecs(#[from] EcsError),

    /// Configuration could not be loaded or saved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application-specific failure
    #[error("Application error: {0}")]
    Custom(String),
}

/// The callbacks an engine-hosted program implements
pub trait Application {
    /// Called once before the first frame
    ///
    /// Create scenes, entities, and surfaces, and register systems here.
    /// An error aborts the run before the frame loop starts.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Called once per frame, before systems run
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Called once after the frame loop ends, regardless of how it ended
    fn cleanup(&mut self, engine: &mut Engine);
}
