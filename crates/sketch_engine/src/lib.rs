//! # Sketch Engine
//!
//! A small game engine for 2D line rendering, built around an
//! Entity-Component-System core.
//!
//! ## Features
//!
//! - **ECS Architecture**: Pooled component storage, signature bitsets,
//!   and selector-driven systems
//! - **Synchronous Signature Events**: System membership lists are kept
//!   current the moment an entity's component set changes
//! - **Headless Surfaces**: Rendering surfaces record line batches into a
//!   queue, so the whole frame loop runs without a GPU
//! - **Leveled Logging**: Named logger sinks with a fatal error channel
//!   that stops the frame loop
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sketch_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let scene = engine.create_scene("main");
//!         let player = engine.scene_mut(scene).unwrap().create_entity("Player");
//!         engine.scene_mut(scene).unwrap().add_component::<Transform>(player)?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod core;

pub mod foundation;
pub mod events;
pub mod ecs;
pub mod render;
pub mod surface;
pub mod input;

pub mod application;
pub mod engine;

/// Commonly used types, re-exported for application code
pub mod prelude {
    pub use crate::application::{AppError, Application};
    pub use crate::core::config::{Config, EngineConfig};
    pub use crate::ecs::components::{LineRendererComponent, Rect, Transform, Viewport};
    pub use crate::ecs::systems::LineRendererSystem;
    pub use crate::ecs::{
        Component, ComponentRef, ComponentRegistry, EcsError, EntityId, Scene, SceneId, Selector,
        Signature, System, SystemContext, UpdateMode,
    };
    pub use crate::engine::{Engine, EngineError};
    pub use crate::foundation::logging::Logger;
    pub use crate::input::{Axis, Axis2D, Key};
    pub use crate::render::{Color, Material, MaterialId};
    pub use crate::surface::{SurfaceEvent, SurfaceId};
}
