//! Engine context and frame loop
//!
//! The engine owns every long-lived collaborator: the shared component
//! registry, scenes, the system manager, rendering surfaces, materials,
//! input, and timing. [`Engine::run`] drives an [`Application`] through
//! initialize / per-frame update / cleanup, and keeps looping while at
//! least one surface is alive and no fatal error has been raised.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::application::{AppError, Application};
use crate::core::config::{ConfigError, EngineConfig};
use crate::ecs::{ComponentRegistry, EcsError, EntityId, Scene, SceneId, System, SystemManager};
use crate::foundation::logging::{self, FatalFlag, LevelMask, Logger};
use crate::foundation::time::Timer;
use crate::input::InputManager;
use crate::render::MaterialRegistry;
use crate::surface::{Surface, SurfaceId};

/// Errors from engine construction and the frame loop
#[derive(Error, Debug)]
pub enum EngineError {
    /// An ECS operation failed
    #[error("ECS error: {0}")]
    Ecs(#[from] EcsError),

    /// Configuration could not be loaded or saved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An application callback failed
    #[error("Application error: {0}")]
    Application(#[from] AppError),

    /// The frame loop stopped because the fatal flag was raised
    #[error("terminated by a fatal error")]
    Terminated,
}

/// The central engine context
pub struct Engine {
    config: EngineConfig,
    registry: Rc<RefCell<ComponentRegistry>>,
    scenes: Vec<Scene>,
    systems: SystemManager,
    surfaces: Vec<Surface>,
    next_surface: u32,
    materials: MaterialRegistry,
    input: InputManager,
    timer: Timer,
    fatal: FatalFlag,
    logger: Logger,
}

impl Engine {
    /// Create an engine from a configuration
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        logging::init();

        let registry = Rc::new(RefCell::new(ComponentRegistry::new(
            config.ecs.max_component_types,
        )));
        let systems = SystemManager::new(Rc::clone(&registry))?;

        let fatal = FatalFlag::new();
        let logger = Logger::with_mask(
            "Engine",
            LevelMask::from_bits_truncate(config.logging.level_mask),
            fatal.clone(),
        );

        Ok(Self {
            config,
            registry,
            scenes: Vec::new(),
            systems,
            surfaces: Vec::new(),
            next_surface: 0,
            materials: MaterialRegistry::new(),
            input: InputManager::new(),
            timer: Timer::new(),
            fatal,
            logger,
        })
    }

    /// Run an application to completion
    ///
    /// Calls `initialize`, then loops: timer update, `update`, one engine
    /// frame. The loop ends when every surface is gone or the fatal flag
    /// is raised; `cleanup` runs in every case. Returns
    /// [`EngineError::Terminated`] when the exit was fatal.
    pub fn run<A: Application>(config: EngineConfig, app: &mut A) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;
        engine.logger.log("Engine starting.");

        if let Err(error) = app.initialize(&mut engine) {
            app.cleanup(&mut engine);
            return Err(error.into());
        }

        let result = engine.main_loop(app);
        app.cleanup(&mut engine);
        engine.logger.log("Engine stopped.");
        result
    }

    fn main_loop<A: Application>(&mut self, app: &mut A) -> Result<(), EngineError> {
        while self.running() {
            self.timer.update();
            let delta_time = self.timer.delta_time();

            app.update(self, delta_time)?;
            self.run_frame();
        }

        if self.fatal.is_raised() {
            Err(EngineError::Terminated)
        } else {
            Ok(())
        }
    }

    /// Whether the frame loop should keep going
    pub fn running(&self) -> bool {
        !self.fatal.is_raised() && !self.surfaces.is_empty()
    }

    /// Drive one engine frame: surface lifecycle, systems, present
    pub fn run_frame(&mut self) {
        for surface in &mut self.surfaces {
            if surface.close_requested() {
                log::debug!("Surface \"{}\" destroyed.", surface.name());
                surface.invalidate();
            }
        }
        self.surfaces.retain(Surface::is_valid);

        for surface in &mut self.surfaces {
            surface.begin_frame();
        }

        self.systems.run_systems(&mut self.scenes, &mut self.surfaces);

        for surface in &mut self.surfaces {
            let batches = surface.queue_mut().drain();
            log::trace!(
                "Surface \"{}\": presented {} line batches.",
                surface.name(),
                batches.len()
            );
        }
    }

    /// Create a scene wired into system membership maintenance
    pub fn create_scene(&mut self, name: impl Into<String>) -> SceneId {
        let id = SceneId(self.scenes.len());
        let mut scene = Scene::new(id, name, Rc::clone(&self.registry));
        self.systems.attach_scene(&mut scene);
        log::debug!("Scene \"{}\" created.", scene.name());
        self.scenes.push(scene);
        id
    }

    /// The scene with this id, if any
    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(id.index())
    }

    /// Mutable access to a scene
    pub fn scene_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.get_mut(id.index())
    }

    /// Number of scenes
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Register a system
    ///
    /// Returns `false` when a system of the same type is already
    /// registered. The new system's membership is primed against every
    /// existing scene before this returns.
    pub fn add_system<S: System + 'static>(&mut self, system: S) -> Result<bool, EngineError> {
        Ok(self.systems.register(system, &self.scenes)?)
    }

    /// Create a rendering surface
    pub fn create_surface(&mut self, name: impl Into<String>, width: u32, height: u32) -> SurfaceId {
        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;
        let surface = Surface::new(id, name, width, height);
        log::debug!("Surface \"{}\" created.", surface.name());
        self.surfaces.push(surface);
        id
    }

    /// The surface with this id, if it is still alive
    pub fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.iter().find(|surface| surface.id() == id)
    }

    /// Mutable access to a surface
    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut Surface> {
        self.surfaces.iter_mut().find(|surface| surface.id() == id)
    }

    /// Number of live surfaces
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Entities currently acting as cameras in a scene
    pub fn cameras(&self, scene: SceneId) -> Vec<EntityId> {
        self.systems.cameras(scene)
    }

    /// The membership list of a registered system type for a scene
    pub fn system_entities<S: System + 'static>(&self, scene: SceneId) -> Vec<EntityId> {
        self.systems.entities_of::<S>(scene)
    }

    /// Raise the fatal flag, ending the frame loop after this frame
    pub fn terminate(&self) {
        self.fatal.raise();
    }

    /// The engine's named log sink
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// The shared fatal flag, for wiring extra loggers
    pub fn fatal_flag(&self) -> FatalFlag {
        self.fatal.clone()
    }

    /// The material registry
    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Mutable access to the material registry
    pub fn materials_mut(&mut self) -> &mut MaterialRegistry {
        &mut self.materials
    }

    /// The input manager
    pub fn input(&self) -> &InputManager {
        &self.input
    }

    /// Mutable access to the input manager (for feeding key transitions)
    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    /// Frame timing since engine creation
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// The configuration the engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use crate::ecs::components::{Transform, Viewport};

    use super::*;

    struct CountedApp {
        frames: u32,
        limit: u32,
        surface: Option<SurfaceId>,
        cleaned_up: bool,
    }

    impl CountedApp {
        fn new(limit: u32) -> Self {
            Self {
                frames: 0,
                limit,
                surface: None,
                cleaned_up: false,
            }
        }
    }

    impl Application for CountedApp {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            self.surface = Some(engine.create_surface("test", 600, 600));
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            self.frames += 1;
            if self.frames >= self.limit {
                if let Some(surface) = self.surface.and_then(|id| engine.surface_mut(id)) {
                    surface.request_close();
                }
            }
            Ok(())
        }

        fn cleanup(&mut self, _engine: &mut Engine) {
            self.cleaned_up = true;
        }
    }

    #[test]
    fn test_loop_ends_when_last_surface_closes() {
        let mut app = CountedApp::new(3);
        Engine::run(EngineConfig::default(), &mut app).unwrap();
        assert_eq!(app.frames, 3);
        assert!(app.cleaned_up);
    }

    #[test]
    fn test_no_surface_means_no_frames() {
        struct Idle {
            updates: u32,
        }
        impl Application for Idle {
            fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
                Ok(())
            }
            fn update(&mut self, _engine: &mut Engine, _dt: f32) -> Result<(), AppError> {
                self.updates += 1;
                Ok(())
            }
            fn cleanup(&mut self, _engine: &mut Engine) {}
        }

        let mut app = Idle { updates: 0 };
        Engine::run(EngineConfig::default(), &mut app).unwrap();
        assert_eq!(app.updates, 0);
    }

    #[test]
    fn test_fatal_error_terminates_the_loop() {
        struct Fatal;
        impl Application for Fatal {
            fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
                engine.create_surface("doomed", 10, 10);
                Ok(())
            }
            fn update(&mut self, engine: &mut Engine, _dt: f32) -> Result<(), AppError> {
                engine.logger().error("unrecoverable");
                Ok(())
            }
            fn cleanup(&mut self, _engine: &mut Engine) {}
        }

        let result = Engine::run(EngineConfig::default(), &mut Fatal);
        assert!(matches!(result, Err(EngineError::Terminated)));
    }

    #[test]
    fn test_initialize_error_aborts_before_the_loop() {
        struct Broken {
            cleaned_up: bool,
        }
        impl Application for Broken {
            fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
                Err(AppError::Custom("no assets".to_string()))
            }
            fn update(&mut self, _engine: &mut Engine, _dt: f32) -> Result<(), AppError> {
                Ok(())
            }
            fn cleanup(&mut self, _engine: &mut Engine) {
                self.cleaned_up = true;
            }
        }

        let mut app = Broken { cleaned_up: false };
        let result = Engine::run(EngineConfig::default(), &mut app);
        assert!(matches!(result, Err(EngineError::Application(_))));
        assert!(app.cleaned_up);
    }

    #[test]
    fn test_cameras_visible_through_the_engine() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        let scene_id = engine.create_scene("main");

        let scene = engine.scene_mut(scene_id).unwrap();
        let camera = scene.create_entity("Camera");
        scene.add_component::<Transform>(camera).unwrap();
        scene.add_component::<Viewport>(camera).unwrap();

        assert_eq!(engine.cameras(scene_id), vec![camera]);
    }

    #[test]
    fn test_closed_surface_is_dropped_from_the_engine() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        let id = engine.create_surface("w", 10, 10);
        assert_eq!(engine.surface_count(), 1);

        engine.surface_mut(id).unwrap().request_close();
        engine.run_frame();
        assert_eq!(engine.surface_count(), 0);
        assert!(engine.surface(id).is_none());
    }
}
