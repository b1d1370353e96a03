//! Line rendering demo
//!
//! Spawns a camera, a steerable "Test Lines" square, and a fixed
//! "World Center" marker, then drives the test square around with the
//! arrow keys (scripted here so the demo runs headless and exits on its
//! own after a few hundred frames).

use nalgebra::Vector3;
use sketch_engine::prelude::*;

const DEMO_FRAMES: u32 = 300;

struct LinesApp {
    arrows: Axis2D,
    surface: Option<SurfaceId>,
    line_transform: Option<ComponentRef<Transform>>,
    frames: u32,
}

impl LinesApp {
    fn new() -> Self {
        Self {
            arrows: Axis2D::from_keys(Key::Left, Key::Up, Key::Right, Key::Down),
            surface: None,
            line_transform: None,
            frames: 0,
        }
    }
}

impl Application for LinesApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let surface_config = engine.config().surface.clone();
        self.surface = Some(engine.create_surface(
            surface_config.name,
            surface_config.width,
            surface_config.height,
        ));

        engine.add_system(LineRendererSystem::new()).map_err(|e| AppError::Custom(e.to_string()))?;

        let white = engine.materials_mut().insert(Material::new("white lines"));
        let blue = engine.materials_mut().insert(Material::new("blue lines"));

        let scene_id = engine.create_scene("main");
        let scene = engine.scene_mut(scene_id).ok_or_else(|| {
            AppError::Custom("scene vanished right after creation".to_string())
        })?;

        let camera = scene.create_entity("Camera");
        let camera_transform = scene.add_component::<Transform>(camera)?;
        camera_transform.borrow_mut().scale = Vector3::new(2.0, 2.0, 2.0);
        scene.add_component::<Viewport>(camera)?;

        let world_center = scene.create_entity("World Center");
        scene.add_component::<Transform>(world_center)?;
        let center_lines = scene.add_component::<LineRendererComponent>(world_center)?;
        center_lines.borrow_mut().color = Color::new(0.0, 0.0, 1.0);
        if let Some(record) = scene.entity_mut(world_center) {
            record.materials.push(blue);
        }

        let test_lines = scene.create_entity("Test Lines");
        self.line_transform = Some(scene.add_component::<Transform>(test_lines)?);
        let test_rend = scene.add_component::<LineRendererComponent>(test_lines)?;
        test_rend.borrow_mut().color = Color::WHITE;
        if let Some(record) = scene.entity_mut(test_lines) {
            record.materials.push(white);
        }

        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        self.frames += 1;

        // Scripted input: hold right for a while, then up, then release
        match self.frames {
            1 => engine.input_mut().press(Key::Right),
            100 => {
                engine.input_mut().release(Key::Right);
                engine.input_mut().press(Key::Up);
            }
            200 => engine.input_mut().release(Key::Up),
            _ => {}
        }

        self.arrows.update(engine.input());
        if let Some(transform) = &self.line_transform {
            let (x, y) = self.arrows.smooth();
            let mut transform = transform.borrow_mut();
            transform.position.x = x as f32;
            transform.position.y = y as f32;
        }

        if self.frames >= DEMO_FRAMES {
            if let Some(surface) = self.surface.and_then(|id| engine.surface_mut(id)) {
                surface.request_close();
            }
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        engine.logger().log(&format!(
            "Demo finished after {} frames ({:.1} fps average).",
            self.frames,
            engine.timer().average_fps()
        ));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match EngineConfig::load_from_file("engine.toml") {
        Ok(config) => config,
        Err(_) => EngineConfig::default(),
    };

    let mut app = LinesApp::new();
    Engine::run(config, &mut app)?;
    Ok(())
}
