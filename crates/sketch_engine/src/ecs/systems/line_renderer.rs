//! Line rendering system
//!
//! Runs once per surface per frame. For every entity carrying a
//! [`Transform`] and a [`LineRendererComponent`], and for every camera in
//! the scene, it records one line batch into the current surface's render
//! queue with the combined camera-view and entity-model matrix. Entities
//! without a material are skipped with a warning rather than aborting the
//! frame.

use crate::ecs::components::{LineRendererComponent, Transform};
use crate::ecs::{ComponentRegistry, EcsError, EntityId, Selector, System, SystemContext, UpdateMode};
use crate::render::LineBatch;

/// Records line draws for every renderable entity, per camera
#[derive(Debug, Default)]
pub struct LineRendererSystem;

impl LineRendererSystem {
    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl System for LineRendererSystem {
    fn update_mode(&self) -> UpdateMode {
        UpdateMode::Surface
    }

    fn selector(&self, registry: &mut ComponentRegistry) -> Result<Selector, EcsError> {
        Selector::of::<(Transform, LineRendererComponent)>(registry)
    }

    fn run(&mut self, entity: EntityId, ctx: &mut SystemContext<'_>) {
        let Some(record) = ctx.scene.entity(entity) else {
            return;
        };
        let Some(material) = record.materials.first().copied() else {
            log::warn!(
                "At entity \"{}\" #{}: Cannot render lines without a material!",
                record.name(),
                entity
            );
            return;
        };

        let (Some(transform), Some(lines)) = (
            ctx.scene.get_component::<Transform>(entity),
            ctx.scene.get_component::<LineRendererComponent>(entity),
        ) else {
            return;
        };

        let Some(surface) = ctx.surface.as_deref_mut() else {
            return;
        };

        let model = transform.borrow().model_matrix();
        for camera in ctx.cameras {
            let Some(camera_transform) = ctx.scene.get_component::<Transform>(*camera) else {
                continue;
            };
            let mvp = camera_transform.borrow().view_matrix() * model;

            let lines = lines.borrow();
            surface.queue_mut().submit(LineBatch {
                entity,
                material,
                mvp,
                vertices: lines.vertices.clone(),
                color: lines.color,
                line_width: lines.line_width,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use crate::ecs::components::Viewport;
    use crate::ecs::{Scene, SceneId, SystemManager};
    use crate::render::{Material, MaterialRegistry};
    use crate::surface::{Surface, SurfaceId};

    use super::*;

    struct Fixture {
        manager: SystemManager,
        scene: Scene,
        surface: Surface,
        materials: MaterialRegistry,
    }

    fn fixture() -> Fixture {
        let registry = Rc::new(RefCell::new(ComponentRegistry::new(32)));
        let mut manager = SystemManager::new(Rc::clone(&registry)).unwrap();
        let mut scene = Scene::new(SceneId(0), "test", registry);
        manager.attach_scene(&mut scene);
        manager.register(LineRendererSystem::new(), &[]).unwrap();
        Fixture {
            manager,
            scene,
            surface: Surface::new(SurfaceId(0), "test", 600, 600),
            materials: MaterialRegistry::new(),
        }
    }

    fn spawn_camera(scene: &mut Scene, position: Vector3<f32>) -> EntityId {
        let camera = scene.create_entity("Camera");
        let transform = scene.add_component::<Transform>(camera).unwrap();
        transform.borrow_mut().position = position;
        scene.add_component::<Viewport>(camera).unwrap();
        camera
    }

    #[test]
    fn test_records_one_batch_per_camera() {
        let mut f = fixture();
        spawn_camera(&mut f.scene, Vector3::zeros());
        spawn_camera(&mut f.scene, Vector3::new(1.0, 0.0, 0.0));

        let lines = f.scene.create_entity("Lines");
        f.scene.add_component::<Transform>(lines).unwrap();
        f.scene.add_component::<LineRendererComponent>(lines).unwrap();
        let material = f.materials.insert(Material::new("lines"));
        f.scene.entity_mut(lines).unwrap().materials.push(material);

        let mut scenes = [f.scene];
        let mut surfaces = [f.surface];
        f.manager.run_systems(&mut scenes, &mut surfaces);

        let batches = surfaces[0].queue().batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].entity, lines);
        assert_eq!(batches[0].material, material);
    }

    #[test]
    fn test_missing_material_skips_entity() {
        let mut f = fixture();
        spawn_camera(&mut f.scene, Vector3::zeros());

        let lines = f.scene.create_entity("Lines");
        f.scene.add_component::<Transform>(lines).unwrap();
        f.scene.add_component::<LineRendererComponent>(lines).unwrap();

        let mut scenes = [f.scene];
        let mut surfaces = [f.surface];
        f.manager.run_systems(&mut scenes, &mut surfaces);

        assert!(surfaces[0].queue().is_empty());
    }

    #[test]
    fn test_mvp_combines_camera_view_and_entity_model() {
        let mut f = fixture();
        spawn_camera(&mut f.scene, Vector3::new(2.0, 0.0, 0.0));

        let lines = f.scene.create_entity("Lines");
        let transform = f.scene.add_component::<Transform>(lines).unwrap();
        transform.borrow_mut().position = Vector3::new(5.0, 0.0, 0.0);
        f.scene.add_component::<LineRendererComponent>(lines).unwrap();
        let material = f.materials.insert(Material::new("lines"));
        f.scene.entity_mut(lines).unwrap().materials.push(material);

        let mut scenes = [f.scene];
        let mut surfaces = [f.surface];
        f.manager.run_systems(&mut scenes, &mut surfaces);

        // Model origin lands at x = 5 - 2 = 3 in camera space
        let mvp = surfaces[0].queue().batches()[0].mvp;
        let origin = mvp.transform_point(&nalgebra::Point3::origin());
        assert_relative_eq!(origin.x, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_default_geometry_is_carried_into_the_batch() {
        let mut f = fixture();
        spawn_camera(&mut f.scene, Vector3::zeros());

        let lines = f.scene.create_entity("Lines");
        f.scene.add_component::<Transform>(lines).unwrap();
        f.scene.add_component::<LineRendererComponent>(lines).unwrap();
        let material = f.materials.insert(Material::new("lines"));
        f.scene.entity_mut(lines).unwrap().materials.push(material);

        let mut scenes = [f.scene];
        let mut surfaces = [f.surface];
        f.manager.run_systems(&mut scenes, &mut surfaces);

        let batch = &surfaces[0].queue().batches()[0];
        assert_eq!(batch.vertices.len(), 24); // 8 xyz vertices
        assert_eq!(batch.line_width, 5.0);
    }
}
