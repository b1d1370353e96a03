//! Systems and system dispatch
//!
//! A system declares a selector over component types and receives every
//! matching entity once per frame (or once per rendering surface per
//! frame). Membership lists are maintained incrementally: the system
//! manager subscribes to every scene's signature-change funnel, and each
//! notification re-evaluates the selectors against the mutated entity.
//!
//! Camera tracking rides the same maintenance type as formal systems:
//! entities carrying both [`Transform`] and [`Viewport`] are kept in a
//! dedicated per-scene list that rendering systems read while they run.

use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::surface::Surface;

use super::components::{Transform, Viewport};
use super::{ComponentRegistry, EcsError, EntityId, Scene, SceneId, Selector, SignatureChange};

/// When a system's per-entity logic runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Once per frame-loop iteration
    Frame,
    /// Once per active rendering surface per frame
    Surface,
}

/// What a system sees while running over one entity
pub struct SystemContext<'a> {
    /// The scene the entity lives in
    pub scene: &'a mut Scene,
    /// Entities currently acting as cameras in this scene
    pub cameras: &'a [EntityId],
    /// The surface made current for this call (surface-mode systems only)
    pub surface: Option<&'a mut Surface>,
}

/// Per-frame processor over entities matching a selector
///
/// `run` is infallible at the dispatch boundary: a failure affecting one
/// entity must be logged and skipped inside the system so the frame loop
/// is never interrupted.
pub trait System {
    /// When this system's per-entity logic runs
    fn update_mode(&self) -> UpdateMode {
        UpdateMode::Frame
    }

    /// The component types an entity must carry to be processed
    fn selector(&self, registry: &mut ComponentRegistry) -> Result<Selector, EcsError>;

    /// Process one matching entity
    fn run(&mut self, entity: EntityId, ctx: &mut SystemContext<'_>);
}

/// One selector's per-scene membership lists, maintained incrementally
pub(crate) struct Membership {
    selector: Selector,
    lists: HashMap<SceneId, Vec<EntityId>>,
}

impl Membership {
    fn new(selector: Selector) -> Self {
        Self {
            selector,
            lists: HashMap::new(),
        }
    }

    /// Re-evaluate the selector against a mutated entity
    ///
    /// Idempotent: repeated notifications with an unchanged match result
    /// neither duplicate nor erroneously remove entries.
    fn apply(&mut self, change: &SignatureChange) {
        let list = self.lists.entry(change.scene).or_default();
        let matches = change.live && self.selector.matches(&change.signature);

        if matches {
            if !list.contains(&change.entity) {
                list.push(change.entity);
            }
        } else {
            list.retain(|entity| *entity != change.entity);
        }
    }

    /// Evaluate the selector against every pre-existing entity of a scene
    fn prime(&mut self, scene: &Scene) {
        let list = self.lists.entry(scene.id()).or_default();
        for entity in scene.entities() {
            if self.selector.matches(entity.signature()) && !list.contains(&entity.id()) {
                list.push(entity.id());
            }
        }
    }

    fn entities(&self, scene: SceneId) -> &[EntityId] {
        self.lists.get(&scene).map_or(&[], Vec::as_slice)
    }
}

struct ManagerInner {
    memberships: Vec<Membership>,
    cameras: Membership,
}

struct SystemSlot {
    type_id: TypeId,
    mode: UpdateMode,
    system: Box<dyn System>,
}

/// Registers systems and keeps their membership lists current
///
/// Each system type registers at most once. Membership state lives behind
/// a shared handle that scene funnels mutate synchronously, so lists are
/// already up to date when the mutating call returns.
pub struct SystemManager {
    registry: Rc<RefCell<ComponentRegistry>>,
    systems: Vec<SystemSlot>,
    inner: Rc<RefCell<ManagerInner>>,
}

impl SystemManager {
    pub(crate) fn new(registry: Rc<RefCell<ComponentRegistry>>) -> Result<Self, EcsError> {
        let cameras = Membership::new(Selector::of::<(Transform, Viewport)>(
            &mut registry.borrow_mut(),
        )?);
        Ok(Self {
            registry,
            systems: Vec::new(),
            inner: Rc::new(RefCell::new(ManagerInner {
                memberships: Vec::new(),
                cameras,
            })),
        })
    }

    /// Register a system, priming its membership against existing scenes
    ///
    /// Returns `false` when a system of the same type is already
    /// registered (registration is idempotent).
    pub(crate) fn register<S: System + 'static>(
        &mut self,
        system: S,
        scenes: &[Scene],
    ) -> Result<bool, EcsError> {
        let type_id = TypeId::of::<S>();
        if self.systems.iter().any(|slot| slot.type_id == type_id) {
            log::debug!(
                "System {} already registered, ignoring",
                std::any::type_name::<S>()
            );
            return Ok(false);
        }

        let selector = system.selector(&mut self.registry.borrow_mut())?;
        let mut membership = Membership::new(selector);
        for scene in scenes {
            membership.prime(scene);
        }

        self.inner.borrow_mut().memberships.push(membership);
        self.systems.push(SystemSlot {
            type_id,
            mode: system.update_mode(),
            system: Box::new(system),
        });
        log::debug!("System {} registered", std::any::type_name::<S>());
        Ok(true)
    }

    /// Wire a scene's signature-change funnel into membership maintenance
    /// and prime every list against the scene's existing entities
    pub(crate) fn attach_scene(&mut self, scene: &mut Scene) {
        let handle = Rc::clone(&self.inner);
        scene.on_signature_change(move |change| {
            let mut inner = handle.borrow_mut();
            for membership in &mut inner.memberships {
                membership.apply(change);
            }
            inner.cameras.apply(change);
        });

        let mut inner = self.inner.borrow_mut();
        for membership in &mut inner.memberships {
            membership.prime(scene);
        }
        inner.cameras.prime(scene);
    }

    /// Run every registered system, in registration order
    ///
    /// Frame-mode systems run once; surface-mode systems run once per
    /// surface with that surface handed to the context.
    pub(crate) fn run_systems(&mut self, scenes: &mut [Scene], surfaces: &mut [Surface]) {
        for (index, slot) in self.systems.iter_mut().enumerate() {
            match slot.mode {
                UpdateMode::Frame => {
                    Self::dispatch(&self.inner, index, slot.system.as_mut(), scenes, None);
                }
                UpdateMode::Surface => {
                    for surface in surfaces.iter_mut() {
                        Self::dispatch(
                            &self.inner,
                            index,
                            slot.system.as_mut(),
                            scenes,
                            Some(surface),
                        );
                    }
                }
            }
        }
    }

    fn dispatch(
        inner: &Rc<RefCell<ManagerInner>>,
        index: usize,
        system: &mut dyn System,
        scenes: &mut [Scene],
        mut surface: Option<&mut Surface>,
    ) {
        for scene in scenes.iter_mut() {
            let scene_id = scene.id();
            // Snapshot the lists so systems may freely mutate components
            // (and thus memberships) while running.
            let (entities, cameras) = {
                let inner = inner.borrow();
                (
                    inner.memberships[index].entities(scene_id).to_vec(),
                    inner.cameras.entities(scene_id).to_vec(),
                )
            };

            for entity in entities {
                // An earlier run this frame may have destroyed the entity
                if !scene.contains(entity) {
                    continue;
                }
                let mut ctx = SystemContext {
                    scene: &mut *scene,
                    cameras: &cameras,
                    surface: surface.as_deref_mut(),
                };
                system.run(entity, &mut ctx);
            }
        }
    }

    /// Entities currently acting as cameras in a scene
    pub fn cameras(&self, scene: SceneId) -> Vec<EntityId> {
        self.inner.borrow().cameras.entities(scene).to_vec()
    }

    /// The membership list of a registered system type for a scene
    pub fn entities_of<S: System + 'static>(&self, scene: SceneId) -> Vec<EntityId> {
        let type_id = TypeId::of::<S>();
        self.systems
            .iter()
            .position(|slot| slot.type_id == type_id)
            .map_or_else(Vec::new, |index| {
                self.inner.borrow().memberships[index].entities(scene).to_vec()
            })
    }

    /// Number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }
}

#[cfg(test)]
mod tests {
    use super::super::components::LineRendererComponent;
    use super::super::Component;
    use super::*;

    #[derive(Default)]
    struct Spin;
    impl Component for Spin {}

    struct SpinSystem {
        ran: Rc<RefCell<Vec<EntityId>>>,
    }

    impl System for SpinSystem {
        fn selector(&self, registry: &mut ComponentRegistry) -> Result<Selector, EcsError> {
            Selector::of::<(Transform, Spin)>(registry)
        }

        fn run(&mut self, entity: EntityId, _ctx: &mut SystemContext<'_>) {
            self.ran.borrow_mut().push(entity);
        }
    }

    fn fixture() -> (Rc<RefCell<ComponentRegistry>>, SystemManager, Scene) {
        let registry = Rc::new(RefCell::new(ComponentRegistry::new(32)));
        let mut manager = SystemManager::new(Rc::clone(&registry)).unwrap();
        let mut scene = Scene::new(SceneId(0), "test", Rc::clone(&registry));
        manager.attach_scene(&mut scene);
        (registry, manager, scene)
    }

    #[test]
    fn test_membership_tracks_signature_changes() {
        let (_registry, mut manager, mut scene) = fixture();
        let ran = Rc::new(RefCell::new(Vec::new()));
        manager
            .register(SpinSystem { ran: Rc::clone(&ran) }, &[])
            .unwrap();

        let entity = scene.create_entity("B");
        scene.add_component::<Transform>(entity).unwrap();
        assert!(manager.entities_of::<SpinSystem>(scene.id()).is_empty());

        scene.add_component::<Spin>(entity).unwrap();
        assert_eq!(manager.entities_of::<SpinSystem>(scene.id()), vec![entity]);

        scene.destroy_entity(entity).unwrap();
        assert!(manager.entities_of::<SpinSystem>(scene.id()).is_empty());
    }

    #[test]
    fn test_registration_is_idempotent() {
        let (_registry, mut manager, _scene) = fixture();
        let ran = Rc::new(RefCell::new(Vec::new()));
        assert!(manager
            .register(SpinSystem { ran: Rc::clone(&ran) }, &[])
            .unwrap());
        assert!(!manager
            .register(SpinSystem { ran: Rc::clone(&ran) }, &[])
            .unwrap());
        assert_eq!(manager.system_count(), 1);
    }

    #[test]
    fn test_repeated_notifications_do_not_duplicate() {
        let (_registry, mut manager, mut scene) = fixture();
        let ran = Rc::new(RefCell::new(Vec::new()));
        manager
            .register(SpinSystem { ran: Rc::clone(&ran) }, &[])
            .unwrap();

        let entity = scene.create_entity("B");
        scene.add_component::<Transform>(entity).unwrap();
        scene.add_component::<Spin>(entity).unwrap();

        // Unrelated mutations re-notify; the match result is unchanged
        scene.add_component::<LineRendererComponent>(entity).unwrap();
        scene.remove_component::<LineRendererComponent>(entity).unwrap();

        assert_eq!(manager.entities_of::<SpinSystem>(scene.id()), vec![entity]);
    }

    #[test]
    fn test_priming_covers_preexisting_entities() {
        let registry = Rc::new(RefCell::new(ComponentRegistry::new(32)));
        let mut scene = Scene::new(SceneId(0), "test", Rc::clone(&registry));
        let entity = scene.create_entity("Old");
        scene.add_component::<Transform>(entity).unwrap();
        scene.add_component::<Spin>(entity).unwrap();

        // Manager arrives after the entity already exists
        let mut manager = SystemManager::new(Rc::clone(&registry)).unwrap();
        let ran = Rc::new(RefCell::new(Vec::new()));
        manager
            .register(SpinSystem { ran: Rc::clone(&ran) }, &[])
            .unwrap();
        manager.attach_scene(&mut scene);

        assert_eq!(manager.entities_of::<SpinSystem>(scene.id()), vec![entity]);
    }

    #[test]
    fn test_camera_list_requires_transform_and_viewport() {
        let (_registry, manager, mut scene) = fixture();

        let camera = scene.create_entity("Camera");
        scene.add_component::<Transform>(camera).unwrap();
        assert!(manager.cameras(scene.id()).is_empty());

        scene.add_component::<Viewport>(camera).unwrap();
        assert_eq!(manager.cameras(scene.id()), vec![camera]);

        scene.remove_component::<Viewport>(camera).unwrap();
        assert!(manager.cameras(scene.id()).is_empty());
    }

    #[test]
    fn test_frame_dispatch_runs_matching_entities() {
        let (_registry, mut manager, mut scene) = fixture();
        let ran = Rc::new(RefCell::new(Vec::new()));
        manager
            .register(SpinSystem { ran: Rc::clone(&ran) }, &[])
            .unwrap();

        let a = scene.create_entity("A");
        scene.add_component::<Transform>(a).unwrap();
        scene.add_component::<Spin>(a).unwrap();
        let b = scene.create_entity("B");
        scene.add_component::<Transform>(b).unwrap();

        let mut scenes = [scene];
        manager.run_systems(&mut scenes, &mut []);
        assert_eq!(*ran.borrow(), vec![a]);

        manager.run_systems(&mut scenes, &mut []);
        assert_eq!(*ran.borrow(), vec![a, a]);
    }
}
