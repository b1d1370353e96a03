//! Scenes: entity registries with pooled component storage
//!
//! A scene owns its live entities, one lazily-created pool per component
//! type, one garbage collector per type that has ever been attached, and
//! the signature-change event bus that keeps system membership lists
//! synchronized. Every mutation notifies subscribers before it returns.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::events::EventBus;

use super::component::ComponentRef;
use super::entity::IdAllocator;
use super::{
    Collector, Component, ComponentPool, ComponentRegistry, ComponentTypeId, EcsError, Entity,
    EntityId, GarbageCollector, Signature,
};

/// Identity of a scene within one engine context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(pub(crate) usize);

impl SceneId {
    /// The raw scene index
    pub fn index(self) -> usize {
        self.0
    }
}

/// Notification fired whenever an entity's component set changes
///
/// Carries a snapshot of the signature taken after the mutation. `live`
/// is false exactly once per entity, on destruction.
#[derive(Debug, Clone)]
pub struct SignatureChange {
    /// Scene the entity belongs to
    pub scene: SceneId,
    /// The mutated entity
    pub entity: EntityId,
    /// The entity's signature after the mutation
    pub signature: Signature,
    /// Whether the entity is still part of the scene's live set
    pub live: bool,
}

/// A collection of live entities and their pooled components
pub struct Scene {
    id: SceneId,
    name: String,
    registry: Rc<RefCell<ComponentRegistry>>,
    entities: Vec<Entity>,
    allocator: IdAllocator,
    pools: HashMap<ComponentTypeId, Rc<dyn Any>>,
    collectors: HashMap<ComponentTypeId, Box<dyn Collector>>,
    collector_signature: Signature,
    events: EventBus<SignatureChange>,
}

impl Scene {
    pub(crate) fn new(
        id: SceneId,
        name: impl Into<String>,
        registry: Rc<RefCell<ComponentRegistry>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            registry,
            entities: Vec::new(),
            allocator: IdAllocator::default(),
            pools: HashMap::new(),
            collectors: HashMap::new(),
            collector_signature: Signature::new(),
            events: EventBus::new(),
        }
    }

    /// The scene's id
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// The scene's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a new entity registered with this scene
    pub fn create_entity(&mut self, name: impl Into<String>) -> EntityId {
        let id = self.allocator.allocate();
        let entity = Entity::new(id, name);
        log::debug!("Entity \"{}\" #{} created.", entity.name(), id);
        self.entities.push(entity);
        id
    }

    /// The live entity with this id, if any
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id() == id)
    }

    /// Mutable access to a live entity (name, materials)
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id() == id)
    }

    /// Iterate the live entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Whether this id refers to a live entity
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|entity| entity.id() == id)
    }

    /// Subscribe to signature-change notifications
    ///
    /// Subscribers run synchronously, in registration order, before the
    /// mutating call returns.
    pub fn on_signature_change(&mut self, subscriber: impl FnMut(&SignatureChange) + 'static) {
        self.events.subscribe(subscriber);
    }

    /// Attach a default-constructed component of type `T` to `entity`
    ///
    /// At most one instance per type per entity: a second add without an
    /// intervening remove fails with
    /// [`EcsError::ComponentAlreadyPresent`]. On success the scene also
    /// ensures a garbage collector exists for `T`, sets the signature
    /// bit, and emits a signature-change notification. The returned
    /// handle is usable immediately.
    pub fn add_component<T: Component>(
        &mut self,
        entity: EntityId,
    ) -> Result<ComponentRef<T>, EcsError> {
        let type_id = self.registry.borrow_mut().id_of::<T>()?;
        let bit = type_id.bit();
        let index = self
            .index_of(entity)
            .ok_or(EcsError::UnknownEntity(entity))?;

        if self.entities[index].signature.test(bit) {
            return Err(EcsError::ComponentAlreadyPresent {
                entity,
                type_name: std::any::type_name::<T>(),
            });
        }

        let pool = self.pool::<T>(type_id);

        if !self.collector_signature.test(bit) {
            self.collectors
                .insert(type_id, Box::new(GarbageCollector::new(type_id, Rc::clone(&pool))));
            self.collector_signature.set(bit);
        }

        let component = Rc::new(RefCell::new(T::default()));
        pool.borrow_mut().push(entity, Rc::clone(&component));
        self.entities[index].signature.set(bit);

        let signature = self.entities[index].signature.clone();
        self.emit_change(entity, signature, true);

        Ok(component)
    }

    /// The component of type `T` attached to `entity`, if any
    ///
    /// Returns `None` when the signature bit is unset. A set bit with no
    /// pooled instance is an invariant violation; it is logged and
    /// reported as `None`.
    pub fn get_component<T: Component>(&self, entity: EntityId) -> Option<ComponentRef<T>> {
        let type_id = self.registry.borrow().lookup::<T>()?;
        let record = self.entity(entity)?;
        if !record.signature.test(type_id.bit()) {
            return None;
        }

        let pool = self.pools.get(&type_id)?;
        let pool = pool.downcast_ref::<RefCell<ComponentPool<T>>>()?;
        let found = pool.borrow().find(entity);
        if found.is_none() {
            log::warn!(
                "Signature bit {} is set for entity #{} but the {} pool has no instance",
                type_id,
                entity,
                std::any::type_name::<T>()
            );
        }
        found
    }

    /// Detach the component of type `T` from `entity`
    ///
    /// Fails with [`EcsError::ComponentNotFound`] when the signature bit
    /// is unset. Clears the bit and emits a signature-change notification
    /// before returning.
    pub fn remove_component<T: Component>(&mut self, entity: EntityId) -> Result<(), EcsError> {
        let type_name = std::any::type_name::<T>();
        let type_id = self.registry.borrow_mut().id_of::<T>()?;
        let bit = type_id.bit();
        let index = self
            .index_of(entity)
            .ok_or(EcsError::UnknownEntity(entity))?;

        if !self.entities[index].signature.test(bit) {
            return Err(EcsError::ComponentNotFound { entity, type_name });
        }

        let pool = self.pool::<T>(type_id);
        let removed = pool.borrow_mut().remove(entity);

        self.entities[index].signature.clear(bit);
        let signature = self.entities[index].signature.clone();
        self.emit_change(entity, signature, true);

        if removed {
            Ok(())
        } else {
            Err(EcsError::PoolOutOfSync { entity, type_name })
        }
    }

    /// Whether `entity` carries a component of type `T`
    ///
    /// Pure signature bit test, no side effects.
    pub fn has_component<T: Component>(&self, entity: EntityId) -> bool {
        let Some(type_id) = self.registry.borrow().lookup::<T>() else {
            return false;
        };
        self.entity(entity)
            .is_some_and(|record| record.signature.test(type_id.bit()))
    }

    /// Destroy `entity`
    ///
    /// Clears the signature and notifies subscribers (so every system
    /// sees a zero match immediately), removes the entity from the live
    /// set, garbage-collects every component the entity carried, and
    /// releases the id for reuse.
    pub fn destroy_entity(&mut self, entity: EntityId) -> Result<(), EcsError> {
        let index = self
            .index_of(entity)
            .ok_or(EcsError::UnknownEntity(entity))?;

        let old_signature = std::mem::take(&mut self.entities[index].signature);
        self.emit_change(entity, Signature::new(), false);

        let removed = self.entities.remove(index);
        for bit in old_signature.iter_ones() {
            if let Some(collector) = self.collectors.get_mut(&ComponentTypeId::from_bit(bit)) {
                collector.collect(entity);
            }
        }
        self.allocator.free(entity);
        log::debug!("Entity \"{}\" #{} destroyed.", removed.name(), entity);
        Ok(())
    }

    /// Whether the pool for `T` holds an instance owned by `entity`
    ///
    /// Scans the pool directly, ignoring the signature; mainly useful for
    /// verifying garbage collection.
    pub fn pool_contains<T: Component>(&self, entity: EntityId) -> bool {
        let Some(type_id) = self.registry.borrow().lookup::<T>() else {
            return false;
        };
        self.pools
            .get(&type_id)
            .and_then(|pool| pool.downcast_ref::<RefCell<ComponentPool<T>>>())
            .is_some_and(|pool| pool.borrow().contains(entity))
    }

    /// Number of live instances in the pool for `T`
    pub fn component_count<T: Component>(&self) -> usize {
        let Some(type_id) = self.registry.borrow().lookup::<T>() else {
            return 0;
        };
        self.pools
            .get(&type_id)
            .and_then(|pool| pool.downcast_ref::<RefCell<ComponentPool<T>>>())
            .map_or(0, |pool| pool.borrow().len())
    }

    fn index_of(&self, entity: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == entity)
    }

    /// The pool for `T`, created and cached on first access
    fn pool<T: Component>(&mut self, type_id: ComponentTypeId) -> Rc<RefCell<ComponentPool<T>>> {
        if let Some(existing) = self.pools.get(&type_id) {
            // Pool entries are keyed by ids unique per Rust type, so the
            // downcast at this single access point cannot fail.
            return Rc::clone(existing)
                .downcast::<RefCell<ComponentPool<T>>>()
                .expect("component pool type matches its registered id");
        }

        let pool = Rc::new(RefCell::new(ComponentPool::<T>::new()));
        self.pools
            .insert(type_id, Rc::clone(&pool) as Rc<dyn Any>);
        pool
    }

    fn emit_change(&mut self, entity: EntityId, signature: Signature, live: bool) {
        let change = SignatureChange {
            scene: self.id,
            entity,
            signature,
            live,
        };
        self.events.emit(&change);
    }
}
