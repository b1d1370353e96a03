//! Component trait, type identity, and pooled storage
//!
//! Every distinct component type gets a small numeric id on first use,
//! assigned by an explicit [`ComponentRegistry`] owned by the engine and
//! shared with its scenes. The id doubles as the type's bit position in
//! entity signatures and as the pool lookup key.

use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{EcsError, EntityId};

/// Marker trait for components
///
/// Components are plain data records, default-constructed when attached.
pub trait Component: Default + 'static {}

/// Identity of a component type within one registry
///
/// Stable for the registry's lifetime; allocated in first-use order,
/// monotonically increasing from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentTypeId(u32);

impl ComponentTypeId {
    /// The signature bit index for this type
    pub fn bit(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_bit(bit: usize) -> Self {
        Self(bit as u32)
    }
}

impl std::fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Assigns and remembers per-type component ids
///
/// One registry exists per engine context and is handed to scenes and the
/// system manager explicitly, so component ids and selector bits agree
/// everywhere without process-wide state.
#[derive(Debug)]
pub struct ComponentRegistry {
    ids: HashMap<TypeId, ComponentTypeId>,
    names: Vec<&'static str>,
    capacity: usize,
}

impl ComponentRegistry {
    /// Create a registry allowing at most `capacity` distinct types
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: HashMap::new(),
            names: Vec::new(),
            capacity,
        }
    }

    /// The id for `T`, assigning one on first use
    ///
    /// Repeated calls with the same type always return the same id.
    pub fn id_of<T: Component>(&mut self) -> Result<ComponentTypeId, EcsError> {
        if let Some(id) = self.ids.get(&TypeId::of::<T>()) {
            return Ok(*id);
        }

        if self.names.len() >= self.capacity {
            return Err(EcsError::TypeCapacityExceeded {
                capacity: self.capacity,
            });
        }

        let id = ComponentTypeId(self.names.len() as u32);
        self.names.push(std::any::type_name::<T>());
        self.ids.insert(TypeId::of::<T>(), id);
        log::debug!(
            "Component type {} assigned id {}",
            std::any::type_name::<T>(),
            id
        );
        Ok(id)
    }

    /// The id for `T` if it has already been assigned
    pub fn lookup<T: Component>(&self) -> Option<ComponentTypeId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Type name for a known id
    pub fn name_of(&self, id: ComponentTypeId) -> Option<&'static str> {
        self.names.get(id.0 as usize).copied()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no type has been registered yet
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The configured maximum number of distinct types
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Shared handle to one component instance
///
/// Ownership is shared between the pool and any in-flight references
/// returned to callers; the instance stays usable even after it leaves
/// its pool.
pub type ComponentRef<T> = Rc<RefCell<T>>;

struct PoolEntry<T> {
    owner: EntityId,
    data: ComponentRef<T>,
}

/// Densely packed storage for every live instance of one component type
///
/// Order is not significant; lookups are linear scans over owner ids.
pub struct ComponentPool<T: Component> {
    entries: Vec<PoolEntry<T>>,
}

impl<T: Component> Default for ComponentPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ComponentPool<T> {
    /// Create an empty pool
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an instance owned by `owner`
    pub fn push(&mut self, owner: EntityId, data: ComponentRef<T>) {
        self.entries.push(PoolEntry { owner, data });
    }

    /// The first instance owned by `owner`, if any
    pub fn find(&self, owner: EntityId) -> Option<ComponentRef<T>> {
        self.entries
            .iter()
            .find(|entry| entry.owner == owner)
            .map(|entry| Rc::clone(&entry.data))
    }

    /// Remove the first instance owned by `owner`
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, owner: EntityId) -> bool {
        match self.entries.iter().position(|entry| entry.owner == owner) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether `owner` has an instance in this pool
    pub fn contains(&self, owner: EntityId) -> bool {
        self.entries.iter().any(|entry| entry.owner == owner)
    }

    /// Iterate `(owner, instance)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, ComponentRef<T>)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.owner, Rc::clone(&entry.data)))
    }

    /// Number of live instances
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool holds no instances
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
