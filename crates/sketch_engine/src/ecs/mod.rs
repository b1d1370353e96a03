//! Entity-Component-System core
//!
//! Entities are numeric ids with a signature bitset; components live in
//! per-type pools owned by a [`Scene`]; systems keep per-scene membership
//! lists current by subscribing to the scene's signature-change funnel.
//!
//! All notification dispatch is synchronous: by the time an
//! `add_component` / `remove_component` / `destroy_entity` call returns,
//! every registered system has already re-evaluated its selector against
//! the mutated entity.

pub mod component;
pub mod components;
pub mod entity;
pub mod garbage;
pub mod scene;
pub mod selector;
pub mod signature;
pub mod system;
pub mod systems;

pub use component::{Component, ComponentPool, ComponentRef, ComponentRegistry, ComponentTypeId};
pub use entity::{Entity, EntityId};
pub use garbage::{Collector, GarbageCollector};
pub use scene::{Scene, SceneId, SignatureChange};
pub use selector::{ComponentSet, Selector};
pub use signature::Signature;
pub use system::{System, SystemContext, SystemManager, UpdateMode};

use thiserror::Error;

/// Errors from ECS operations
///
/// Precondition violations are explicit results here, not assertions:
/// adding a duplicate component, removing an absent one, or overflowing
/// the component-type capacity all come back as values the caller can
/// inspect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity already carries a component of this type
    #[error("component {type_name} already present on entity #{entity}")]
    ComponentAlreadyPresent {
        /// Owning entity
        entity: EntityId,
        /// Component type name
        type_name: &'static str,
    },

    /// The entity does not carry a component of this type
    #[error("component {type_name} not present on entity #{entity}")]
    ComponentNotFound {
        /// Owning entity
        entity: EntityId,
        /// Component type name
        type_name: &'static str,
    },

    /// The signature bit is set but the pool has no matching entry
    ///
    /// This indicates a broken invariant between an entity's signature and
    /// its component pools; it should not occur under correct usage.
    #[error("pool for {type_name} has no entry for entity #{entity} despite a set signature bit")]
    PoolOutOfSync {
        /// Owning entity
        entity: EntityId,
        /// Component type name
        type_name: &'static str,
    },

    /// No live entity with this id exists in the scene
    #[error("unknown entity #{0}")]
    UnknownEntity(EntityId),

    /// Too many distinct component types for the configured capacity
    #[error("component type capacity exceeded ({capacity} types)")]
    TypeCapacityExceeded {
        /// The configured maximum
        capacity: usize,
    },
}
