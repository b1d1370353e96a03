//! Per-type garbage collectors
//!
//! When an entity is destroyed, its components must leave their pools.
//! Each scene keeps exactly one collector per component type that has
//! ever been attached there, bound to that type's pool at registration.
//! Collectors are stored type-erased so entity destruction can walk them
//! without knowing any concrete component type.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Component, ComponentPool, ComponentTypeId, EntityId};

/// Type-erased view of a garbage collector
pub trait Collector {
    /// Remove `entity`'s component of this collector's type from its pool
    ///
    /// Returns whether anything was removed. A missing entry is tolerated:
    /// destruction may follow an earlier explicit removal, so cleanup is
    /// idempotent. The no-op case is logged at debug level to keep
    /// double-removals visible in traces.
    fn collect(&mut self, entity: EntityId) -> bool;
}

/// Removes orphaned components of one type from its pool
pub struct GarbageCollector<T: Component> {
    type_id: ComponentTypeId,
    pool: Rc<RefCell<ComponentPool<T>>>,
}

impl<T: Component> GarbageCollector<T> {
    /// Bind a collector to its component type's pool
    pub fn new(type_id: ComponentTypeId, pool: Rc<RefCell<ComponentPool<T>>>) -> Self {
        Self { type_id, pool }
    }
}

impl<T: Component> Collector for GarbageCollector<T> {
    fn collect(&mut self, entity: EntityId) -> bool {
        let removed = self.pool.borrow_mut().remove(entity);
        if removed {
            log::debug!("Collected component #{} for entity #{}", self.type_id, entity);
        } else {
            log::debug!(
                "Nothing to collect for component #{} on entity #{}",
                self.type_id,
                entity
            );
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Marker;
    impl Component for Marker {}

    #[test]
    fn test_collect_removes_matching_entry() {
        let pool = Rc::new(RefCell::new(ComponentPool::<Marker>::new()));
        let owner = EntityId::new(1);
        pool.borrow_mut()
            .push(owner, Rc::new(RefCell::new(Marker)));

        let mut collector = GarbageCollector::new(ComponentTypeId::from_bit(0), Rc::clone(&pool));
        assert!(collector.collect(owner));
        assert!(pool.borrow().is_empty());
    }

    #[test]
    fn test_collect_missing_entry_is_noop() {
        let pool = Rc::new(RefCell::new(ComponentPool::<Marker>::new()));
        let mut collector = GarbageCollector::new(ComponentTypeId::from_bit(0), Rc::clone(&pool));

        assert!(!collector.collect(EntityId::new(9)));
        assert!(!collector.collect(EntityId::new(9))); // idempotent
    }

    #[test]
    fn test_collect_leaves_other_owners_alone() {
        let pool = Rc::new(RefCell::new(ComponentPool::<Marker>::new()));
        let a = EntityId::new(1);
        let b = EntityId::new(2);
        pool.borrow_mut().push(a, Rc::new(RefCell::new(Marker)));
        pool.borrow_mut().push(b, Rc::new(RefCell::new(Marker)));

        let mut collector = GarbageCollector::new(ComponentTypeId::from_bit(3), Rc::clone(&pool));
        collector.collect(a);

        assert!(!pool.borrow().contains(a));
        assert!(pool.borrow().contains(b));
    }
}
