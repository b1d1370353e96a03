//! Entity selectors
//!
//! A selector is a conjunction over a set of required component types:
//! it matches an entity iff the entity's signature has every required
//! type's bit set. Selectors are evaluated on every signature-change
//! notification for every registered system, so matching is nothing more
//! than a subset test over signature blocks.

use super::{Component, ComponentRegistry, EcsError, Signature};

/// A predicate requiring a set of component types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    required: Signature,
}

impl Selector {
    /// Build a selector requiring every type in the tuple `S`
    ///
    /// ```
    /// # use sketch_engine::ecs::{ComponentRegistry, Selector, Component};
    /// # #[derive(Default)] struct Transform; impl Component for Transform {}
    /// # #[derive(Default)] struct Viewport; impl Component for Viewport {}
    /// let mut registry = ComponentRegistry::new(32);
    /// let cameras = Selector::of::<(Transform, Viewport)>(&mut registry).unwrap();
    /// ```
    pub fn of<S: ComponentSet>(registry: &mut ComponentRegistry) -> Result<Self, EcsError> {
        Ok(Self {
            required: S::signature(registry)?,
        })
    }

    /// Whether a signature carries every required type
    pub fn matches(&self, signature: &Signature) -> bool {
        signature.contains_all(&self.required)
    }

    /// The required-type bitset
    pub fn required(&self) -> &Signature {
        &self.required
    }
}

/// A compile-time list of component types, used to build selectors
pub trait ComponentSet {
    /// The combined signature of every type in the set
    fn signature(registry: &mut ComponentRegistry) -> Result<Signature, EcsError>;
}

macro_rules! impl_component_set {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            fn signature(registry: &mut ComponentRegistry) -> Result<Signature, EcsError> {
                let mut signature = Signature::new();
                $(signature.set(registry.id_of::<$name>()?.bit());)+
                Ok(signature)
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
