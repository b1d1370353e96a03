//! Materials as opaque handles
//!
//! Entities store zero or more material handles; rendering systems use
//! the first one and skip the entity when the list is empty. Shader
//! compilation and GPU program state live in the backend, outside the
//! engine core.

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Handle to a material owned by the engine's registry
    pub struct MaterialId;
}

/// A named render material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    name: String,
}

impl Material {
    /// Create a material
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The material's display name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Owns every material and hands out stable handles
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: SlotMap<MaterialId, Material>,
}

impl MaterialRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and return its handle
    pub fn insert(&mut self, material: Material) -> MaterialId {
        self.materials.insert(material)
    }

    /// Look up a material by handle
    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Remove a material; existing handles become dangling
    pub fn remove(&mut self, id: MaterialId) -> Option<Material> {
        self.materials.remove(id)
    }

    /// Number of registered materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether no material is registered
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
