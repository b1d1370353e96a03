//! Camera viewport component

use crate::ecs::Component;

/// Axis-aligned rectangle in normalized surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Marks an entity as a view/projection source
///
/// An entity carrying both [`Transform`](super::Transform) and `Viewport`
/// enters the camera list consumed by rendering systems.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// The camera's viewport rectangle
    pub rect: Rect,
}

impl Component for Viewport {}
