//! Rendering resources and the line-batch queue
//!
//! GPU work is outside the engine core: materials are opaque handles and
//! surfaces collect [`LineBatch`] records into a [`RenderQueue`] that a
//! backend (or a test) drains at present time.

pub mod material;
pub mod queue;

pub use material::{Material, MaterialId, MaterialRegistry};
pub use queue::{LineBatch, RenderQueue};

/// A solid RGB color
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red channel, 0.0..=1.0
    pub r: f32,
    /// Green channel, 0.0..=1.0
    pub g: f32,
    /// Blue channel, 0.0..=1.0
    pub b: f32,
}

impl Color {
    /// Opaque black; the default line color
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Opaque white
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Create a color from RGB channels
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}
