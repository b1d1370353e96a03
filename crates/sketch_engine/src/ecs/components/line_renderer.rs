//! Line rendering parameters component

use crate::ecs::Component;
use crate::render::Color;

/// Line geometry and styling for an entity
///
/// Vertices are packed xyz triples in model space. The default is the
/// outline of a square with 0.25 half-extent.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRendererComponent {
    /// Packed xyz line-segment endpoints
    pub vertices: Vec<f32>,
    /// Solid line color
    pub color: Color,
    /// Line width in pixels
    pub line_width: f32,
}

impl Default for LineRendererComponent {
    fn default() -> Self {
        Self {
            vertices: vec![
                -0.25, -0.25, 0.0,
                -0.25, 0.25, 0.0,
                -0.25, 0.25, 0.0,
                0.25, 0.25, 0.0,
                0.25, 0.25, 0.0,
                0.25, -0.25, 0.0,
                0.25, -0.25, 0.0,
                -0.25, -0.25, 0.0,
            ],
            color: Color::default(),
            line_width: 5.0,
        }
    }
}

impl Component for LineRendererComponent {}

impl LineRendererComponent {
    /// Number of line vertices (xyz triples)
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }
}
