//! Per-surface line-batch queue

use nalgebra::Matrix4;

use crate::ecs::EntityId;

use super::{Color, MaterialId};

/// One line draw, recorded once per (entity, camera) pair
#[derive(Debug, Clone, PartialEq)]
pub struct LineBatch {
    /// Entity the lines belong to
    pub entity: EntityId,
    /// Material used for the draw
    pub material: MaterialId,
    /// Combined model-view matrix for this camera
    pub mvp: Matrix4<f32>,
    /// Packed xyz line-segment endpoints in model space
    pub vertices: Vec<f32>,
    /// Solid line color
    pub color: Color,
    /// Line width in pixels
    pub line_width: f32,
}

/// Frame-local collection of recorded line draws
///
/// Surface-mode systems submit into the active surface's queue; the
/// present step drains it once per frame.
#[derive(Debug, Default)]
pub struct RenderQueue {
    batches: Vec<LineBatch>,
}

impl RenderQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a line draw
    pub fn submit(&mut self, batch: LineBatch) {
        self.batches.push(batch);
    }

    /// The draws recorded so far this frame
    pub fn batches(&self) -> &[LineBatch] {
        &self.batches
    }

    /// Take every recorded draw, leaving the queue empty
    pub fn drain(&mut self) -> Vec<LineBatch> {
        std::mem::take(&mut self.batches)
    }

    /// Number of recorded draws
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
