//! Built-in components
//!
//! Plain data records: a spatial transform, a camera viewport, and line
//! rendering parameters.

pub mod line_renderer;
pub mod transform;
pub mod viewport;

pub use line_renderer::LineRendererComponent;
pub use transform::Transform;
pub use viewport::{Rect, Viewport};
