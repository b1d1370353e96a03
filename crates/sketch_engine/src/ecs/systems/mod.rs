//! Built-in systems

mod line_renderer;

pub use line_renderer::LineRendererSystem;
