//! Spatial transform component

use nalgebra::{Matrix4, Vector3};

use crate::ecs::Component;

/// Position and scale of an entity
///
/// Doubles as the view source when the entity is a camera: the view
/// matrix is the inverse of the camera's own transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// World position
    pub position: Vector3<f32>,
    /// Per-axis scale
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Component for Transform {}

impl Transform {
    /// The model matrix: translation times scale
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.position) * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// The view matrix when this transform belongs to a camera
    ///
    /// Inverse scale then inverse translation; a larger camera scale
    /// zooms the view out.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let inverse_scale = Vector3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        Matrix4::new_nonuniform_scaling(&inverse_scale) * Matrix4::new_translation(&-self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_default_is_identity() {
        let transform = Transform::default();
        assert_relative_eq!(transform.model_matrix(), Matrix4::identity());
        assert_relative_eq!(transform.view_matrix(), Matrix4::identity());
    }

    #[test]
    fn test_model_matrix_applies_scale_then_translation() {
        let transform = Transform {
            position: Vector3::new(1.0, 2.0, 0.0),
            scale: Vector3::new(2.0, 2.0, 2.0),
        };
        let point = transform.model_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(point, Point3::new(3.0, 2.0, 0.0));
    }

    #[test]
    fn test_view_inverts_model() {
        let transform = Transform {
            position: Vector3::new(-3.0, 0.5, 1.0),
            scale: Vector3::new(2.0, 4.0, 1.0),
        };
        let round_trip = transform.view_matrix() * transform.model_matrix();
        assert_relative_eq!(round_trip, Matrix4::identity(), epsilon = 1e-5);
    }
}
