use nalgebra::{vector, Matrix4, Point3, UnitQuaternion, Vector3};

/// Placement of the volume in the world.
///
/// Applied as `translation * rotation * scale`, the volume's object space
/// spans roughly `<-0.5;0.5>` on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    pub translation: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub scale: Vector3<f32>,
}

impl ModelTransform {
    pub fn new(
        translation: Vector3<f32>,
        rotation: UnitQuaternion<f32>,
        scale: Vector3<f32>,
    ) -> ModelTransform {
        ModelTransform {
            translation,
            rotation,
            scale,
        }
    }

    pub fn identity() -> ModelTransform {
        ModelTransform {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: vector![1.0, 1.0, 1.0],
        }
    }

    /// Rotation given as XYZ Euler angles, in degrees
    pub fn with_euler_deg(mut self, roll: f32, pitch: f32, yaw: f32) -> ModelTransform {
        self.rotation = UnitQuaternion::from_euler_angles(
            roll.to_radians(),
            pitch.to_radians(),
            yaw.to_radians(),
        );
        self
    }

    /// Object space -> world space
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.translation)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// World space -> object space.
    ///
    /// Composed from the inverted parts, no general matrix inversion.
    /// `None` if any scale component is zero or not finite.
    pub fn inverse_matrix(&self) -> Option<Matrix4<f32>> {
        if self.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return None;
        }
        let inv_scale = self.scale.map(|s| 1.0 / s);
        Some(
            Matrix4::new_nonuniform_scaling(&inv_scale)
                * self.rotation.inverse().to_homogeneous()
                * Matrix4::new_translation(&-self.translation),
        )
    }

    /// Transform world space point into object space
    pub fn to_object_space(&self, point: &Point3<f32>) -> Option<Point3<f32>> {
        self.inverse_matrix().map(|m| m.transform_point(point))
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::identity()
    }
}
