use nalgebra::Point3;

mod model_transform;
mod perspective_camera;

pub use model_transform::ModelTransform;
pub use perspective_camera::{PerspectiveCamera, DEFAULT_FOV_Y};

/// Camera together with the model transform of the viewed volume.
///
/// Everything the ray setup needs to know about the scene pose.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub camera: PerspectiveCamera,
    pub model: ModelTransform,
}

impl CameraState {
    pub fn new(camera: PerspectiveCamera, model: ModelTransform) -> CameraState {
        CameraState { camera, model }
    }

    /// Camera position in the volume's object space.
    ///
    /// Derived on every call, so it is never stale after the camera or the model moves.
    /// `None` if the model transform is not invertible.
    pub fn object_space_position(&self) -> Option<Point3<f32>> {
        self.model.to_object_space(&self.camera.get_pos())
    }
}
