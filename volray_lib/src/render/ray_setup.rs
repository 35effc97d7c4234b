use nalgebra::{vector, Matrix4, Point3, Vector2};

use crate::{camera::CameraState, common::Ray};

/// Pixel center to normalized device coordinates.
///
/// Result is in `<-1;1>`. Buffer row 0 is the top of the image, `uv.y` points up.
pub fn pixel_to_uv(x: u16, y: u16, resolution: Vector2<u16>) -> Vector2<f32> {
    let (w, h) = (resolution.x as f32, resolution.y as f32);
    let u = 2.0 * (x as f32 + 0.5) / w - 1.0;
    let v = 2.0 * (y as f32 + 0.5) / h - 1.0;
    vector![u, -v]
}

/// Per frame ray generator.
///
/// Holds everything that is constant over a frame: the world to object matrix
/// and the camera position in object space.
pub struct RaySetup<'a> {
    state: &'a CameraState,
    resolution: Vector2<u16>,
    world_to_object: Matrix4<f32>,
    origin: Point3<f32>,
}

impl<'a> RaySetup<'a> {
    /// `None` if the model transform cannot be inverted
    pub fn new(state: &'a CameraState, resolution: Vector2<u16>) -> Option<RaySetup<'a>> {
        let world_to_object = state.model.inverse_matrix()?;
        let origin = world_to_object.transform_point(&state.camera.get_pos());
        Some(RaySetup {
            state,
            resolution,
            world_to_object,
            origin,
        })
    }

    /// Camera position in object space
    pub fn origin(&self) -> Point3<f32> {
        self.origin
    }

    /// Object space ray through the center of pixel `(x, y)`.
    /// `None` for a degenerate direction.
    pub fn ray_for_pixel(&self, x: u16, y: u16) -> Option<Ray> {
        let uv = pixel_to_uv(x, y, self.resolution);
        self.ray_for_uv(uv)
    }

    pub fn ray_for_uv(&self, uv: Vector2<f32>) -> Option<Ray> {
        let world_dir = self.state.camera.uv_direction(uv);
        let dir = self.world_to_object.transform_vector(&world_dir);
        Ray::new(self.origin, dir)
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, Vector3};

    use super::*;
    use crate::camera::{ModelTransform, PerspectiveCamera};

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).norm() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn uv_corners_and_center() {
        let res = vector![2, 2];
        assert_eq!(pixel_to_uv(0, 0, res), vector![-0.5, 0.5]);
        assert_eq!(pixel_to_uv(1, 1, res), vector![0.5, -0.5]);

        let res = vector![3, 1];
        assert_eq!(pixel_to_uv(1, 0, res), vector![0.0, 0.0]);
    }

    #[test]
    fn center_ray_hits_volume_center() {
        let camera = PerspectiveCamera::look_at(point![0.0, 0.0, -2.0], point![0.0, 0.0, 0.0]);
        let state = CameraState::new(camera, ModelTransform::identity());
        let setup = RaySetup::new(&state, vector![1, 1]).unwrap();

        let ray = setup.ray_for_pixel(0, 0).unwrap();

        assert_eq!(ray.origin, point![0.0, 0.0, -2.0]);
        assert_close(ray.direction, vector![0.0, 0.0, 1.0]);
    }

    #[test]
    fn ray_in_object_space() {
        let camera = PerspectiveCamera::look_at(point![0.0, 0.0, -2.0], point![0.0, 0.0, 0.0]);
        // Volume moved 1 unit along +x and scaled 2x
        let model = ModelTransform::new(
            vector![1.0, 0.0, 0.0],
            nalgebra::UnitQuaternion::identity(),
            vector![2.0, 2.0, 2.0],
        );
        let state = CameraState::new(camera, model);
        let setup = RaySetup::new(&state, vector![1, 1]).unwrap();

        // (0,0,-2) - (1,0,0), halved
        assert_eq!(setup.origin(), point![-0.5, 0.0, -1.0]);
        assert_eq!(Some(setup.origin()), state.object_space_position());

        let ray = setup.ray_for_pixel(0, 0).unwrap();
        assert_close(ray.direction, vector![0.0, 0.0, 1.0]);
    }

    #[test]
    fn rotated_model() {
        let camera = PerspectiveCamera::look_at(point![0.0, 0.0, -2.0], point![0.0, 0.0, 0.0]);
        // Volume turned 90 degrees around y
        let model = ModelTransform::identity().with_euler_deg(0.0, 90.0, 0.0);
        let state = CameraState::new(camera, model);
        let setup = RaySetup::new(&state, vector![1, 1]).unwrap();

        let ray = setup.ray_for_pixel(0, 0).unwrap();

        // Camera now looks along object space +x
        assert_close(ray.origin.coords, vector![2.0, 0.0, 0.0]);
        assert_close(ray.direction, vector![-1.0, 0.0, 0.0]);
    }

    #[test]
    fn singular_model() {
        let camera = PerspectiveCamera::look_at(point![0.0, 0.0, -2.0], point![0.0, 0.0, 0.0]);
        let model = ModelTransform::new(
            vector![0.0, 0.0, 0.0],
            nalgebra::UnitQuaternion::identity(),
            vector![1.0, 0.0, 1.0],
        );
        let state = CameraState::new(camera, model);
        assert!(RaySetup::new(&state, vector![4, 4]).is_none());
    }
}
