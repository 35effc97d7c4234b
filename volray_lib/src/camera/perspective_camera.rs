use nalgebra::{vector, Point3, Rotation3, Vector2, Vector3};

/// Default vertical field of view, in degrees
pub const DEFAULT_FOV_Y: f32 = 75.0;

/// Ray-casting camera
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Position of the camera in world coordinates
    position: Point3<f32>,
    /// Direction of camera, unit length
    direction: Vector3<f32>,
    /// Up direction from the camera's perspective
    up: Vector3<f32>,
    /// Right direction from the camera's perspective
    right: Vector3<f32>,
    /// Aspect ratio of image plane (width / height)
    aspect: f32,
    /// Vertical Field of View in degrees
    fov_y: f32,
    /// Half height of the image plane at distance 1, `tan(fov_y / 2)`
    tan_half_fov: f32,
}

impl PerspectiveCamera {
    /// Construct new camera
    ///
    /// # Arguments
    ///
    /// * `position` - Position of the camera in world coordinates
    /// * `direction` - Looking direction of the camera
    ///
    /// # Notes
    ///
    /// The up direction is assumed to be 'up' (positive y axis)
    ///
    /// Default fov is 75 degrees, default aspect ratio is 1. To change it,
    /// call [`change_aspect_from_resolution`](PerspectiveCamera::change_aspect_from_resolution),
    /// [`change_fov`](PerspectiveCamera::change_fov), [`change_aspect`](PerspectiveCamera::change_aspect)
    pub fn new(position: Point3<f32>, direction: Vector3<f32>) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera {
            position,
            direction: vector![0.0, 0.0, 1.0],
            up: vector![0.0, 1.0, 0.0],
            right: vector![-1.0, 0.0, 0.0],
            aspect: 1.0,
            fov_y: DEFAULT_FOV_Y,
            tan_half_fov: 0.0,
        };
        camera.set_direction(direction);
        camera.recalc_plane_size();
        camera
    }

    /// Camera at `position`, looking at `target`
    pub fn look_at(position: Point3<f32>, target: Point3<f32>) -> PerspectiveCamera {
        PerspectiveCamera::new(position, target - position)
    }

    /// Changes aspect ratio to match `(width, height)` resolution
    ///
    /// # Example
    ///
    /// ```
    /// use volray_lib::PerspectiveCamera;
    /// use nalgebra::{vector, point};
    ///
    /// let position = point![0.0,0.0,0.0];
    /// let direction = vector![1.0,0.0,0.0];
    /// let mut camera = PerspectiveCamera::new(position, direction);
    ///
    /// let width = 1280;
    /// let height = 720;
    ///
    /// camera.change_aspect_from_resolution(width, height);
    /// // has the same effect as
    /// let aspect = (width as f32) / (height as f32);
    /// camera.change_aspect(aspect);
    /// ```
    pub fn change_aspect_from_resolution(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let aspect = (width as f32) / (height as f32);
        self.change_aspect(aspect);
    }

    /// Change vertical FoV of camera
    ///
    /// # Arguments
    ///
    /// * `vertical_fov_deg` - vertical FoV in degrees, values outside of `(0;180)` are ignored
    pub fn change_fov(&mut self, vertical_fov_deg: f32) {
        if !(vertical_fov_deg > 0.0 && vertical_fov_deg < 180.0) {
            log::warn!("Ignoring vertical FoV {vertical_fov_deg}, must be in (0;180)");
            return;
        }
        self.fov_y = vertical_fov_deg;
        self.recalc_plane_size();
    }

    /// Change aspect ratio of camera
    ///
    /// For example 1.7777 for 16:9 ratio
    pub fn change_aspect(&mut self, aspect_ratio: f32) {
        if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
            log::warn!("Ignoring aspect ratio {aspect_ratio}");
            return;
        }
        self.aspect = aspect_ratio;
    }

    /// Set new direction of camera.
    /// Zero or non-finite direction is ignored.
    pub fn set_direction(&mut self, direction: Vector3<f32>) {
        let length = direction.norm();
        if !length.is_finite() || length <= f32::EPSILON {
            log::warn!("Ignoring degenerate camera direction {direction:?}");
            return;
        }
        self.direction = direction / length;
        self.recalc_up_right();
    }

    /// Move camera by vector `delta`
    pub fn change_pos(&mut self, delta: Vector3<f32>) {
        self.position += delta;
    }

    /// Apply rotation matrix to the camera.
    /// This changes both position and direction, orbiting the world origin.
    pub fn change_pos_matrix(&mut self, matrix: Rotation3<f32>) {
        self.position = matrix * self.position;
        let direction = matrix * self.direction;
        self.set_direction(direction);
    }

    // Call when camera direction changed
    fn recalc_up_right(&mut self) {
        let mut world_up = vector![0.0, 1.0, 0.0];
        // Looking straight up or down, pick another reference
        if self.direction.cross(&world_up).norm() <= 1e-6 {
            world_up = vector![0.0, 0.0, 1.0];
        }
        self.right = self.direction.cross(&world_up).normalize();
        self.up = self.right.cross(&self.direction);
    }

    // Call when fov changed
    fn recalc_plane_size(&mut self) {
        self.tan_half_fov = f32::tan(f32::to_radians(0.5 * self.fov_y));
    }

    /// Direction of the ray through `uv` on the image plane, in world space. Not normalized.
    ///
    /// `uv` is in `<-1;1>x<-1;1>`, `[-1,-1]` being the lower left corner.
    /// Camera space direction is `(uv.x * tan(fov/2) * aspect, uv.y * tan(fov/2), 1)`,
    /// with 90 degree FoV and aspect 1 that is exactly `(uv.x, uv.y, 1)`.
    pub fn uv_direction(&self, uv: Vector2<f32>) -> Vector3<f32> {
        let cam_x = uv.x * self.tan_half_fov * self.aspect;
        let cam_y = uv.y * self.tan_half_fov;
        cam_x * self.right + cam_y * self.up + self.direction
    }

    /// Direction getter
    pub fn get_dir(&self) -> Vector3<f32> {
        self.direction
    }

    /// Position getter
    pub fn get_pos(&self) -> Point3<f32> {
        self.position
    }

    pub fn get_up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn get_right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn get_fov(&self) -> f32 {
        self.fov_y
    }

    pub fn get_aspect(&self) -> f32 {
        self.aspect
    }
}

#[cfg(test)]
mod test {

    use nalgebra::point;

    use super::*;

    fn compare_vec(actual: Vector3<f32>, expected: Vector3<f32>) {
        let err = (actual - expected).norm();
        assert!(err < 1e-5, "{actual:?} != {expected:?}");
    }

    #[test]
    fn camera_basis() {
        // Camera behind the volume, same as the default viewer scene
        let cam = PerspectiveCamera::look_at(point![0.0, 0.0, -2.0], point![0.0, 0.0, 0.0]);

        compare_vec(cam.get_dir(), vector![0.0, 0.0, 1.0]);
        compare_vec(cam.get_right(), vector![-1.0, 0.0, 0.0]);
        compare_vec(cam.get_up(), vector![0.0, 1.0, 0.0]);
    }

    #[test]
    fn basis_looking_down() {
        let cam = PerspectiveCamera::new(point![0.0, 3.0, 0.0], vector![0.0, -1.0, 0.0]);

        assert!((cam.get_right().norm() - 1.0).abs() < 1e-5);
        assert!(cam.get_right().dot(&cam.get_dir()).abs() < 1e-5);
        assert!(cam.get_up().dot(&cam.get_dir()).abs() < 1e-5);
    }

    #[test]
    fn uv_direction_90_deg() {
        let mut cam = PerspectiveCamera::look_at(point![0.0, 0.0, -2.0], point![0.0, 0.0, 0.0]);
        cam.change_fov(90.0);

        compare_vec(cam.uv_direction(vector![0.0, 0.0]), vector![0.0, 0.0, 1.0]);
        // Camera space (1, 1, 1), right is world -x
        compare_vec(cam.uv_direction(vector![1.0, 1.0]), vector![-1.0, 1.0, 1.0]);
        compare_vec(
            cam.uv_direction(vector![-0.5, 0.25]),
            vector![0.5, 0.25, 1.0],
        );
    }

    #[test]
    fn aspect_widens_horizontal() {
        let mut cam = PerspectiveCamera::look_at(point![0.0, 0.0, -2.0], point![0.0, 0.0, 0.0]);
        cam.change_fov(90.0);
        cam.change_aspect_from_resolution(200, 100);

        compare_vec(cam.uv_direction(vector![1.0, 1.0]), vector![-2.0, 1.0, 1.0]);
    }

    #[test]
    fn invalid_settings_ignored() {
        let mut cam = PerspectiveCamera::new(point![0.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]);

        cam.change_fov(0.0);
        cam.change_fov(180.0);
        cam.change_aspect(-1.0);
        cam.set_direction(vector![0.0, 0.0, 0.0]);
        cam.change_aspect_from_resolution(0, 10);

        assert_eq!(cam.get_fov(), DEFAULT_FOV_Y);
        assert_eq!(cam.get_aspect(), 1.0);
        assert_eq!(cam.get_dir(), vector![1.0, 0.0, 0.0]);
    }

    #[test]
    fn orbit_keeps_looking_at_origin() {
        let mut cam = PerspectiveCamera::look_at(point![0.0, 0.0, -2.0], point![0.0, 0.0, 0.0]);

        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), std::f32::consts::FRAC_PI_2);
        cam.change_pos_matrix(rotation);

        let to_origin = (point![0.0, 0.0, 0.0] - cam.get_pos()).normalize();
        compare_vec(cam.get_dir(), to_origin);
        assert!((cam.get_pos().coords.norm() - 2.0).abs() < 1e-5);
    }
}
