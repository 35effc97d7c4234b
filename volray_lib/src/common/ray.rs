use nalgebra::{Matrix4, Point3, Vector3};

/// Ray cast by camera.
/// Main usecase is getting intersections with the cross-section box ([`BoundBox::intersect`](super::BoundBox::intersect)),
/// then iterating over the intersected line segment in steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    /// Always unit length when constructed through [`Ray::new`]
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Construct new ray using `origin` and `direction`.
    /// `direction` gets normalized.
    ///
    /// Returns `None` for a zero-length or non-finite direction, or a non-finite origin.
    /// Such a ray contributes nothing to the image.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Option<Ray> {
        let length = direction.norm();
        if !length.is_finite() || length <= f32::EPSILON {
            return None;
        }
        if origin.coords.iter().any(|v| !v.is_finite()) {
            return None;
        }
        Some(Ray {
            origin,
            direction: direction / length,
        })
    }

    /// Returns point `t` units far from ray origin in ray direction
    pub fn point_from_t(&self, t: f32) -> Point3<f32> {
        self.origin + t * self.direction
    }

    /// Apply affine transformation `matrix` to the ray.
    /// Direction is renormalized, so `t` is measured in the target space units.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Option<Ray> {
        let origin = matrix.transform_point(&self.origin);
        let direction = matrix.transform_vector(&self.direction);
        Ray::new(origin, direction)
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use super::*;

    #[test]
    fn normalizes_direction() {
        let ray = Ray::new(point![1.0, 2.0, 3.0], vector![0.0, 3.0, 4.0]).unwrap();
        assert!((ray.direction.norm() - 1.0).abs() < 1e-6);
        assert!((ray.direction - vector![0.0, 0.6, 0.8]).norm() < 1e-6);

        let p = ray.point_from_t(5.0);
        assert!((p - point![1.0, 5.0, 7.0]).norm() < 1e-5);
    }

    #[test]
    fn degenerate_direction() {
        let origin = point![0.0, 0.0, 0.0];
        assert!(Ray::new(origin, vector![0.0, 0.0, 0.0]).is_none());
        assert!(Ray::new(origin, vector![f32::NAN, 1.0, 0.0]).is_none());
        assert!(Ray::new(origin, vector![f32::INFINITY, 0.0, 0.0]).is_none());
        assert!(Ray::new(point![f32::NAN, 0.0, 0.0], vector![1.0, 0.0, 0.0]).is_none());
    }

    #[test]
    fn transform_translation_scale() {
        let ray = Ray::new(point![2.0, 0.0, 0.0], vector![1.0, 1.0, 0.0]).unwrap();

        let matrix = Matrix4::new_nonuniform_scaling(&vector![0.5, 1.0, 1.0])
            * Matrix4::new_translation(&vector![-2.0, 0.0, 0.0]);

        let obj_ray = ray.transform(&matrix).unwrap();

        assert_eq!(obj_ray.origin, point![0.0, 0.0, 0.0]);
        let expected = vector![0.5, 1.0, 0.0].normalize();
        assert!((obj_ray.direction - expected).norm() < 1e-6);
    }
}
