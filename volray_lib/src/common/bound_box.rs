use nalgebra::{Point3, Vector3};

use super::Ray;

/// Axis aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

impl BoundBox {
    pub fn new(lower: Point3<f32>, upper: Point3<f32>) -> BoundBox {
        BoundBox { lower, upper }
    }

    /// Box centered at the origin, spanning `-half_extents` to `half_extents`
    pub fn centered(half_extents: Vector3<f32>) -> BoundBox {
        BoundBox {
            lower: Point3::from(-half_extents),
            upper: Point3::from(half_extents),
        }
    }

    pub fn is_in(&self, pos: &Point3<f32>) -> bool {
        self.upper.x > pos.x
            && self.upper.y > pos.y
            && self.upper.z > pos.z
            && pos.x > self.lower.x
            && pos.y > self.lower.y
            && pos.z > self.lower.z
    }

    /// Slab test, returns raw `(t0, t1)`.
    ///
    /// Ray misses the box if `t0 > t1` or either value is NaN.
    /// Values may be negative, the box can lie (partially) behind the ray origin.
    pub fn slab(&self, ray: &Ray) -> (f32, f32) {
        // Source: An Efficient and Robust Ray–Box Intersection Algorithm. Amy Williams et al. 2004.
        // http://citeseerx.ist.psu.edu/viewdoc/summary?doi=10.1.1.64.7663

        // Zero components give +-inf, slabs then resolve by IEEE rules
        let inv_dir = ray.direction.map(|d| 1.0 / d);

        // t value of intersection with the 6 planes of a bounding box
        let t0 = (self.lower - ray.origin).component_mul(&inv_dir);
        let t1 = (self.upper - ray.origin).component_mul(&inv_dir);

        // [ (min,max) , (min,max) , (min,max) ]
        let t_minmax = t0.zip_map(&t1, |t0, t1| if t0 < t1 { (t0, t1) } else { (t1, t0) });

        let tmin = f32::max(f32::max(t_minmax.x.0, t_minmax.y.0), t_minmax.z.0);
        let tmax = f32::min(f32::min(t_minmax.x.1, t_minmax.y.1), t_minmax.z.1);

        (tmin, tmax)
    }

    /// Interval of the ray inside the box.
    ///
    /// Entry is clamped to zero, nothing behind the ray origin is reported.
    /// Returns `None` when the ray misses or the box lies entirely behind the origin.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        let (tmin, tmax) = self.slab(ray);

        // if tmin > tmax, ray doesn't intersect AABB
        if tmin.is_nan() || tmax.is_nan() || tmin > tmax {
            return None;
        }

        // if tmax < 0, ray is intersecting AABB, but the whole AABB is behind us
        if tmax < 0.0 {
            return None;
        }

        Some((f32::max(tmin, 0.0), tmax))
    }
}
