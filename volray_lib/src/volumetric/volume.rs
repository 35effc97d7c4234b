use nalgebra::{vector, Point3, Vector3};

/// Scalar field sampled by the ray marcher.
///
/// Implementors are read-only during rendering and get shared between render threads.
pub trait Volume: Send + Sync {
    /// Data dimensions, in voxels
    fn get_size(&self) -> Vector3<usize>;

    /// Trilinear interpolation sample, normalized to <0;1>.
    ///
    /// `pos` is in texture coordinates, the volume spans `<0;1>` on every axis.
    /// Coordinates outside are clamped to the edge, never wrapped.
    fn sample_at(&self, pos: Point3<f32>) -> f32;

    /// Value of a single voxel, normalized to <0;1>.
    /// `None` if outside of the volume.
    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32>;

    fn get_name(&self) -> &str;

    /// Number of voxels
    fn voxel_count(&self) -> usize {
        let size = self.get_size();
        size.x * size.y * size.z
    }
}

/// Object space position -> texture coordinates.
///
/// Object space of the volume spans roughly `<-0.5;0.5>`, texture space `<0;1>`.
pub fn object_to_texture(pos: Point3<f32>) -> Point3<f32> {
    pos + vector![0.5, 0.5, 0.5]
}
