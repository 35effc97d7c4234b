use std::sync::Arc;

use parking_lot::RwLock;

/// Shared handle to the current volume.
///
/// A new upload replaces the volume wholesale. Readers take a snapshot
/// ([`VolumeSlot::snapshot`]) and keep using it for the whole frame, so a replacement
/// becomes visible on the next frame and never shows up half written.
pub struct VolumeSlot<V> {
    inner: Arc<RwLock<Arc<V>>>,
}

impl<V> VolumeSlot<V> {
    pub fn new(volume: V) -> VolumeSlot<V> {
        VolumeSlot {
            inner: Arc::new(RwLock::new(Arc::new(volume))),
        }
    }

    /// Current volume
    pub fn snapshot(&self) -> Arc<V> {
        self.inner.read().clone()
    }

    /// Swap in a new volume, returns the previous one
    pub fn replace(&self, volume: V) -> Arc<V> {
        let volume = Arc::new(volume);
        std::mem::replace(&mut *self.inner.write(), volume)
    }
}

impl<V> Clone for VolumeSlot<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;
    use crate::volumetric::{Volume, VoxelVolume};

    #[test]
    fn replace_is_visible_to_clones() {
        let slot = VolumeSlot::new(VoxelVolume::filled(vector![2, 2, 2], 0).unwrap());
        let host = slot.clone();

        let before = slot.snapshot();

        let previous = host.replace(VoxelVolume::filled(vector![4, 4, 4], 255).unwrap());
        assert!(Arc::ptr_eq(&before, &previous));

        // Old snapshot is untouched
        assert_eq!(before.get_size(), vector![2, 2, 2]);
        assert_eq!(before.get_data(0, 0, 0), Some(0.0));

        let after = slot.snapshot();
        assert_eq!(after.get_size(), vector![4, 4, 4]);
        assert_eq!(after.get_data(3, 3, 3), Some(1.0));
    }
}
