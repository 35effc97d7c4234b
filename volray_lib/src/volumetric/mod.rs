pub mod parse;
pub mod vol_reader;
mod volume;
mod volume_slot;
mod voxel_volume;

pub use vol_reader::{from_file, DataSource};
pub use volume::{object_to_texture, Volume};
pub use volume_slot::VolumeSlot;
pub use voxel_volume::VoxelVolume;
