use std::{fs::File, path::Path};

use memmap::{Mmap, MmapOptions};
use nalgebra::{vector, Vector3};

use crate::error::{VolumeError, VolumeResult};

use super::{
    parse::{cube_side, dims_from_file_name},
    VoxelVolume,
};

/// Side of the cube assumed when nothing else is known
pub const DEFAULT_DIM: usize = 256;

/// Memory mapped raw volume file.
///
/// Mapping lets the loader copy exactly the `X*Y*Z` samples it needs,
/// trailing bytes of an oversized file are never read.
pub struct DataSource {
    mmap: Mmap,
}

impl DataSource {
    pub fn get_slice(&self) -> &[u8] {
        &self.mmap[..]
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Memory map file at `path`
    pub fn from_file<P>(path: P) -> VolumeResult<DataSource>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(VolumeError::NotAFile(path.to_path_buf()));
        }

        let io_err = |source: std::io::Error| VolumeError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let len = file.metadata().map_err(io_err)?.len();

        // Zero length files cannot be mapped
        if len == 0 {
            return Err(VolumeError::EmptyFile(path.to_path_buf()));
        }

        // Safety: file is opened read-only, data gets copied out before the map is dropped
        let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(io_err)?;
        Ok(DataSource { mmap })
    }
}

/// Pick volume dimensions.
///
/// In order of preference: `explicit`, tag in the file name, exact cube of `len` bytes, `DEFAULT_DIM`^3.
pub fn resolve_dims(
    explicit: Option<Vector3<usize>>,
    file_name: Option<&str>,
    len: usize,
) -> Vector3<usize> {
    if let Some(dims) = explicit {
        return dims;
    }
    if let Some(dims) = file_name.and_then(dims_from_file_name) {
        return dims;
    }
    if let Some(side) = cube_side(len) {
        return vector![side, side, side];
    }
    vector![DEFAULT_DIM, DEFAULT_DIM, DEFAULT_DIM]
}

/// Build volume from mapped file, copying at most `X*Y*Z` bytes
pub fn from_data_source(ds: &DataSource, dims: Vector3<usize>) -> VolumeResult<VoxelVolume> {
    VoxelVolume::from_slice(dims, ds.get_slice())
}

/// Read headerless raw volume of 8-bit samples.
///
/// See [`resolve_dims`] for how missing `dims` are determined.
pub fn from_file<P>(path: P, dims: Option<Vector3<usize>>) -> VolumeResult<VoxelVolume>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let ds = DataSource::from_file(path)?;

    let file_name = path.file_name().and_then(|n| n.to_str());
    let dims = resolve_dims(dims, file_name, ds.len());

    log::info!(
        "Loading raw volume {:?}, {} bytes as {}x{}x{}",
        path,
        ds.len(),
        dims.x,
        dims.y,
        dims.z
    );

    from_data_source(&ds, dims)
}
