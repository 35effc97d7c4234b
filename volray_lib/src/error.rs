//! Error types for volume loading and renderer setup.
//!
//! Per-pixel evaluation never fails, these only cover setup paths.

use std::path::PathBuf;

use thiserror::Error;

/// Volume loading and building errors
#[derive(Error, Debug)]
pub enum VolumeError {
    /// Path does not point to a regular file
    #[error("path {0:?} does not lead to a file")]
    NotAFile(PathBuf),

    /// File could not be opened or mapped
    #[error("cannot read volume file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File holds no samples
    #[error("volume file {0:?} is empty")]
    EmptyFile(PathBuf),

    /// A dimension is zero or the voxel count overflows
    #[error("invalid volume dimensions {x}x{y}x{z}")]
    InvalidDimensions { x: usize, y: usize, z: usize },
}

/// Renderer configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// Resolution has a zero side
    #[error("render resolution must be non-zero, got {width}x{height}")]
    ZeroResolution { width: u16, height: u16 },

    /// Framebuffer does not match resolution
    #[error("framebuffer holds {actual} bytes, {expected} required")]
    BufferSize { expected: usize, actual: usize },

    /// Render thread is gone
    #[error("renderer thread disconnected")]
    Disconnected,
}

pub type VolumeResult<T> = Result<T, VolumeError>;
