//! Volumetric ray-marching core.
//!
//! Renders a cube of 8-bit scalar intensities by marching rays through a
//! cross-section box in the volume's object space, mapping every sample through
//! a transfer function and compositing front to back.
//!
//! Typical single frame:
//!
//! ```
//! use std::sync::Arc;
//! use nalgebra::{point, vector};
//! use volray_lib::{
//!     camera::{CameraState, ModelTransform, PerspectiveCamera},
//!     render::{RenderOptions, RenderParameters, Renderer},
//!     volumetric::VoxelVolume,
//! };
//!
//! let volume = VoxelVolume::filled(vector![8, 8, 8], 200).unwrap();
//! let camera = PerspectiveCamera::look_at(point![0.0, 0.0, -2.0], point![0.0, 0.0, 0.0]);
//! let state = CameraState::new(camera, ModelTransform::identity());
//!
//! let options = RenderOptions::builder()
//!     .resolution(vector![32, 32])
//!     .build()
//!     .unwrap();
//! let renderer = Renderer::new(Arc::new(volume), options);
//!
//! let mut buffer = vec![0; 32 * 32 * 4];
//! renderer
//!     .render(&state, &RenderParameters::default(), &mut buffer)
//!     .unwrap();
//! ```

pub mod animation;
pub mod camera;
pub mod color;
pub mod common;
pub mod error;
pub mod render;
pub mod test_helpers;
pub mod volumetric;

pub use camera::{CameraState, ModelTransform, PerspectiveCamera};
pub use error::{RenderError, VolumeError};
pub use render::{ColorMode, RenderOptions, RenderParameters, Renderer};
pub use volumetric::{Volume, VoxelVolume};
