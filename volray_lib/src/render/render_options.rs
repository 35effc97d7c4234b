use nalgebra::{vector, Vector2};

use crate::error::RenderError;

/// Renderer settings that stay fixed between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Output image size in pixels
    pub resolution: Vector2<u16>,
    /// Stop marching once the ray is almost opaque
    pub ray_termination: bool,
    /// Render rows in parallel
    pub multi_thread: bool,
}

impl RenderOptions {
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::new()
    }

    /// Number of pixels in the output image
    pub fn pixel_count(&self) -> usize {
        self.resolution.x as usize * self.resolution.y as usize
    }

    /// Size of RGBA8 framebuffer in bytes
    pub fn buffer_len(&self) -> usize {
        self.pixel_count() * 4
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            resolution: vector![512, 512],
            ray_termination: true,
            multi_thread: true,
        }
    }
}

pub struct RenderOptionsBuilder {
    resolution: Vector2<u16>,
    ray_termination: bool,
    multi_thread: bool,
}

impl RenderOptionsBuilder {
    pub fn new() -> Self {
        let defaults = RenderOptions::default();
        Self {
            resolution: defaults.resolution,
            ray_termination: defaults.ray_termination,
            multi_thread: defaults.multi_thread,
        }
    }

    pub fn resolution(mut self, resolution: Vector2<u16>) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn early_ray_termination(mut self, enabled: bool) -> Self {
        self.ray_termination = enabled;
        self
    }

    pub fn multi_thread(mut self, enabled: bool) -> Self {
        self.multi_thread = enabled;
        self
    }

    /// Build options, fails on zero width or height
    pub fn build(self) -> Result<RenderOptions, RenderError> {
        if self.resolution.x == 0 || self.resolution.y == 0 {
            return Err(RenderError::ZeroResolution {
                width: self.resolution.x,
                height: self.resolution.y,
            });
        }
        Ok(self.build_unchecked())
    }

    /// Build options without validation
    pub fn build_unchecked(self) -> RenderOptions {
        RenderOptions {
            resolution: self.resolution,
            ray_termination: self.ray_termination,
            multi_thread: self.multi_thread,
        }
    }
}

impl Default for RenderOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
