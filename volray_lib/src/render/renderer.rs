use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    camera::CameraState,
    color::{self, RGBA},
    common::{BoundBox, Ray},
    error::RenderError,
    volumetric::Volume,
};

use super::{
    compositor::{composite, CompositeResult},
    marcher::RaySamples,
    ray_setup::RaySetup,
    render_params::EARLY_EXIT_ALPHA,
    transfer_function::transfer,
    RenderOptions, RenderParameters,
};

/// Frame renderer.
///
/// Marches one ray per pixel through the volume and writes RGBA8 pixels.
/// Stateless between frames apart from the volume and options it holds.
pub struct Renderer<V>
where
    V: Volume + 'static,
{
    volume: Arc<V>,
    render_options: RenderOptions,
}

impl<V> Renderer<V>
where
    V: Volume + 'static,
{
    pub fn new(volume: Arc<V>, render_options: RenderOptions) -> Renderer<V> {
        Renderer {
            volume,
            render_options,
        }
    }

    /// Replace volume, takes effect on the next frame
    pub fn set_volume(&mut self, volume: Arc<V>) {
        self.volume = volume;
    }

    pub fn get_volume(&self) -> &Arc<V> {
        &self.volume
    }

    pub fn set_render_options(&mut self, opts: RenderOptions) {
        self.render_options = opts;
    }

    pub fn get_render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    pub fn set_render_resolution(&mut self, res: nalgebra::Vector2<u16>) {
        self.render_options.resolution = res;
    }

    /// Render one frame into `buffer`.
    ///
    /// `buffer` holds RGBA8 pixels row by row, row 0 is the top of the image.
    /// Its length must be `width * height * 4`.
    /// Parameters are sanitized once per frame, see [`RenderParameters::sanitized`].
    /// Nothing is logged here, hosts report invalid input with [`RenderParameters::sanitized_logged`].
    pub fn render(
        &self,
        state: &CameraState,
        params: &RenderParameters,
        buffer: &mut [u8],
    ) -> Result<(), RenderError> {
        let expected = self.render_options.buffer_len();
        if buffer.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: buffer.len(),
            });
        }

        let resolution = self.render_options.resolution;
        if expected == 0 {
            return Ok(());
        }

        let params = params.sanitized();

        let setup = match RaySetup::new(state, resolution) {
            Some(setup) => setup,
            None => {
                log::warn!("Model transform is not invertible, frame left empty");
                buffer.fill(0);
                return Ok(());
            }
        };

        log::debug!(
            "Rendering {}x{} frame, {} threads",
            resolution.x,
            resolution.y,
            if self.render_options.multi_thread {
                rayon::current_num_threads()
            } else {
                1
            }
        );

        let row_len = resolution.x as usize * 4;
        let render_row = |(y, row): (usize, &mut [u8])| {
            for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                let color = self.shade(&setup, x as u16, y as u16, &params);
                pixel.copy_from_slice(&color::to_rgba8(&color));
            }
        };

        if self.render_options.multi_thread {
            buffer
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(render_row);
        } else {
            buffer.chunks_mut(row_len).enumerate().for_each(render_row);
        }

        Ok(())
    }

    /// Color of a single pixel, premultiplied.
    ///
    /// Same result as the corresponding pixel of [`render`](Renderer::render) before quantization.
    pub fn render_pixel(
        &self,
        state: &CameraState,
        params: &RenderParameters,
        x: u16,
        y: u16,
    ) -> RGBA {
        let params = params.sanitized();
        match RaySetup::new(state, self.render_options.resolution) {
            Some(setup) => self.shade(&setup, x, y, &params),
            None => color::zero(),
        }
    }

    fn shade(&self, setup: &RaySetup, x: u16, y: u16, params: &RenderParameters) -> RGBA {
        match setup.ray_for_pixel(x, y) {
            Some(ray) => self.collect_light(&ray, params).color,
            None => color::zero(),
        }
    }

    /// March `ray` (object space) through the cross section box and composite.
    ///
    /// Expects sanitized `params`. A miss yields transparent black with zero steps.
    pub fn collect_light(&self, ray: &Ray, params: &RenderParameters) -> CompositeResult {
        let bbox = BoundBox::centered(params.cross_section);

        let (t0, t1) = match bbox.intersect(ray) {
            Some(interval) => interval,
            None => return CompositeResult::empty(),
        };

        let samples = RaySamples::new(&*self.volume, *ray, t0, t1, params.step_size)
            .map(|sample| transfer(sample.value, params.color_mode, params.alpha));

        // relying on branch predictor to "eliminate" branch
        let early_exit = if self.render_options.ray_termination {
            Some(EARLY_EXIT_ALPHA)
        } else {
            None
        };

        composite(samples, early_exit)
    }
}
