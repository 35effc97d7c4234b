//! Frame rendering.
//!
//! Per pixel pipeline: [`ray_setup`] builds an object space ray, the cross section
//! box clips it, [`marcher`] samples the volume along it, [`transfer_function`]
//! colors the samples and [`compositor`] blends them front to back.

pub mod compositor;
pub mod marcher;
pub mod ray_setup;
mod render_front;
mod render_options;
mod render_params;
mod renderer;
mod st_renderer;
pub mod transfer_function;

pub use render_front::{RenderThread, RendererFront, RendererMessage};
pub use render_options::{RenderOptions, RenderOptionsBuilder};
pub use render_params::{
    ColorMode, RenderParameters, SharedParameters, EARLY_EXIT_ALPHA, MAX_CROSS_SECTION, MAX_STEPS,
    MIN_STEP_SIZE,
};
pub use renderer::Renderer;
pub use st_renderer::SerialRenderer;
