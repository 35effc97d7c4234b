use std::sync::Arc;

use anyhow::{Context, Result};
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::RwLock;
use volray_lib::{
    animation::Timeline,
    render::{RendererFront, SerialRenderer, SharedParameters},
    volumetric::{self, VolumeSlot},
    Renderer, VoxelVolume,
};

mod args;
mod config;
mod output;

use crate::{
    args::get_command,
    config::{Animation, Config},
    output::{frame_path, write_png},
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = get_command().get_matches();
    let cfg = Config::from_args(args)?;
    log::debug!("{:?}", cfg);

    let volume = volumetric::from_file(&cfg.input, cfg.dims)
        .with_context(|| format!("cannot load volume {:?}", cfg.input))?;

    match cfg.animation {
        None => render_single(volume, &cfg),
        Some(animation) => render_animation(volume, &cfg, animation),
    }
}

fn render_single(volume: VoxelVolume, cfg: &Config) -> Result<()> {
    let renderer = Renderer::new(Arc::new(volume), cfg.render_options);
    let mut buffer = vec![0; cfg.render_options.buffer_len()];

    let start = std::time::Instant::now();
    renderer.render(&cfg.camera, &cfg.params, &mut buffer)?;
    log::info!("Frame rendered in {} ms", start.elapsed().as_millis());

    write_png(&cfg.output, &buffer, cfg.render_options.resolution)?;
    log::info!("Saved {:?}", cfg.output);
    Ok(())
}

/// Slice sweep rendered on the render thread, one PNG per frame
fn render_animation(volume: VoxelVolume, cfg: &Config, animation: Animation) -> Result<()> {
    let timeline = Timeline::slice_sweep(cfg.params).stretched(animation.seconds);
    let times: Vec<f32> = timeline.frame_times(animation.fps).collect();

    let parameters = SharedParameters::new(cfg.params);
    let renderer = SerialRenderer::new(
        VolumeSlot::new(volume),
        Arc::new(RwLock::new(cfg.camera.clone())),
        parameters.clone(),
        cfg.render_options,
    );

    let mut front = RendererFront::new();
    front.start_rendering(renderer);
    let buffer = front
        .get_buffer_handle()
        .context("render thread did not start")?;

    log::info!(
        "Rendering {} frames at {} fps",
        times.len(),
        animation.fps
    );
    let bar = ProgressBar::new(times.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}"),
    );

    let result = times.iter().enumerate().try_for_each(|(i, &t)| -> Result<()> {
        parameters.set(timeline.sample(t));
        front.render_frame()?;
        let path = frame_path(&cfg.output, i);
        write_png(&path, &buffer.lock(), cfg.render_options.resolution)?;
        bar.inc(1);
        Ok(())
    });

    bar.finish_and_clear();
    front.shutdown();
    result?;

    log::info!("Saved {} frames next to {:?}", times.len(), cfg.output);
    Ok(())
}
