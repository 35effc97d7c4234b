use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::{vector, Vector3};
use rayon::prelude::*;
use volray_lib::volumetric::parse::dims_from_file_name;

use crate::{
    config::{Config, GeneratorConfig},
    file::write_raw,
};

mod gradient;
mod noise;
mod solid;
mod spheres;

pub use gradient::GradientGenerator;
pub use noise::NoiseGenerator;
pub use solid::SolidGenerator;
pub use spheres::SpheresGenerator;

// Generates one sample at a time, at any location
pub trait SampleGenerator: Sync {
    fn sample_at(&self, coords: Vector3<usize>) -> u8;
}

pub fn get_sample_generator(config: &Config) -> Box<dyn SampleGenerator> {
    match config.generator {
        GeneratorConfig::Solid { sample } => Box::new(SolidGenerator::new(config.dims, sample)),
        GeneratorConfig::Spheres {
            n_of_shapes,
            sample,
            radius,
        } => Box::new(SpheresGenerator::new(
            config.dims,
            n_of_shapes,
            radius as usize,
            sample,
            config.seed,
        )),
        GeneratorConfig::Gradient => Box::new(GradientGenerator::new(config.dims)),
        GeneratorConfig::Noise { cell_size } => Box::new(NoiseGenerator::new(
            config.dims,
            cell_size as usize,
            config.seed,
        )),
    }
}

/// Evaluate generator over the whole volume, x fastest.
/// Z slices are generated in parallel.
pub fn generate_samples(
    sg: &dyn SampleGenerator,
    dims: Vector3<usize>,
    progress: &ProgressBar,
) -> Vec<u8> {
    let slice_len = dims.x * dims.y;
    let mut samples = vec![0; slice_len * dims.z];
    if slice_len == 0 {
        return samples;
    }

    samples
        .par_chunks_mut(slice_len)
        .enumerate()
        .for_each(|(z, slice)| {
            for (y, row) in slice.chunks_mut(dims.x).enumerate() {
                for (x, sample) in row.iter_mut().enumerate() {
                    *sample = sg.sample_at(vector![x, y, z]);
                }
            }
            progress.inc(1);
        });

    samples
}

pub fn generate_vol(config: &Config) -> Result<()> {
    if let Some(tagged) = config
        .file_name
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(dims_from_file_name)
    {
        if tagged != config.dims {
            log::warn!(
                "File name tag {}x{}x{} does not match generated dims",
                tagged.x,
                tagged.y,
                tagged.z
            );
        }
    }

    let gen = get_sample_generator(config);

    let bar = ProgressBar::new(config.dims.z as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} slices"),
    );
    let samples = generate_samples(gen.as_ref(), config.dims, &bar);
    bar.finish_and_clear();

    write_raw(&config.file_name, &samples)?;

    log::info!(
        "Generating finished, {} bytes in {:?}",
        samples.len(),
        config.file_name
    );
    Ok(())
}
