use std::{path::PathBuf, str::FromStr};

use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use nalgebra::{vector, Vector3};

/// Parse single value of `key`
fn value_of<T>(args: &ArgMatches, key: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let v = args
        .value_of(key)
        .ok_or_else(|| anyhow!("missing argument {key}"))?;
    v.parse::<T>()
        .with_context(|| format!("invalid value {v:?} for {key}"))
}

/// Transform `Values` into `Vector`
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> Result<Vector3<T>>
where
    T: FromStr + Copy + nalgebra::Scalar,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let vals = args
        .values_of(key)
        .ok_or_else(|| anyhow!("missing argument {key}"))?
        .map(|v| v.parse::<T>().with_context(|| format!("invalid value {v:?}")))
        .collect::<Result<Vec<T>>>()?;
    match vals[..] {
        [x, y, z] => Ok(vector![x, y, z]),
        _ => bail!("{key} takes 3 values"),
    }
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Dimensions of volume
    pub dims: Vector3<usize>,
    /// Type of generator to be used
    pub generator: GeneratorConfig,
    /// Output file name
    pub file_name: PathBuf,
    /// Optional seed for RNG, to replicate results
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_args(args: ArgMatches) -> Result<Config> {
        let dims = values_to_vector3(&args, "dims")?;
        let generator = GeneratorConfig::from_args(&args)?;

        let file_name = match args.value_of_os("output-file") {
            Some(name) => PathBuf::from(name),
            None => PathBuf::from(default_file_name(dims)),
        };

        let seed = match args.value_of("seed") {
            Some(_) => Some(value_of(&args, "seed")?),
            None => None,
        };

        Ok(Config {
            dims,
            generator,
            file_name,
            seed,
        })
    }

    pub fn voxel_count(&self) -> usize {
        self.dims.iter().product()
    }
}

/// Name carrying a dimension tag the loader understands
pub fn default_file_name(dims: Vector3<usize>) -> String {
    format!("generated_{}x{}x{}_uint8.raw", dims.x, dims.y, dims.z)
}

/// Settings specific to generator variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratorConfig {
    /// Solid block with an empty margin
    Solid { sample: u8 },
    /// Randomly placed spheres
    Spheres {
        n_of_shapes: usize,
        sample: u8,
        radius: u32,
    },
    /// Linear ramp along z
    Gradient,
    /// Smooth value noise
    Noise { cell_size: u32 },
}

impl GeneratorConfig {
    pub fn from_args(args: &ArgMatches) -> Result<GeneratorConfig> {
        let name = args
            .value_of("generator")
            .ok_or_else(|| anyhow!("missing generator"))?;

        let generator = match name {
            "solid" => GeneratorConfig::Solid {
                sample: value_of(args, "sample")?,
            },
            "spheres" => GeneratorConfig::Spheres {
                n_of_shapes: value_of(args, "n-of-shapes")?,
                sample: value_of(args, "sample")?,
                radius: value_of(args, "object-size")?,
            },
            "gradient" => GeneratorConfig::Gradient,
            "noise" => GeneratorConfig::Noise {
                cell_size: value_of(args, "object-size")?,
            },
            other => bail!("unknown generator {other}"),
        };
        Ok(generator)
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::args::get_command;

    fn parse(args: &[&str]) -> Result<Config> {
        let mut full = vec!["vol_gen"];
        full.extend_from_slice(args);
        Config::from_args(get_command().try_get_matches_from(full)?)
    }

    #[test]
    fn spheres() {
        let cfg = parse(&[
            "--dims=32,16,8",
            "-g",
            "spheres",
            "--n-of-shapes",
            "3",
            "--seed",
            "42",
        ])
        .unwrap();

        assert_eq!(cfg.dims, vector![32, 16, 8]);
        assert_eq!(
            cfg.generator,
            GeneratorConfig::Spheres {
                n_of_shapes: 3,
                sample: 200,
                radius: 8
            }
        );
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(
            cfg.file_name,
            PathBuf::from("generated_32x16x8_uint8.raw")
        );
        assert_eq!(cfg.voxel_count(), 32 * 16 * 8);
    }

    #[test]
    fn explicit_output() {
        let cfg = parse(&["--dims=4,4,4", "-g", "noise", "-o", "noise.raw"]).unwrap();
        assert_eq!(cfg.generator, GeneratorConfig::Noise { cell_size: 8 });
        assert_eq!(cfg.file_name, PathBuf::from("noise.raw"));
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--dims=4,4", "-g", "solid"]).is_err());
        assert!(parse(&["--dims=4,4,4", "-g", "cubes"]).is_err());
        assert!(parse(&["--dims=4,4,4", "-g", "solid", "--sample", "300"]).is_err());
        assert!(parse(&["-g", "solid"]).is_err());
    }
}
