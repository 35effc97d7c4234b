use std::{path::PathBuf, str::FromStr};

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use nalgebra::{vector, UnitQuaternion, Vector2, Vector3};
use volray_lib::{
    render::{ColorMode, RenderOptions, RenderParameters},
    CameraState, ModelTransform, PerspectiveCamera,
};

/// Parse all values of `key`
fn values_of<T>(args: &ArgMatches, key: &str) -> Result<Vec<T>>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    args.values_of(key)
        .ok_or_else(|| anyhow!("missing argument {key}"))?
        .map(|v| {
            v.parse::<T>()
                .with_context(|| format!("invalid value {v:?} for {key}"))
        })
        .collect()
}

/// Transform `Values` into `Vector`
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> Result<Vector3<T>>
where
    T: FromStr + Copy + nalgebra::Scalar,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    match values_of::<T>(args, key)?[..] {
        [x, y, z] => Ok(vector![x, y, z]),
        _ => Err(anyhow!("{key} takes 3 values")),
    }
}

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

/// Animation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    /// Length in seconds
    pub seconds: f32,
    pub fps: u32,
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Raw volume file
    pub input: PathBuf,
    /// Explicit volume dimensions
    pub dims: Option<Vector3<usize>>,
    pub render_options: RenderOptions,
    /// Camera and volume placement
    pub camera: CameraState,
    /// Initial render parameters
    pub params: RenderParameters,
    /// Render an animation instead of a single frame
    pub animation: Option<Animation>,
    /// Output file name
    pub output: PathBuf,
}

impl Config {
    pub fn from_args(args: ArgMatches) -> Result<Config> {
        let input = args
            .value_of_os("input")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("missing input file"))?;

        let dims = if args.is_present("dims") {
            Some(values_to_vector3::<usize>(&args, "dims")?)
        } else {
            None
        };

        // Resolution
        let res: Vec<u16> = values_of(&args, "resolution")?;
        let resolution: Vector2<u16> = match res[..] {
            [w, h] => vector![w, h],
            _ => return Err(anyhow!("resolution takes 2 values")),
        };
        let render_options = RenderOptions::builder()
            .resolution(resolution)
            .early_ray_termination(!args.is_present("no-termination"))
            .multi_thread(!args.is_present("single-thread"))
            .build()?;

        // Camera
        let position = values_to_vector3::<f32>(&args, "camera")?;
        let target = values_to_vector3::<f32>(&args, "target")?;
        if position == target {
            return Err(anyhow!("camera position and target must differ"));
        }
        let mut camera = PerspectiveCamera::look_at(position.into(), target.into());
        camera.change_fov(value_of(&args, "fov")?);
        camera.change_aspect_from_resolution(resolution.x as u32, resolution.y as u32);

        // Volume placement
        let translation = values_to_vector3::<f32>(&args, "translate")?;
        let rotation = values_to_vector3::<f32>(&args, "rotate")?;
        let scale = values_to_vector3::<f32>(&args, "scale")?;
        if scale.iter().any(|&s| s == 0.0) {
            return Err(anyhow!("scale must be non-zero"));
        }
        let model = ModelTransform::new(translation, UnitQuaternion::identity(), scale)
            .with_euler_deg(rotation.x, rotation.y, rotation.z);

        // Parameters
        let color_index: u8 = value_of(&args, "color")?;
        let color_mode = ColorMode::from_index(color_index)
            .ok_or_else(|| anyhow!("unknown color mode {color_index}"))?;
        // Reported once here, renderer sanitizes silently every frame
        let params = RenderParameters {
            cross_section: values_to_vector3(&args, "cross-section")?,
            step_size: value_of(&args, "step")?,
            color_mode,
            alpha: value_of(&args, "alpha")?,
            iso_value: value_of(&args, "iso")?,
        }
        .sanitized_logged();

        let animation = match args.value_of("animate") {
            Some(_) => Some(Animation {
                seconds: value_of(&args, "animate")?,
                fps: value_of(&args, "fps")?,
            }),
            None => None,
        };

        let output = args
            .value_of_os("output")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("frame.png"));

        Ok(Config {
            input,
            dims,
            render_options,
            camera: CameraState::new(camera, model),
            params,
            animation,
            output,
        })
    }
}

#[cfg(test)]
mod test {

    use nalgebra::point;
    use volray_lib::render::MIN_STEP_SIZE;

    use super::*;
    use crate::args::get_command;

    fn default_camera() -> PerspectiveCamera {
        PerspectiveCamera::look_at(point![0.0, 0.0, -2.0], point![0.0, 0.0, 0.0])
    }

    fn parse(args: &[&str]) -> Result<Config> {
        let mut full = vec!["vol_render", "--input", "skull.raw"];
        full.extend_from_slice(args);
        let matches = get_command().try_get_matches_from(full)?;
        Config::from_args(matches)
    }

    #[test]
    fn defaults() {
        let cfg = parse(&[]).unwrap();

        assert_eq!(cfg.input, PathBuf::from("skull.raw"));
        assert_eq!(cfg.dims, None);
        assert_eq!(cfg.render_options, RenderOptions::default());
        assert_eq!(cfg.params, RenderParameters::default());
        assert_eq!(cfg.camera.camera, default_camera());
        assert_eq!(cfg.camera.model, ModelTransform::identity());
        assert_eq!(cfg.animation, None);
        assert_eq!(cfg.output, PathBuf::from("frame.png"));
    }

    #[test]
    fn full() {
        let cfg = parse(&[
            "--dims=64,32,16",
            "--resolution=320,200",
            "--camera=1,2,-3",
            "--cross-section=0.1,0.2,0.3",
            "--step",
            "0.02",
            "--color",
            "3",
            "--alpha",
            "0.3",
            "--no-termination",
            "--single-thread",
            "--animate",
            "2.5",
            "--fps",
            "10",
            "-o",
            "out/anim.png",
        ])
        .unwrap();

        assert_eq!(cfg.dims, Some(vector![64, 32, 16]));
        assert_eq!(cfg.render_options.resolution, vector![320, 200]);
        assert!(!cfg.render_options.ray_termination);
        assert!(!cfg.render_options.multi_thread);
        assert_eq!(cfg.camera.camera.get_pos(), point![1.0, 2.0, -3.0]);
        assert_eq!(cfg.camera.camera.get_aspect(), 1.6);
        assert_eq!(cfg.params.cross_section, vector![0.1, 0.2, 0.3]);
        assert_eq!(cfg.params.step_size, 0.02);
        assert_eq!(cfg.params.color_mode, ColorMode::Palette);
        assert_eq!(cfg.params.alpha, 0.3);
        assert_eq!(
            cfg.animation,
            Some(Animation {
                seconds: 2.5,
                fps: 10
            })
        );
        assert_eq!(cfg.output, PathBuf::from("out/anim.png"));
    }

    #[test]
    fn out_of_range_params_sanitized() {
        let cfg = parse(&[
            "--cross-section=2,-0.1,0.1",
            "--step=0",
            "--alpha=1.5",
        ])
        .unwrap();

        assert_eq!(cfg.params.cross_section, vector![0.5, 0.1, 0.1]);
        assert_eq!(cfg.params.step_size, MIN_STEP_SIZE);
        assert_eq!(cfg.params.alpha, 1.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--color", "4"]).is_err());
        assert!(parse(&["--resolution=0,10"]).is_err());
        assert!(parse(&["--dims=1,2"]).is_err());
        assert!(parse(&["--scale=1,0,1"]).is_err());
        assert!(parse(&["--camera=0,0,0", "--target=0,0,0"]).is_err());
    }
}
