use anyhow::Result;
use config::Config;
use env_logger::Env;

mod args;
mod config;
mod file;
mod generators;

use crate::{args::get_command, generators::generate_vol};

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = get_command().get_matches();
    let cfg = Config::from_args(args)?;

    log::info!(
        "Generating {}x{}x{} volume, {} voxels",
        cfg.dims.x,
        cfg.dims.y,
        cfg.dims.z,
        cfg.voxel_count()
    );
    log::debug!("{:?}", cfg);

    generate_vol(&cfg)
}
