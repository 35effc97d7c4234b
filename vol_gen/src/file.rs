use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
};

use anyhow::{Context, Result};

pub fn open_create_file<P>(path: P) -> Result<File, std::io::Error>
where
    P: AsRef<Path>,
{
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Write headerless raw volume, samples in x fastest order
pub fn write_raw<P>(path: P, samples: &[u8]) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut file = open_create_file(path).with_context(|| format!("cannot open {path:?}"))?;
    file.write_all(samples)
        .with_context(|| format!("cannot write {path:?}"))?;
    Ok(())
}
