//! Writing framebuffers to disk

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use nalgebra::Vector2;

/// Framebuffer colors are premultiplied, flattening over black keeps them and drops coverage.
fn flatten_over_black(buffer: &[u8]) -> Vec<u8> {
    buffer
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
        .collect()
}

/// Save RGBA framebuffer of given resolution as PNG
pub fn write_png(path: &Path, buffer: &[u8], resolution: Vector2<u16>) -> Result<()> {
    let (width, height) = (resolution.x as u32, resolution.y as u32);
    let img = RgbaImage::from_raw(width, height, flatten_over_black(buffer))
        .with_context(|| format!("buffer does not fit {width}x{height} image"))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory {parent:?}"))?;
    }

    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("cannot write {path:?}"))?;
    log::debug!("Written {:?}", path);
    Ok(())
}

/// Path of animation frame `index`, `anim.png` becomes `anim_0007.png`
pub fn frame_path(output: &Path, index: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".into());
    let ext = output
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".into());
    output.with_file_name(format!("{stem}_{index:04}.{ext}"))
}
