//! Screenshot resize utility

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use image::imageops::FilterType;
use image::GenericImageView;

/// Resize `src` by `scale` and write the result next to it with a `zoom-`
/// prefix. Returns the output path.
///
/// Dimensions are floored, matching integer truncation; a scale small
/// enough to floor a dimension to zero is rejected.
pub fn zoom_image(src: &Path, scale: f32) -> Result<PathBuf> {
    if scale <= 0.0 {
        bail!("scale must be positive, got {scale}");
    }

    let img = image::open(src).with_context(|| format!("opening {}", src.display()))?;

    let width = (img.width() as f32 * scale) as u32;
    let height = (img.height() as f32 * scale) as u32;
    if width == 0 || height == 0 {
        bail!(
            "scale {scale} reduces {}x{} to an empty image",
            img.width(),
            img.height()
        );
    }

    let resized = img.resize_exact(width, height, FilterType::Triangle);

    let file_name = src
        .file_name()
        .and_then(|n| n.to_str())
        .context("source path has no file name")?;
    let output = src.with_file_name(format!("zoom-{file_name}"));

    resized
        .save(&output)
        .with_context(|| format!("saving {}", output.display()))?;

    Ok(output)
}
