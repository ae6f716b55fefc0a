//! Encode the canvas to PNG or JPEG on disk.
//!
//! The boolean entry points never fail loudly: errors are logged and turned
//! into `false`. The output file is owned by a scoped writer and is closed
//! on every exit path.

use crate::canvas::CanvasBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, RgbaImage};
use ink_core::model::CompressFormat;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tiny_skia::ColorU8;

pub const MAX_QUALITY: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("quality cannot be greater than 100, got {0}")]
    InvalidQuality(u32),

    #[error("export i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Encode(#[from] image::ImageError),
}

/// `dir/filename` plus the extension implied by `format`.
pub fn export_path(dir: &Path, filename: &str, format: CompressFormat) -> PathBuf {
    dir.join(format!("{filename}{}", format.extension()))
}

/// Save the canvas as `dir/filename.{png,jpg}`. Returns `true` on success.
///
/// A quality above 100 is rejected before any file is touched.
pub fn save_image(
    canvas: &CanvasBuffer,
    dir: &Path,
    filename: &str,
    format: CompressFormat,
    quality: u32,
) -> bool {
    match try_save_image(canvas, dir, filename, format, quality) {
        Ok(path) => {
            log::debug!("save_image: wrote {}", path.display());
            true
        }
        Err(ExportError::InvalidQuality(q)) => {
            log::debug!("save_image: quality cannot be greater than {MAX_QUALITY} (got {q})");
            false
        }
        Err(err) => {
            log::warn!("save_image: {err}");
            false
        }
    }
}

/// Fallible form of [`save_image`]; returns the written path.
pub fn try_save_image(
    canvas: &CanvasBuffer,
    dir: &Path,
    filename: &str,
    format: CompressFormat,
    quality: u32,
) -> Result<PathBuf, ExportError> {
    if quality > MAX_QUALITY {
        return Err(ExportError::InvalidQuality(quality));
    }
    let path = export_path(dir, filename, format);
    write_file(&path, &canvas.to_rgba_image(), format, quality)?;
    Ok(path)
}

/// Save an arbitrary bitmap to `path_stem` + extension.
///
/// Unlike [`save_image`], quality above 100 is clamped rather than rejected.
pub fn save_bitmap(path_stem: &Path, bitmap: &RgbaImage, format: CompressFormat, quality: u32) -> bool {
    let quality = quality.min(MAX_QUALITY);
    let mut name = path_stem.as_os_str().to_owned();
    name.push(format.extension());
    let path = PathBuf::from(name);
    match write_file(&path, bitmap, format, quality) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("save_bitmap {}: {err}", path.display());
            false
        }
    }
}

/// Encode `bitmap` into `out`. PNG ignores `quality`.
pub fn encode<W: Write>(
    out: W,
    bitmap: &RgbaImage,
    format: CompressFormat,
    quality: u32,
) -> Result<(), ExportError> {
    let (width, height) = bitmap.dimensions();
    match format.effective() {
        CompressFormat::Jpeg => {
            let rgb = flatten_rgb(bitmap);
            // The codec needs at least 1.
            let quality = quality.clamp(1, MAX_QUALITY) as u8;
            JpegEncoder::new_with_quality(out, quality).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
        _ => {
            PngEncoder::new(out).write_image(bitmap.as_raw(), width, height, ExtendedColorType::Rgba8)?;
        }
    }
    Ok(())
}

fn write_file(path: &Path, bitmap: &RgbaImage, format: CompressFormat, quality: u32) -> Result<(), ExportError> {
    let mut out = BufWriter::new(File::create(path)?);
    encode(&mut out, bitmap, format, quality)?;
    out.flush()?;
    Ok(())
}

/// Drop alpha the way an opaque codec sees premultiplied pixels: as if
/// composited over black.
fn flatten_rgb(bitmap: &RgbaImage) -> RgbImage {
    let mut out = RgbImage::new(bitmap.width(), bitmap.height());
    for (dst, src) in out.pixels_mut().zip(bitmap.pixels()) {
        let [r, g, b, a] = src.0;
        let c = ColorU8::from_rgba(r, g, b, a).premultiply();
        *dst = Rgb([c.red(), c.green(), c.blue()]);
    }
    out
}
